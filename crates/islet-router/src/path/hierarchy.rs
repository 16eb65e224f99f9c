/// Lazy iterator over a route directory and its ancestors
///
/// Route directories are `/`-separated and relative to the scan root, which
/// itself is `"."`. For `users/[id]/edit` this yields
/// `users/[id]/edit` → `users/[id]` → `users` → `.`
///
/// Borrows from the input; no allocation per step.
///
/// # Examples
///
/// ```
/// use islet_router::path::DirHierarchy;
///
/// let dirs: Vec<&str> = DirHierarchy::new("a/b/c").collect();
/// assert_eq!(dirs, vec!["a/b/c", "a/b", "a", "."]);
///
/// let dirs: Vec<&str> = DirHierarchy::new(".").collect();
/// assert_eq!(dirs, vec!["."]);
/// ```
#[derive(Debug, Clone)]
pub struct DirHierarchy<'a> {
    current: Option<&'a str>,
}

impl<'a> DirHierarchy<'a> {
    pub fn new(route_dir: &'a str) -> Self {
        let trimmed = route_dir.trim_matches('/');
        Self {
            current: Some(if trimmed.is_empty() { "." } else { trimmed }),
        }
    }
}

impl<'a> Iterator for DirHierarchy<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;

        self.current = if current == "." {
            None
        } else if let Some(slash_pos) = current.rfind('/') {
            Some(&current[..slash_pos])
        } else {
            Some(".")
        };

        Some(current)
    }
}
