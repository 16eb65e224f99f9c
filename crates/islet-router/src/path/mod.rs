/// Path utilities: URL canonicalization and file-path bookkeeping
///
/// URL helpers are pure. File-path helpers work lexically and only touch
/// the process environment to absolutize a relative path when the two
/// sides of a comparison disagree.

use crate::error::{Result, RouterError};
use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};

pub mod hierarchy;
pub use hierarchy::DirHierarchy;

/// Whether a URL path is in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not end with `/` (except root `/`)
///
/// # Examples
///
/// ```
/// use islet_router::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/users/:id"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("about"));
/// assert!(!is_valid_path("/about/"));
/// assert!(!is_valid_path("/about//page"));
/// ```
pub fn is_valid_path(path: &str) -> bool {
    if path.is_empty() || !path.starts_with('/') {
        return false;
    }

    if path.contains("//") || path.contains('\\') {
        return false;
    }

    path == "/" || !path.ends_with('/')
}

/// Canonical form of a request URL path
///
/// Drops any query string or fragment, turns backslashes into slashes and
/// collapses empty segments. Already-canonical input is returned borrowed.
///
/// # Examples
///
/// ```
/// use islet_router::path::normalize_path;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_path("/about"), Cow::Borrowed("/about")));
/// assert_eq!(normalize_path("/about/"), "/about");
/// assert_eq!(normalize_path("users//42?tab=posts"), "/users/42");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    if is_valid_path(path) {
        return Cow::Borrowed(path);
    }

    let normalized = path
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}

/// `/`-separated rendering of a file-system path
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::CurDir => None,
            Component::RootDir => Some(String::new()),
            other => Some(other.as_os_str().to_string_lossy().into_owned()),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// `path` relative to `root`, `/`-separated; `"."` when they are equal
pub fn relative_to(path: &Path, root: &Path) -> Result<String> {
    let stripped = path
        .strip_prefix(root)
        .map_err(|_| RouterError::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?;
    let rel = to_slash(stripped);
    Ok(if rel.is_empty() { ".".to_string() } else { rel })
}

/// Module specifier for `file` as seen from `base`: `./app/users/page.tsx`
///
/// Falls back to `../` steps when the file lives outside the base.
///
/// # Examples
///
/// ```
/// use islet_router::path::import_path;
/// use std::path::Path;
///
/// assert_eq!(
///     import_path(Path::new("src/app/about/page.tsx"), Path::new("src")),
///     "./app/about/page.tsx"
/// );
/// assert_eq!(
///     import_path(Path::new("web/app/page.tsx"), Path::new("src")),
///     "../web/app/page.tsx"
/// );
/// ```
pub fn import_path(file: &Path, base: &Path) -> String {
    let (file, base) = comparable(file, base);
    let file_parts = lexical_components(&file);
    let base_parts = lexical_components(&base);

    let shared = file_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = base_parts.len() - shared;
    let rest = file_parts[shared..].join("/");

    if ups == 0 {
        format!("./{}", rest)
    } else {
        let mut out = "../".repeat(ups);
        out.push_str(&rest);
        out
    }
}

/// Makes both paths absolute when exactly one of them is
fn comparable<'a>(file: &'a Path, base: &'a Path) -> (Cow<'a, Path>, Cow<'a, Path>) {
    if file.is_absolute() == base.is_absolute() {
        return (Cow::Borrowed(file), Cow::Borrowed(base));
    }
    let absolutize = |path: &'a Path| -> Cow<'a, Path> {
        if path.is_absolute() {
            return Cow::Borrowed(path);
        }
        std::env::current_dir()
            .map(|cwd| Cow::Owned(cwd.join(path)))
            .unwrap_or(Cow::Borrowed(path))
    };
    (absolutize(file), absolutize(base))
}

/// Normal components with `.` dropped and `..` applied
fn lexical_components(path: &Path) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.last().is_some_and(|last| last != "..") {
                    parts.pop();
                } else {
                    parts.push("..".to_string());
                }
            }
            Component::RootDir | Component::Prefix(_) => parts.clear(),
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
        }
    }
    parts
}

/// Joins a `/`-separated relative directory onto `root`
pub fn join_route_dir(root: &Path, route_dir: &str) -> PathBuf {
    if route_dir == "." {
        root.to_path_buf()
    } else {
        route_dir.split('/').fold(root.to_path_buf(), |acc, part| acc.join(part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_path() {
        assert!(is_valid_path("/"));
        assert!(is_valid_path("/about"));
        assert!(is_valid_path("/docs/*"));

        assert!(!is_valid_path(""));
        assert!(!is_valid_path("about"));
        assert!(!is_valid_path("/about/"));
        assert!(!is_valid_path("/about\\page"));
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("//"), "/");
        assert_eq!(normalize_path("\\users\\123"), "/users/123");
        assert_eq!(normalize_path("/path//to///page/"), "/path/to/page");
        assert_eq!(normalize_path("/search#results"), "/search");
    }

    #[test]
    fn test_to_slash() {
        assert_eq!(to_slash(Path::new("./src/app")), "src/app");
        assert_eq!(to_slash(Path::new("users/[id]/page.tsx")), "users/[id]/page.tsx");
        assert_eq!(to_slash(Path::new("/tmp/app")), "/tmp/app");
    }

    #[test]
    fn test_relative_to() {
        let root = Path::new("src/app");
        assert_eq!(
            relative_to(Path::new("src/app/users/[id]"), root).unwrap(),
            "users/[id]"
        );
        assert_eq!(relative_to(root, root).unwrap(), ".");
        assert!(matches!(
            relative_to(Path::new("lib/x"), root),
            Err(RouterError::OutsideRoot { .. })
        ));
    }

    #[test]
    fn test_import_path() {
        assert_eq!(
            import_path(Path::new("src/app/page.tsx"), Path::new("src")),
            "./app/page.tsx"
        );
        assert_eq!(
            import_path(Path::new("./src/app/api/route.ts"), Path::new("./src")),
            "./app/api/route.ts"
        );
        assert_eq!(
            import_path(Path::new("/srv/site/src/app/page.tsx"), Path::new("/srv/site/src")),
            "./app/page.tsx"
        );
        assert_eq!(
            import_path(Path::new("pages/index.tsx"), Path::new("src/app")),
            "../../pages/index.tsx"
        );
    }

    #[test]
    fn test_join_route_dir() {
        let root = Path::new("src/app");
        assert_eq!(join_route_dir(root, "."), PathBuf::from("src/app"));
        assert_eq!(
            join_route_dir(root, "users/[id]"),
            PathBuf::from("src/app/users/[id]")
        );
    }
}
