/// Directory path → URL path
///
/// Pure fold over the directory segments of a convention file. All the
/// per-segment work is delegated to [`SegmentParser`]; this module only
/// stitches tokens together and keeps the variant flags.

use super::pattern::{SegmentParser, SegmentToken};

/// Result of parsing a route directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPath {
    /// URL path, always starting with `/`
    pub path: String,
    pub params: Vec<String>,
    pub is_dynamic: bool,
    pub is_catch_all: bool,
    pub is_optional_catch_all: bool,
    /// Segments that contain brackets but did not match the grammar
    pub malformed: Vec<String>,
    /// Catch-all segments followed by further segments; such paths never match
    pub misplaced_catch_alls: Vec<String>,
}

/// Fold accumulator; mutations stay local to the fold
#[derive(Default)]
struct PathState {
    parsed: ParsedPath,
    open_catch_all: Option<String>,
}

impl PathState {
    fn with_token(mut self, raw: &str, token: SegmentToken) -> Self {
        if token.is_malformed() {
            self.parsed.malformed.push(raw.to_string());
        }

        if !token.url_segment.is_empty() {
            if let Some(catch_all) = self.open_catch_all.take() {
                self.parsed.misplaced_catch_alls.push(catch_all);
            }
            if !self.parsed.path.is_empty() {
                self.parsed.path.push('/');
            }
            self.parsed.path.push_str(&token.url_segment);
        }

        if token.is_dynamic() {
            self.parsed.is_dynamic = true;
        }
        if token.is_catch_all() {
            self.parsed.is_catch_all = true;
        }
        if token.is_optional_catch_all() {
            self.parsed.is_optional_catch_all = true;
        }
        if token.is_catch_all() || token.is_optional_catch_all() {
            self.open_catch_all = Some(raw.to_string());
        }
        if let Some(name) = token.param_name {
            self.parsed.params.push(name);
        }
        self
    }

    /// Leading slash; zero segments is the root
    fn finalize(mut self) -> ParsedPath {
        if !self.parsed.path.starts_with('/') {
            self.parsed.path.insert(0, '/');
        }
        self.parsed
    }
}

/// Splits a `/`-separated route directory, dropping `.` and empty parts
pub fn route_dir_segments(route_dir: &str) -> impl Iterator<Item = &str> {
    route_dir
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
}

/// Parses a route directory into a URL path (pure function)
///
/// # Examples
///
/// ```
/// use islet_router::route::parser::parse_route_dir;
/// use islet_router::route::SegmentParser;
///
/// let parsed = parse_route_dir("a/[b]/c", &SegmentParser::standard());
/// assert_eq!(parsed.path, "/a/:b/c");
/// assert_eq!(parsed.params, vec!["b"]);
///
/// let root = parse_route_dir(".", &SegmentParser::standard());
/// assert_eq!(root.path, "/");
/// ```
pub fn parse_route_dir(route_dir: &str, parser: &SegmentParser) -> ParsedPath {
    route_dir_segments(route_dir)
        .fold(PathState::default(), |state, segment| {
            state.with_token(segment, parser.parse(segment))
        })
        .finalize()
}

/// Prefixes an API path with `/api`; the root becomes exactly `/api`
pub fn api_path(path: &str) -> String {
    if path == "/" {
        "/api".to_string()
    } else {
        format!("/api{}", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(dir: &str) -> ParsedPath {
        parse_route_dir(dir, &SegmentParser::standard())
    }

    #[test]
    fn test_parse_root() {
        let parsed = parse(".");
        assert_eq!(parsed.path, "/");
        assert!(parsed.params.is_empty());
        assert!(!parsed.is_dynamic);

        assert_eq!(parse("").path, "/");
    }

    #[test]
    fn test_parse_static() {
        let parsed = parse("blog/posts");
        assert_eq!(parsed.path, "/blog/posts");
        assert!(!parsed.is_dynamic);
    }

    #[test]
    fn test_parse_nested_params() {
        let parsed = parse("shop/[category]/[item]");
        assert_eq!(parsed.path, "/shop/:category/:item");
        assert_eq!(parsed.params, vec!["category", "item"]);
        assert!(parsed.is_dynamic);
        assert!(!parsed.is_catch_all);
    }

    #[test]
    fn test_catch_all_before_more_segments() {
        let parsed = parse("files/[...path]/edit");
        assert_eq!(parsed.path, "/files/*/edit");
        assert_eq!(parsed.misplaced_catch_alls, vec!["[...path]"]);

        assert!(parse("files/[...path]").misplaced_catch_alls.is_empty());
        assert_eq!(
            parse("[[...a]]/[...b]/x").misplaced_catch_alls,
            vec!["[[...a]]", "[...b]"]
        );
    }

    #[test]
    fn test_parse_catch_all_flags() {
        let parsed = parse("docs/[...slug]");
        assert_eq!(parsed.path, "/docs/*");
        assert!(parsed.is_catch_all);
        assert!(!parsed.is_optional_catch_all);

        let parsed = parse("docs/[[...slug]]");
        assert_eq!(parsed.path, "/docs/*");
        assert!(parsed.is_optional_catch_all);
        assert!(!parsed.is_catch_all);
        assert_eq!(parsed.params, vec!["slug"]);
    }

    #[test]
    fn test_parse_collects_malformed() {
        let parsed = parse("users/[id");
        assert_eq!(parsed.path, "/users/[id");
        assert_eq!(parsed.malformed, vec!["[id"]);
        assert!(!parsed.is_dynamic);
    }

    #[test]
    fn test_parse_windows_separators() {
        assert_eq!(parse("users\\[id]").path, "/users/:id");
    }

    #[test]
    fn test_api_path() {
        assert_eq!(api_path("/"), "/api");
        assert_eq!(api_path("/users/:id"), "/api/users/:id");
    }
}
