/// Segment parsing for file-based route directories
///
/// Turns one directory name into a URL-grammar token. Parsing never fails:
/// anything that does not match the dynamic-parameter grammar is a static
/// segment, and callers decide whether a bracketed-but-invalid name is worth
/// a warning.

use crate::error::{Result, RouterError};
use once_cell::sync::Lazy;
use regex::Regex;

/// Grammar for bracketed segments: `[id]`, `[...slug]`, `[[...slug]]`.
///
/// Capture group 1 is the bracket interior that gets classified.
pub const DEFAULT_DYNAMIC_PARAM_PATTERN: &str = r"^\[(\[\.\.\.\w+\]|\.\.\.\w+|\w+)\]$";

static DEFAULT_PARSER: Lazy<SegmentParser> = Lazy::new(|| SegmentParser {
    pattern: Regex::new(DEFAULT_DYNAMIC_PARAM_PATTERN).expect("default pattern compiles"),
});

/// Variant tag of a parsed segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Literal text: `about`
    Static,
    /// Single parameter: `[id]` → `:id`
    Dynamic,
    /// One or more trailing segments: `[...slug]` → `*`
    CatchAll,
    /// Zero or more trailing segments: `[[...slug]]` → `*`
    OptionalCatchAll,
}

/// Parsed form of one path segment
///
/// # Examples
///
/// ```
/// use islet_router::route::pattern::{parse_segment, SegmentKind};
///
/// let token = parse_segment("[id]");
/// assert_eq!(token.url_segment, ":id");
/// assert_eq!(token.kind, SegmentKind::Dynamic);
/// assert_eq!(token.param_name.as_deref(), Some("id"));
///
/// let token = parse_segment("[...slug]");
/// assert_eq!(token.url_segment, "*");
/// assert!(token.is_catch_all());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentToken {
    pub url_segment: String,
    pub kind: SegmentKind,
    pub param_name: Option<String>,
    malformed: bool,
}

impl SegmentToken {
    fn literal(segment: &str) -> Self {
        SegmentToken {
            url_segment: segment.to_string(),
            kind: SegmentKind::Static,
            param_name: None,
            malformed: segment.contains('[') || segment.contains(']'),
        }
    }

    fn param(kind: SegmentKind, name: &str) -> Self {
        let url_segment = match kind {
            SegmentKind::Dynamic => format!(":{}", name),
            _ => "*".to_string(),
        };
        SegmentToken {
            url_segment,
            kind,
            param_name: Some(name.to_string()),
            malformed: false,
        }
    }

    /// Any non-static token
    pub fn is_dynamic(&self) -> bool {
        self.kind != SegmentKind::Static
    }

    pub fn is_catch_all(&self) -> bool {
        self.kind == SegmentKind::CatchAll
    }

    pub fn is_optional_catch_all(&self) -> bool {
        self.kind == SegmentKind::OptionalCatchAll
    }

    /// Static segment that still contains `[` or `]`, most likely a typo
    pub fn is_malformed(&self) -> bool {
        self.malformed
    }
}

/// Segment parser bound to one dynamic-parameter regular expression
#[derive(Debug, Clone)]
pub struct SegmentParser {
    pattern: Regex,
}

impl SegmentParser {
    /// Compiles `pattern`; group 1 (or the whole match) is the bracket interior
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|source| RouterError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern })
    }

    /// Parser using [`DEFAULT_DYNAMIC_PARAM_PATTERN`]
    pub fn standard() -> Self {
        DEFAULT_PARSER.clone()
    }

    /// Classifies a segment (pure function)
    ///
    /// # Parsing Rules (evaluated in order)
    ///
    /// 1. No grammar match → **static**, text unchanged
    /// 2. Interior `[...name]` → **optional catch-all** `*`
    /// 3. Interior `...name` → **catch-all** `*`
    /// 4. Anything else → **dynamic** `:name`
    ///
    /// A match whose parameter name comes out empty degrades to static.
    pub fn parse(&self, segment: &str) -> SegmentToken {
        let Some(caps) = self.pattern.captures(segment) else {
            return SegmentToken::literal(segment);
        };
        let inner = caps
            .get(1)
            .or_else(|| caps.get(0))
            .map(|m| m.as_str())
            .unwrap_or_default();

        let (kind, name) = if inner.starts_with("[...") && inner.ends_with(']') && inner.len() >= 5 {
            (SegmentKind::OptionalCatchAll, &inner[4..inner.len() - 1])
        } else if let Some(rest) = inner.strip_prefix("...") {
            (SegmentKind::CatchAll, rest)
        } else {
            (SegmentKind::Dynamic, inner)
        };

        if name.is_empty() {
            return SegmentToken {
                malformed: true,
                ..SegmentToken::literal(segment)
            };
        }
        SegmentToken::param(kind, name)
    }
}

impl Default for SegmentParser {
    fn default() -> Self {
        Self::standard()
    }
}

/// Parses a segment with the default grammar
pub fn parse_segment(segment: &str) -> SegmentToken {
    DEFAULT_PARSER.parse(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_static() {
        let token = parse_segment("about");
        assert_eq!(token.url_segment, "about");
        assert_eq!(token.kind, SegmentKind::Static);
        assert_eq!(token.param_name, None);
        assert!(!token.is_dynamic());
        assert!(!token.is_malformed());
    }

    #[test]
    fn test_parse_dynamic() {
        let token = parse_segment("[id]");
        assert_eq!(token.url_segment, ":id");
        assert!(token.is_dynamic());
        assert_eq!(token.param_name.as_deref(), Some("id"));
    }

    #[test]
    fn test_parse_catch_all() {
        let token = parse_segment("[...slug]");
        assert_eq!(token.url_segment, "*");
        assert!(token.is_catch_all());
        assert!(!token.is_optional_catch_all());
        assert_eq!(token.param_name.as_deref(), Some("slug"));
    }

    #[test]
    fn test_parse_optional_catch_all() {
        let token = parse_segment("[[...opt]]");
        assert_eq!(token.url_segment, "*");
        assert!(token.is_optional_catch_all());
        assert!(!token.is_catch_all());
        assert_eq!(token.param_name.as_deref(), Some("opt"));
    }

    #[test]
    fn test_parse_malformed_is_static() {
        for raw in ["[id", "id]", "[]", "[a-b]", "[[id]]", "[...]"] {
            let token = parse_segment(raw);
            assert_eq!(token.kind, SegmentKind::Static, "{}", raw);
            assert_eq!(token.url_segment, raw);
            assert!(token.is_malformed(), "{}", raw);
        }
    }

    #[test]
    fn test_custom_pattern() {
        // Underscore-prefixed directories as single parameters
        let parser = SegmentParser::new(r"^_(\w+)$").unwrap();
        let token = parser.parse("_user");
        assert_eq!(token.url_segment, ":user");
        assert_eq!(parser.parse("[id]").kind, SegmentKind::Static);
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(SegmentParser::new("[unclosed").is_err());
    }
}
