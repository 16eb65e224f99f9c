/// Route records and the pieces that build them
///
/// - `pattern`: directory name → URL segment token
/// - `parser`: directory path → URL path, params and variant flags
/// - `exports`: best-effort reading of handler exports and page metadata
/// - `resolve`: convention file → full [`RouteRecord`]

pub mod exports;
pub mod parser;
pub mod pattern;
pub mod resolve;

pub use pattern::{parse_segment, SegmentKind, SegmentParser, SegmentToken};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// HTTP verbs an API route file can export handlers for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    /// Recognized verbs, in detection order
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unsupported HTTP method: {}", s))
    }
}

/// A resolved page or API route
///
/// Serialized with camelCase keys; this is the shape the dispatcher reads
/// from the generated artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecord {
    /// URL pattern like "/users/:id"
    pub path: String,
    /// Source file as discovered, `/`-separated
    pub file_path: String,
    /// Source file relative to the scan root
    pub relative_path: String,
    /// Containing directory relative to the scan root, "." for the root
    pub route_dir: String,
    /// Parameter names, left to right
    pub params: Vec<String>,
    pub is_dynamic: bool,
    pub is_catch_all: bool,
    pub is_optional_catch_all: bool,
    #[serde(flatten)]
    pub kind: RouteKind,
}

/// Kind-specific part of a [`RouteRecord`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RouteKind {
    Page(PageRoute),
    Api(ApiRoute),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRoute {
    /// Import path of the page module
    pub page_component: String,
    /// Layout import paths, outermost (scan root) first
    pub layout_components: Vec<String>,
    pub has_loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading_component: Option<String>,
    pub has_error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_component: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiRoute {
    /// Import path of the handler module
    pub import_path: String,
    pub supported_methods: Vec<HttpMethod>,
}

impl RouteRecord {
    pub fn page(&self) -> Option<&PageRoute> {
        match &self.kind {
            RouteKind::Page(page) => Some(page),
            RouteKind::Api(_) => None,
        }
    }

    pub fn api(&self) -> Option<&ApiRoute> {
        match &self.kind {
            RouteKind::Api(api) => Some(api),
            RouteKind::Page(_) => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            RouteKind::Page(_) => "page",
            RouteKind::Api(_) => "api",
        }
    }

    /// Module the dispatcher loads for this route
    pub fn module_path(&self) -> &str {
        match &self.kind {
            RouteKind::Page(page) => &page.page_component,
            RouteKind::Api(api) => &api.import_path,
        }
    }

    /// Non-empty URL segments of [`path`](Self::path)
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }

    /// Whether the API route exports a handler for `method`
    pub fn supports(&self, method: HttpMethod) -> bool {
        self.api()
            .map(|api| api.supported_methods.contains(&method))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_record() -> RouteRecord {
        RouteRecord {
            path: "/api/users/:id".to_string(),
            file_path: "src/app/api/users/[id]/route.ts".to_string(),
            relative_path: "users/[id]/route.ts".to_string(),
            route_dir: "users/[id]".to_string(),
            params: vec!["id".to_string()],
            is_dynamic: true,
            is_catch_all: false,
            is_optional_catch_all: false,
            kind: RouteKind::Api(ApiRoute {
                import_path: "./app/api/users/[id]/route.ts".to_string(),
                supported_methods: vec![HttpMethod::Get, HttpMethod::Delete],
            }),
        }
    }

    #[test]
    fn test_http_method_parse() {
        assert_eq!("get".parse::<HttpMethod>(), Ok(HttpMethod::Get));
        assert_eq!("OPTIONS".parse::<HttpMethod>(), Ok(HttpMethod::Options));
        assert!("TRACE".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_record_serializes_camel_case_with_kind_tag() {
        let json = serde_json::to_value(api_record()).unwrap();
        assert_eq!(json["kind"], "api");
        assert_eq!(json["isDynamic"], true);
        assert_eq!(json["importPath"], "./app/api/users/[id]/route.ts");
        assert_eq!(json["supportedMethods"], serde_json::json!(["GET", "DELETE"]));
    }

    #[test]
    fn test_record_reads_back() {
        let record = api_record();
        let json = serde_json::to_string(&record).unwrap();
        let back: RouteRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_supports() {
        let record = api_record();
        assert!(record.supports(HttpMethod::Get));
        assert!(!record.supports(HttpMethod::Post));
        assert_eq!(record.segments().collect::<Vec<_>>(), vec!["api", "users", ":id"]);
    }
}
