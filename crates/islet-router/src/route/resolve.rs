/// Convention file → [`RouteRecord`]
///
/// Page and API routes share the directory-to-URL step and differ in what
/// they read from the file and its surroundings. [`Convention`] is the seam
/// the scanner is generic over.

use super::exports::{exported_methods, extract_metadata};
use super::parser::{api_path, parse_route_dir, ParsedPath};
use super::pattern::SegmentParser;
use super::{ApiRoute, PageRoute, RouteKind, RouteRecord};
use crate::config::{ApiRouterConfig, PageRouterConfig, ScanSettings};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::Result;
use crate::exclude::ExclusionFilter;
use crate::path::{import_path, join_route_dir, relative_to, to_slash, DirHierarchy};
use std::fs;
use std::path::{Path, PathBuf};

/// Compiled scanner settings shared by both conventions
#[derive(Debug, Clone)]
pub struct ScanContext {
    pub root: PathBuf,
    pub scan_dirs: Vec<PathBuf>,
    pub import_base: PathBuf,
    pub max_depth: usize,
    pub parser: SegmentParser,
    pub filter: ExclusionFilter,
}

impl ScanContext {
    fn new(settings: &ScanSettings, filter: ExclusionFilter) -> Result<Self> {
        Ok(Self {
            root: settings.root_dir.clone(),
            scan_dirs: settings.scan_dirs(),
            import_base: settings.import_base.clone(),
            max_depth: settings.max_depth,
            parser: SegmentParser::new(&settings.dynamic_param_pattern)?,
            filter,
        })
    }

    /// Path of `path` relative to the scan root, `/`-separated
    pub fn relative(&self, path: &Path) -> Result<String> {
        relative_to(path, &self.root)
    }

    /// Whether a directory below the root is excluded; the root never is
    pub fn is_excluded_dir(&self, route_dir: &str) -> bool {
        if route_dir == "." {
            return false;
        }
        let name = route_dir.rsplit('/').next().unwrap_or(route_dir);
        self.filter.should_exclude_dir(route_dir, name)
    }

    /// Shared first half of resolution: locations and URL shape
    fn locate(&self, file: &Path, diagnostics: &mut Diagnostics) -> Result<Located> {
        let relative_path = self.relative(file)?;
        let route_dir = match relative_path.rsplit_once('/') {
            Some((dir, _)) => dir.to_string(),
            None => ".".to_string(),
        };
        let parsed = parse_route_dir(&route_dir, &self.parser);
        let file_path = to_slash(file);

        for segment in &parsed.malformed {
            diagnostics.push(Diagnostic::MalformedSegment {
                file: file_path.clone(),
                segment: segment.clone(),
            });
        }
        for segment in &parsed.misplaced_catch_alls {
            diagnostics.push(Diagnostic::MisplacedCatchAll {
                file: file_path.clone(),
                segment: segment.clone(),
            });
        }

        Ok(Located {
            file_path,
            relative_path,
            route_dir,
            parsed,
        })
    }
}

struct Located {
    file_path: String,
    relative_path: String,
    route_dir: String,
    parsed: ParsedPath,
}

impl Located {
    fn into_record(self, path: String, kind: RouteKind) -> RouteRecord {
        RouteRecord {
            path,
            file_path: self.file_path,
            relative_path: self.relative_path,
            route_dir: self.route_dir,
            params: self.parsed.params,
            is_dynamic: self.parsed.is_dynamic,
            is_catch_all: self.parsed.is_catch_all,
            is_optional_catch_all: self.parsed.is_optional_catch_all,
            kind,
        }
    }
}

/// File text with invalid UTF-8 replaced; `Err` carries the I/O reason
fn read_source(file: &Path) -> std::result::Result<String, String> {
    fs::read(file)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .map_err(|err| err.to_string())
}

/// One routing convention: which files are entry points and how they resolve
pub trait Convention {
    /// Human label used in logs: "page" or "api"
    fn label(&self) -> &'static str;

    fn context(&self) -> &ScanContext;

    /// Whether a file name is a route entry point
    fn is_entry(&self, file_name: &str) -> bool;

    /// Builds the record for an entry file found by the scanner
    ///
    /// Advisory findings go to `diagnostics`; an `Err` means the file is skipped.
    fn resolve(&self, file: &Path, diagnostics: &mut Diagnostics) -> Result<RouteRecord>;
}

/// `page.tsx` routes with layouts, loading and error boundaries
#[derive(Debug, Clone)]
pub struct PageConvention {
    context: ScanContext,
    page_file_names: Vec<String>,
    layout_file_names: Vec<String>,
    loading_file_names: Vec<String>,
    error_file_names: Vec<String>,
}

impl PageConvention {
    pub fn new(config: &PageRouterConfig) -> Result<Self> {
        let settings = config.settings();
        let filter = ExclusionFilter::for_pages(&settings)?;
        Ok(Self {
            context: ScanContext::new(&settings, filter)?,
            page_file_names: config.page_file_names.clone(),
            layout_file_names: config.layout_file_names.clone(),
            loading_file_names: config.loading_file_names.clone(),
            error_file_names: config.error_file_names.clone(),
        })
    }

    /// First configured name present in `dir`
    fn find_in(&self, dir: &Path, names: &[String]) -> Option<PathBuf> {
        names
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Layout import paths from the scan root down to `route_dir`
    ///
    /// Walks upward, at most one layout per directory, and stops at the
    /// first excluded ancestor.
    pub fn layout_chain(&self, route_dir: &str) -> Vec<String> {
        let ctx = &self.context;
        let mut layouts: Vec<String> = DirHierarchy::new(route_dir)
            .take_while(|dir| !ctx.is_excluded_dir(dir))
            .filter_map(|dir| {
                self.find_in(&join_route_dir(&ctx.root, dir), &self.layout_file_names)
            })
            .map(|layout| import_path(&layout, &ctx.import_base))
            .collect();
        layouts.reverse();
        layouts
    }
}

impl Convention for PageConvention {
    fn label(&self) -> &'static str {
        "page"
    }

    fn context(&self) -> &ScanContext {
        &self.context
    }

    fn is_entry(&self, file_name: &str) -> bool {
        self.page_file_names.iter().any(|name| name == file_name)
    }

    fn resolve(&self, file: &Path, diagnostics: &mut Diagnostics) -> Result<RouteRecord> {
        let ctx = &self.context;
        let located = ctx.locate(file, diagnostics)?;

        let dir = join_route_dir(&ctx.root, &located.route_dir);
        let loading = self.find_in(&dir, &self.loading_file_names);
        let error = self.find_in(&dir, &self.error_file_names);

        // an unreadable page still routes, just without metadata
        let metadata = match read_source(file).and_then(|source| extract_metadata(&source)) {
            Ok(metadata) => metadata,
            Err(reason) => {
                diagnostics.push(Diagnostic::UnparsableMetadata {
                    file: located.file_path.clone(),
                    reason,
                });
                None
            }
        };

        let page = PageRoute {
            page_component: import_path(file, &ctx.import_base),
            layout_components: self.layout_chain(&located.route_dir),
            has_loading: loading.is_some(),
            loading_component: loading.map(|p| import_path(&p, &ctx.import_base)),
            has_error: error.is_some(),
            error_component: error.map(|p| import_path(&p, &ctx.import_base)),
            metadata,
        };

        let path = located.parsed.path.clone();
        Ok(located.into_record(path, RouteKind::Page(page)))
    }
}

/// `route.ts` handler modules served under `/api`
#[derive(Debug, Clone)]
pub struct ApiConvention {
    context: ScanContext,
    api_file_names: Vec<String>,
}

impl ApiConvention {
    pub fn new(config: &ApiRouterConfig) -> Result<Self> {
        let settings = config.settings();
        let filter = ExclusionFilter::for_api(&settings)?;
        Ok(Self {
            context: ScanContext::new(&settings, filter)?,
            api_file_names: config.api_file_names.clone(),
        })
    }
}

impl Convention for ApiConvention {
    fn label(&self) -> &'static str {
        "api"
    }

    fn context(&self) -> &ScanContext {
        &self.context
    }

    fn is_entry(&self, file_name: &str) -> bool {
        self.api_file_names.iter().any(|name| name == file_name)
    }

    fn resolve(&self, file: &Path, diagnostics: &mut Diagnostics) -> Result<RouteRecord> {
        let ctx = &self.context;
        let located = ctx.locate(file, diagnostics)?;

        let supported_methods = match read_source(file) {
            Ok(source) => {
                let methods = exported_methods(&source);
                if methods.is_empty() {
                    diagnostics.push(Diagnostic::NoHandlers {
                        file: located.file_path.clone(),
                    });
                }
                methods
            }
            Err(reason) => {
                diagnostics.push(Diagnostic::UnreadableEntry {
                    path: located.file_path.clone(),
                    reason,
                });
                Vec::new()
            }
        };

        let api = ApiRoute {
            import_path: import_path(file, &ctx.import_base),
            supported_methods,
        };

        let path = api_path(&located.parsed.path);
        Ok(located.into_record(path, RouteKind::Api(api)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouterError;
    use crate::route::HttpMethod;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn pages(dir: &TempDir) -> PageConvention {
        let root = dir.path().join("src/app");
        let mut config = PageRouterConfig::default().with_root(root.to_string_lossy());
        config.import_base = dir.path().join("src").to_string_lossy().into_owned();
        PageConvention::new(&config).unwrap()
    }

    #[test]
    fn test_resolve_page_with_siblings() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("src/app");
        write(&root, "layout.tsx", "");
        write(&root, "blog/layout.tsx", "");
        write(&root, "blog/[slug]/loading.tsx", "");
        let page = write(
            &root,
            "blog/[slug]/page.tsx",
            "export const metadata = { title: 'Post' };",
        );

        let convention = pages(&dir);
        let mut diagnostics = Diagnostics::new();
        let record = convention.resolve(&page, &mut diagnostics).unwrap();

        assert_eq!(record.path, "/blog/:slug");
        assert_eq!(record.params, vec!["slug"]);
        assert_eq!(record.route_dir, "blog/[slug]");
        assert_eq!(record.relative_path, "blog/[slug]/page.tsx");

        let info = record.page().unwrap();
        assert_eq!(info.page_component, "./app/blog/[slug]/page.tsx");
        assert_eq!(
            info.layout_components,
            vec!["./app/layout.tsx", "./app/blog/layout.tsx"]
        );
        assert!(info.has_loading);
        assert_eq!(
            info.loading_component.as_deref(),
            Some("./app/blog/[slug]/loading.tsx")
        );
        assert!(!info.has_error);
        assert_eq!(info.metadata.as_ref().unwrap()["title"], "Post");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_loading_is_not_inherited() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("src/app");
        write(&root, "loading.tsx", "");
        write(&root, "error.tsx", "");
        let page = write(&root, "about/page.tsx", "");

        let record = pages(&dir).resolve(&page, &mut Diagnostics::new()).unwrap();
        let info = record.page().unwrap();
        assert!(!info.has_loading);
        assert!(!info.has_error);
    }

    #[test]
    fn test_one_layout_per_directory() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("src/app");
        write(&root, "layout.tsx", "");
        write(&root, "layout.jsx", "");
        let page = write(&root, "page.tsx", "");

        let record = pages(&dir).resolve(&page, &mut Diagnostics::new()).unwrap();
        assert_eq!(record.path, "/");
        assert_eq!(record.page().unwrap().layout_components, vec!["./app/layout.tsx"]);
    }

    #[test]
    fn test_unparsable_metadata_is_dropped() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("src/app");
        let page = write(&root, "page.tsx", "export const metadata = { title: site.name };");

        let mut diagnostics = Diagnostics::new();
        let record = pages(&dir).resolve(&page, &mut diagnostics).unwrap();
        assert_eq!(record.page().unwrap().metadata, None);
        assert!(matches!(
            diagnostics.iter().next(),
            Some(Diagnostic::UnparsableMetadata { .. })
        ));
    }

    #[test]
    fn test_resolve_api_route() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("src/app/api");
        let file = write(
            &root,
            "users/[id]/route.ts",
            "export async function GET(c) {}\nexport const DELETE = (c) => {};",
        );

        let mut config = ApiRouterConfig::default().with_root(root.to_string_lossy());
        config.import_base = dir.path().join("src").to_string_lossy().into_owned();
        let convention = ApiConvention::new(&config).unwrap();

        let mut diagnostics = Diagnostics::new();
        let record = convention.resolve(&file, &mut diagnostics).unwrap();
        assert_eq!(record.path, "/api/users/:id");
        assert_eq!(record.kind_name(), "api");
        let api = record.api().unwrap();
        assert_eq!(api.import_path, "./app/api/users/[id]/route.ts");
        assert_eq!(api.supported_methods, vec![HttpMethod::Get, HttpMethod::Delete]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_misplaced_catch_all_is_reported() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("src/app");
        let page = write(&root, "files/[...path]/edit/page.tsx", "");

        let mut diagnostics = Diagnostics::new();
        let record = pages(&dir).resolve(&page, &mut diagnostics).unwrap();
        assert_eq!(record.path, "/files/*/edit");
        assert!(matches!(
            diagnostics.iter().next(),
            Some(Diagnostic::MisplacedCatchAll { segment, .. }) if segment == "[...path]"
        ));
    }

    #[test]
    fn test_non_utf8_sources_still_resolve() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("src/app");
        let page = root.join("about/page.tsx");
        fs::create_dir_all(page.parent().unwrap()).unwrap();
        fs::write(&page, b"export const metadata = { title: 'Caf\xe9' };\n\xff\xfe").unwrap();

        let mut diagnostics = Diagnostics::new();
        let record = pages(&dir).resolve(&page, &mut diagnostics).unwrap();
        assert_eq!(record.path, "/about");
        assert_eq!(record.page().unwrap().metadata.as_ref().unwrap()["title"], "Caf\u{fffd}");

        let api_root = root.join("api");
        let route = api_root.join("ping/route.ts");
        fs::create_dir_all(route.parent().unwrap()).unwrap();
        fs::write(&route, b"// \xff\xfe caf\xe9\nexport const GET = () => {};").unwrap();

        let mut config = ApiRouterConfig::default().with_root(api_root.to_string_lossy());
        config.import_base = dir.path().join("src").to_string_lossy().into_owned();
        let record = ApiConvention::new(&config)
            .unwrap()
            .resolve(&route, &mut diagnostics)
            .unwrap();
        assert_eq!(record.path, "/api/ping");
        assert_eq!(record.api().unwrap().supported_methods, vec![HttpMethod::Get]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_file_outside_root_fails() {
        let dir = TempDir::new().unwrap();
        let stray = write(dir.path(), "elsewhere/page.tsx", "");
        let result = pages(&dir).resolve(&stray, &mut Diagnostics::new());
        assert!(matches!(result, Err(RouterError::OutsideRoot { .. })));
    }
}
