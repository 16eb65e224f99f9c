// File: src/scan.rs
// Purpose: Depth-first walk of a route root collecting resolved records

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::path::to_slash;
use crate::route::resolve::Convention;
use crate::route::RouteRecord;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Records found by one scan, in scan order, plus what went wrong on the way
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub records: Vec<RouteRecord>,
    pub diagnostics: Diagnostics,
}

/// Scans every configured directory of a convention
///
/// Entries are visited in name order so the output does not depend on the
/// file system's listing order. Nothing here is fatal: missing directories,
/// unreadable entries and unresolvable files become diagnostics.
pub fn scan<C: Convention>(convention: &C) -> ScanOutcome {
    let ctx = convention.context();
    let mut outcome = ScanOutcome::default();

    for dir in &ctx.scan_dirs {
        if !dir.is_dir() {
            outcome.diagnostics.push(Diagnostic::MissingScanDir {
                dir: to_slash(dir),
            });
            continue;
        }

        let excluded = ctx
            .relative(dir)
            .map(|rel| ctx.is_excluded_dir(&rel))
            .unwrap_or(false);
        if excluded {
            debug!("Skipping excluded scan directory: {}", dir.display());
            continue;
        }

        walk(convention, dir, 0, &mut outcome);
    }

    info!(
        "Scanned {} {} route(s) under {}",
        outcome.records.len(),
        convention.label(),
        ctx.root.display()
    );
    outcome
}

/// Visits `dir`, which sits `depth` levels below its scan directory
///
/// A directory is listed only while `depth < max_depth`, so with the default
/// of 10 the deepest listed directory is nine levels below the scan root.
fn walk<C: Convention>(convention: &C, dir: &Path, depth: usize, outcome: &mut ScanOutcome) {
    let ctx = convention.context();

    if depth >= ctx.max_depth {
        outcome.diagnostics.push(Diagnostic::DepthLimit {
            dir: to_slash(dir),
            max_depth: ctx.max_depth,
        });
        return;
    }

    let mut entries = match fs::read_dir(dir) {
        Ok(read) => read.filter_map(|entry| entry.ok()).collect::<Vec<_>>(),
        Err(err) => {
            outcome.diagnostics.push(Diagnostic::UnreadableEntry {
                path: to_slash(dir),
                reason: err.to_string(),
            });
            return;
        }
    };
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        // follows symlinks, like stat
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) => {
                outcome.diagnostics.push(Diagnostic::UnreadableEntry {
                    path: to_slash(&path),
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let relative = match ctx.relative(&path) {
            Ok(relative) => relative,
            Err(err) => {
                outcome.diagnostics.push(Diagnostic::UnreadableEntry {
                    path: to_slash(&path),
                    reason: err.display_chain(),
                });
                continue;
            }
        };

        if metadata.is_dir() {
            if ctx.filter.should_exclude_dir(&relative, &name) {
                debug!("Skipping excluded directory: {}", relative);
                continue;
            }
            walk(convention, &path, depth + 1, outcome);
        } else if metadata.is_file() {
            if ctx.filter.should_ignore_file(&relative) || !convention.is_entry(&name) {
                continue;
            }
            match convention.resolve(&path, &mut outcome.diagnostics) {
                Ok(record) => {
                    debug!("Resolved {} -> {}", record.file_path, record.path);
                    outcome.records.push(record);
                }
                Err(err) => outcome.diagnostics.push(Diagnostic::ResolveFailed {
                    file: to_slash(&path),
                    reason: err.display_chain(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageRouterConfig;
    use crate::route::resolve::PageConvention;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "export default function Page() {}").unwrap();
    }

    fn convention(root: &Path, max_depth: usize) -> PageConvention {
        let mut config = PageRouterConfig::default().with_root(root.to_string_lossy());
        config.max_depth = max_depth;
        config.import_base = root.to_string_lossy().into_owned();
        PageConvention::new(&config).unwrap()
    }

    fn paths(outcome: &ScanOutcome) -> Vec<&str> {
        outcome.records.iter().map(|r| r.path.as_str()).collect()
    }

    #[test]
    fn test_scan_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "page.tsx");
        touch(dir.path(), "zoo/page.tsx");
        touch(dir.path(), "about/page.tsx");
        touch(dir.path(), "about/layout.tsx");
        touch(dir.path(), "components/page.tsx");
        touch(dir.path(), "about/page.test.tsx");

        let outcome = scan(&convention(dir.path(), 10));
        // name order: about/, components/, page.tsx, zoo/
        assert_eq!(paths(&outcome), vec!["/about", "/", "/zoo"]);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_depth_limit_truncates_and_warns() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a/page.tsx");
        touch(dir.path(), "a/b/page.tsx");
        touch(dir.path(), "a/b/c/page.tsx");

        let outcome = scan(&convention(dir.path(), 2));
        // root and a/ are listed; a/b sits at depth 2 and is not
        assert_eq!(paths(&outcome), vec!["/a"]);
        assert_eq!(outcome.diagnostics.len(), 1);
        match outcome.diagnostics.iter().next() {
            Some(Diagnostic::DepthLimit { dir, max_depth: 2 }) => assert!(dir.ends_with("a/b")),
            other => panic!("expected a depth limit, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_depth_lists_nothing() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "page.tsx");

        let outcome = scan(&convention(dir.path(), 0));
        assert!(outcome.records.is_empty());
        assert!(matches!(
            outcome.diagnostics.iter().next(),
            Some(Diagnostic::DepthLimit { max_depth: 0, .. })
        ));
    }

    #[test]
    fn test_missing_root_is_a_diagnostic() {
        let dir = TempDir::new().unwrap();
        let outcome = scan(&convention(&dir.path().join("nope"), 10));
        assert!(outcome.records.is_empty());
        assert!(matches!(
            outcome.diagnostics.iter().next(),
            Some(Diagnostic::MissingScanDir { .. })
        ));
    }

    #[test]
    fn test_route_dirs_limit_the_scan() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "blog/page.tsx");
        touch(dir.path(), "shop/page.tsx");

        let mut config = PageRouterConfig::default().with_root(dir.path().to_string_lossy());
        config.route_dirs = vec!["shop".to_string()];
        config.import_base = dir.path().to_string_lossy().into_owned();
        let outcome = scan(&PageConvention::new(&config).unwrap());

        assert_eq!(paths(&outcome), vec!["/shop"]);
    }
}
