// File: src/exclude.rs
// Purpose: Decide which directories and files a route scan skips

use crate::config::ScanSettings;
use crate::error::{Result, RouterError};
use glob::{MatchOptions, Pattern};

/// Directory names never scanned for routes, whatever the configuration says
const RESERVED_DIRS: &[&str] = &[
    "islands",
    "components",
    "lib",
    "utils",
    "types",
    "styles",
    "hooks",
    "contexts",
    "stores",
    "public",
    "assets",
    "images",
    "dist",
    "build",
    "node_modules",
];

/// Reserved only while scanning pages; API routes live under it
const PAGES_ONLY_RESERVED: &str = "api";

/// minimatch-like semantics: `*` stays within a segment, dotfiles need a literal dot
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

#[derive(Debug, Clone)]
enum ExcludeRule {
    /// Entry containing `*` or `?`: tested against relative path and name
    Glob(Pattern),
    /// Entry containing `/`: exact relative path
    RelativePath(String),
    /// Plain directory name
    Name(String),
}

impl ExcludeRule {
    fn parse(entry: &str) -> Result<Self> {
        if entry.contains('*') || entry.contains('?') {
            compile(entry).map(ExcludeRule::Glob)
        } else if entry.contains('/') {
            Ok(ExcludeRule::RelativePath(entry.trim_matches('/').to_string()))
        } else {
            Ok(ExcludeRule::Name(entry.to_string()))
        }
    }

    fn matches(&self, relative_path: &str, name: &str) -> bool {
        match self {
            ExcludeRule::Glob(pattern) => {
                pattern.matches_with(relative_path, MATCH_OPTIONS)
                    || pattern.matches_with(name, MATCH_OPTIONS)
            }
            ExcludeRule::RelativePath(path) => path == relative_path,
            ExcludeRule::Name(dir) => dir == name,
        }
    }
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|source| RouterError::InvalidGlob {
        pattern: pattern.to_string(),
        source,
    })
}

/// Compiled exclusion rules for one scanner
///
/// Directory checks run in order: reserved names, user entries, then the
/// ignore globs. Files are only checked against the ignore globs.
///
/// # Examples
///
/// ```
/// use islet_router::config::PageRouterConfig;
/// use islet_router::ExclusionFilter;
///
/// let filter = ExclusionFilter::for_pages(&PageRouterConfig::default().settings()).unwrap();
/// assert!(filter.should_exclude_dir("components", "components"));
/// assert!(filter.should_exclude_dir("api", "api"));
/// assert!(!filter.should_exclude_dir("blog", "blog"));
/// assert!(filter.should_ignore_file("blog/page.test.tsx"));
/// ```
#[derive(Debug, Clone)]
pub struct ExclusionFilter {
    reserved_api: bool,
    rules: Vec<ExcludeRule>,
    ignore: Vec<Pattern>,
}

impl ExclusionFilter {
    fn build(settings: &ScanSettings, reserved_api: bool) -> Result<Self> {
        let rules = settings
            .exclude_dirs
            .iter()
            .map(|entry| ExcludeRule::parse(entry))
            .collect::<Result<Vec<_>>>()?;
        let ignore = settings
            .ignore_files
            .iter()
            .map(|pattern| compile(pattern))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            reserved_api,
            rules,
            ignore,
        })
    }

    /// Filter for the page scanner; `api` directories are reserved
    pub fn for_pages(settings: &ScanSettings) -> Result<Self> {
        Self::build(settings, true)
    }

    /// Filter for the API scanner
    pub fn for_api(settings: &ScanSettings) -> Result<Self> {
        Self::build(settings, false)
    }

    /// Whether a directory, given by scan-root-relative path and name, is skipped
    pub fn should_exclude_dir(&self, relative_path: &str, name: &str) -> bool {
        if RESERVED_DIRS.contains(&name) || (self.reserved_api && name == PAGES_ONLY_RESERVED) {
            return true;
        }

        if self.rules.iter().any(|rule| rule.matches(relative_path, name)) {
            return true;
        }

        self.is_ignored(relative_path)
    }

    /// Whether a file, given by scan-root-relative path, is skipped
    pub fn should_ignore_file(&self, relative_path: &str) -> bool {
        self.is_ignored(relative_path)
    }

    fn is_ignored(&self, relative_path: &str) -> bool {
        self.ignore
            .iter()
            .any(|pattern| pattern.matches_with(relative_path, MATCH_OPTIONS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiRouterConfig, PageRouterConfig};

    fn pages_with(exclude: &[&str], ignore: &[&str]) -> ExclusionFilter {
        let mut settings = PageRouterConfig::default().settings();
        settings.exclude_dirs = exclude.iter().map(|s| s.to_string()).collect();
        settings.ignore_files = ignore.iter().map(|s| s.to_string()).collect();
        ExclusionFilter::for_pages(&settings).unwrap()
    }

    #[test]
    fn test_reserved_names_always_excluded() {
        let filter = pages_with(&[], &[]);
        assert!(filter.should_exclude_dir("components", "components"));
        assert!(filter.should_exclude_dir("blog/components", "components"));
        assert!(filter.should_exclude_dir("node_modules", "node_modules"));
        assert!(!filter.should_exclude_dir("blog", "blog"));
    }

    #[test]
    fn test_api_reserved_for_pages_only() {
        let pages = ExclusionFilter::for_pages(&PageRouterConfig::default().settings()).unwrap();
        let api = ExclusionFilter::for_api(&ApiRouterConfig::default().settings()).unwrap();
        assert!(pages.should_exclude_dir("api", "api"));
        assert!(!api.should_exclude_dir("v1/api", "api"));
        assert!(api.should_exclude_dir("v1/lib", "lib"));
    }

    #[test]
    fn test_name_entry() {
        let filter = pages_with(&["drafts"], &[]);
        assert!(filter.should_exclude_dir("drafts", "drafts"));
        assert!(filter.should_exclude_dir("blog/drafts", "drafts"));
        assert!(!filter.should_exclude_dir("blog/drafts-old", "drafts-old"));
    }

    #[test]
    fn test_relative_path_entry() {
        let filter = pages_with(&["blog/archive"], &[]);
        assert!(filter.should_exclude_dir("blog/archive", "archive"));
        assert!(!filter.should_exclude_dir("news/archive", "archive"));
    }

    #[test]
    fn test_glob_entry_matches_path_or_name() {
        let filter = pages_with(&["**/__tests__", "_*"], &[]);
        assert!(filter.should_exclude_dir("__tests__", "__tests__"));
        assert!(filter.should_exclude_dir("blog/__tests__", "__tests__"));
        assert!(filter.should_exclude_dir("blog/_private", "_private"));
        assert!(!filter.should_exclude_dir("blog/public_posts", "public_posts"));
    }

    #[test]
    fn test_ignore_globs_apply_to_files_and_dirs() {
        let filter = pages_with(&[], &["**/*.test.*", "**/.*", "**/*.d.ts"]);
        assert!(filter.should_ignore_file("page.test.tsx"));
        assert!(filter.should_ignore_file("blog/[slug]/page.test.tsx"));
        assert!(filter.should_ignore_file("types.d.ts"));
        assert!(filter.should_ignore_file(".env"));
        assert!(!filter.should_ignore_file("blog/page.tsx"));
        assert!(filter.should_exclude_dir("blog/.cache", ".cache"));
    }

    #[test]
    fn test_invalid_glob_is_an_error() {
        let mut settings = PageRouterConfig::default().settings();
        settings.ignore_files = vec!["[".to_string()];
        assert!(matches!(
            ExclusionFilter::for_pages(&settings),
            Err(RouterError::InvalidGlob { .. })
        ));
    }
}
