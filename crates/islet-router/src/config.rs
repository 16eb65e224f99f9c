// File: src/config.rs
// Purpose: Configuration parsing from islet.toml

use crate::error::{Result, RouterError};
use crate::exclude::ExclusionFilter;
use crate::route::pattern::SegmentParser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default file name looked up by [`Config::load_default`]
pub const DEFAULT_CONFIG_FILE: &str = "islet.toml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub routes: PageRouterConfig,

    #[serde(default)]
    pub api: ApiRouterConfig,

    #[serde(default)]
    pub islands: IslandsConfig,
}

/// Log verbosity for generation runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    /// Maximum tracing level to emit, `None` for silent
    pub fn to_level(self) -> Option<tracing::Level> {
        match self {
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "silent" | "off" => Ok(LogLevel::Silent),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// Page route scanner configuration (`[routes]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRouterConfig {
    /// Directory scanned for page routes (default: "src/app")
    #[serde(default = "default_pages_root")]
    pub root_dir: String,

    /// Sub-directories of `root_dir` to scan instead of the whole root
    #[serde(default)]
    pub route_dirs: Vec<String>,

    /// Directory names, relative paths or globs to skip
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    #[serde(default = "default_page_files")]
    pub page_file_names: Vec<String>,

    #[serde(default = "default_layout_files")]
    pub layout_file_names: Vec<String>,

    #[serde(default = "default_loading_files")]
    pub loading_file_names: Vec<String>,

    #[serde(default = "default_error_files")]
    pub error_file_names: Vec<String>,

    #[serde(default = "default_dynamic_param_pattern")]
    pub dynamic_param_pattern: String,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Globs (relative to `root_dir`) for files and directories to ignore
    #[serde(default = "default_ignore_files")]
    pub ignore_files: Vec<String>,

    #[serde(default)]
    pub log_level: LogLevel,

    /// Where the generated route table is written
    #[serde(default = "default_pages_output")]
    pub output: String,

    /// Component import paths are expressed relative to this directory
    #[serde(default = "default_import_base")]
    pub import_base: String,
}

/// API route scanner configuration (`[api]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiRouterConfig {
    /// Directory scanned for API handlers (default: "src/app/api")
    #[serde(default = "default_api_root")]
    pub root_dir: String,

    #[serde(default)]
    pub route_dirs: Vec<String>,

    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    #[serde(default = "default_api_files")]
    pub api_file_names: Vec<String>,

    #[serde(default = "default_dynamic_param_pattern")]
    pub dynamic_param_pattern: String,

    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default = "default_ignore_files")]
    pub ignore_files: Vec<String>,

    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default = "default_api_output")]
    pub output: String,

    #[serde(default = "default_import_base")]
    pub import_base: String,
}

/// Island registry configuration (`[islands]`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IslandsConfig {
    #[serde(default = "default_islands_dir")]
    pub dir: String,

    /// File extensions treated as island components
    #[serde(default = "default_island_extensions")]
    pub extensions: Vec<String>,

    #[serde(default = "default_islands_output")]
    pub output: String,

    #[serde(default = "default_import_base")]
    pub import_base: String,
}

/// Settings shared by the page and API scanners, resolved to paths
#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub root_dir: PathBuf,
    pub route_dirs: Vec<String>,
    pub exclude_dirs: Vec<String>,
    pub ignore_files: Vec<String>,
    pub dynamic_param_pattern: String,
    pub max_depth: usize,
    pub import_base: PathBuf,
}

// Default values
fn default_pages_root() -> String {
    "src/app".to_string()
}

fn default_api_root() -> String {
    "src/app/api".to_string()
}

fn default_islands_dir() -> String {
    "src/islands".to_string()
}

fn default_import_base() -> String {
    "src".to_string()
}

fn default_pages_output() -> String {
    "src/routes.generated.json".to_string()
}

fn default_api_output() -> String {
    "src/api.generated.json".to_string()
}

fn default_islands_output() -> String {
    "src/islands.generated.json".to_string()
}

fn default_exclude_dirs() -> Vec<String> {
    [
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
        "**/*.test.*",
        "**/*.spec.*",
        "**/__tests__",
        "**/__mocks__",
        "dist",
        "build",
        "node_modules",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn convention_names(stem: &str) -> Vec<String> {
    ["tsx", "jsx", "ts", "js"]
        .iter()
        .map(|ext| format!("{}.{}", stem, ext))
        .collect()
}

fn default_page_files() -> Vec<String> {
    convention_names("page")
}

fn default_layout_files() -> Vec<String> {
    convention_names("layout")
}

fn default_loading_files() -> Vec<String> {
    convention_names("loading")
}

fn default_error_files() -> Vec<String> {
    convention_names("error")
}

fn default_api_files() -> Vec<String> {
    ["route.ts", "route.js", "route.tsx", "route.jsx"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_dynamic_param_pattern() -> String {
    crate::route::pattern::DEFAULT_DYNAMIC_PARAM_PATTERN.to_string()
}

fn default_max_depth() -> usize {
    10
}

fn default_ignore_files() -> Vec<String> {
    [
        "**/*.d.ts",
        "**/*.test.*",
        "**/*.spec.*",
        "**/.*",
        "**/node_modules/**",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_island_extensions() -> Vec<String> {
    vec!["tsx".to_string()]
}

// Default implementations
impl Default for PageRouterConfig {
    fn default() -> Self {
        Self {
            root_dir: default_pages_root(),
            route_dirs: Vec::new(),
            exclude_dirs: default_exclude_dirs(),
            page_file_names: default_page_files(),
            layout_file_names: default_layout_files(),
            loading_file_names: default_loading_files(),
            error_file_names: default_error_files(),
            dynamic_param_pattern: default_dynamic_param_pattern(),
            max_depth: default_max_depth(),
            ignore_files: default_ignore_files(),
            log_level: LogLevel::default(),
            output: default_pages_output(),
            import_base: default_import_base(),
        }
    }
}

impl Default for ApiRouterConfig {
    fn default() -> Self {
        Self {
            root_dir: default_api_root(),
            route_dirs: Vec::new(),
            exclude_dirs: default_exclude_dirs(),
            api_file_names: default_api_files(),
            dynamic_param_pattern: default_dynamic_param_pattern(),
            max_depth: default_max_depth(),
            ignore_files: default_ignore_files(),
            log_level: LogLevel::default(),
            output: default_api_output(),
            import_base: default_import_base(),
        }
    }
}

impl Default for IslandsConfig {
    fn default() -> Self {
        Self {
            dir: default_islands_dir(),
            extensions: default_island_extensions(),
            output: default_islands_output(),
            import_base: default_import_base(),
        }
    }
}

impl PageRouterConfig {
    /// Same config rooted at `root`; output and import base stay relative
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root_dir = root.into();
        self
    }

    pub fn settings(&self) -> ScanSettings {
        ScanSettings {
            root_dir: PathBuf::from(&self.root_dir),
            route_dirs: self.route_dirs.clone(),
            exclude_dirs: self.exclude_dirs.clone(),
            ignore_files: self.ignore_files.clone(),
            dynamic_param_pattern: self.dynamic_param_pattern.clone(),
            max_depth: self.max_depth,
            import_base: PathBuf::from(&self.import_base),
        }
    }
}

impl ApiRouterConfig {
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root_dir = root.into();
        self
    }

    pub fn settings(&self) -> ScanSettings {
        ScanSettings {
            root_dir: PathBuf::from(&self.root_dir),
            route_dirs: self.route_dirs.clone(),
            exclude_dirs: self.exclude_dirs.clone(),
            ignore_files: self.ignore_files.clone(),
            dynamic_param_pattern: self.dynamic_param_pattern.clone(),
            max_depth: self.max_depth,
            import_base: PathBuf::from(&self.import_base),
        }
    }
}

impl ScanSettings {
    /// Directories to walk: each `route_dirs` entry under the root, or the root itself
    pub fn scan_dirs(&self) -> Vec<PathBuf> {
        if self.route_dirs.is_empty() {
            vec![self.root_dir.clone()]
        } else {
            self.route_dirs
                .iter()
                .map(|dir| self.root_dir.join(dir))
                .collect()
        }
    }
}

impl Config {
    /// Load configuration from islet.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| RouterError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        // If file is empty, return default config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content).map_err(|source| RouterError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default path (./islet.toml)
    pub fn load_default() -> Result<Self> {
        Self::load(DEFAULT_CONFIG_FILE)
    }

    /// Compiles every pattern once so a bad regex or glob fails the run up front
    pub fn validate(&self) -> Result<()> {
        SegmentParser::new(&self.routes.dynamic_param_pattern)?;
        SegmentParser::new(&self.api.dynamic_param_pattern)?;
        ExclusionFilter::for_pages(&self.routes.settings())?;
        ExclusionFilter::for_api(&self.api.settings())?;
        Ok(())
    }
}
