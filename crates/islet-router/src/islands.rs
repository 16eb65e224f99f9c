// File: src/islands.rs
// Purpose: Registry of interactive island components keyed for data-island lookup

use crate::config::IslandsConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::Result;
use crate::path::{import_path, to_slash};
use crate::table::{write_json, TableMeta, TABLE_VERSION};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;
use walkdir::WalkDir;

/// One island component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Island {
    /// Registry key, e.g. `dark-mode-toggle` or `forms/date-picker`
    pub key: String,
    /// Component name as written in the file name: `DarkModeToggle`
    pub component: String,
    pub import_path: String,
    pub file_path: String,
}

/// Generated island registry artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IslandRegistry {
    pub islands: Vec<Island>,
    pub config: TableMeta,
}

impl IslandRegistry {
    pub fn len(&self) -> usize {
        self.islands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.islands.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Island> {
        self.islands.iter().find(|island| island.key == key)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        write_json(self, path)?;
        info!("Wrote {} island(s) to {}", self.len(), path.display());
        Ok(())
    }
}

/// Registry plus what went wrong while building it
#[derive(Debug, Clone)]
pub struct IslandScan {
    pub registry: IslandRegistry,
    pub diagnostics: Diagnostics,
}

/// `DarkModeToggle` → `dark-mode-toggle`
///
/// Every ASCII capital starts a new word.
///
/// # Examples
///
/// ```
/// use islet_router::islands::kebab_case;
///
/// assert_eq!(kebab_case("DarkModeToggle"), "dark-mode-toggle");
/// assert_eq!(kebab_case("counter"), "counter");
/// ```
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
        }
        out.extend(c.to_lowercase());
    }
    if out.starts_with('-') {
        out.remove(0);
    }
    out
}

fn is_island_file(name: &str, extensions: &[String]) -> bool {
    let has_extension = Path::new(name)
        .extension()
        .map(|ext| extensions.iter().any(|allowed| ext == allowed.as_str()))
        .unwrap_or(false);
    has_extension && !name.starts_with('_') && !name.contains(".test.")
}

/// Walks the islands directory and builds the registry
pub fn scan_islands(config: &IslandsConfig) -> IslandScan {
    scan_islands_at(config, Utc::now())
}

/// Same as [`scan_islands`] with a fixed timestamp
pub fn scan_islands_at(config: &IslandsConfig, generated_at: DateTime<Utc>) -> IslandScan {
    let dir = PathBuf::from(&config.dir);
    let base = PathBuf::from(&config.import_base);
    let mut diagnostics = Diagnostics::new();
    let mut islands: Vec<Island> = Vec::new();
    let mut claimed: BTreeMap<String, Vec<String>> = BTreeMap::new();

    if !dir.is_dir() {
        diagnostics.push(Diagnostic::MissingScanDir {
            dir: to_slash(&dir),
        });
    } else {
        for entry in WalkDir::new(&dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    diagnostics.push(Diagnostic::UnreadableEntry {
                        path: err
                            .path()
                            .map(to_slash)
                            .unwrap_or_else(|| to_slash(&dir)),
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            let name = entry.file_name().to_string_lossy();
            if !entry.file_type().is_file() || !is_island_file(&name, &config.extensions) {
                continue;
            }

            let path = entry.path();
            let Some(component) = path.file_stem().map(|s| s.to_string_lossy().into_owned())
            else {
                continue;
            };
            let key = island_key(&dir, path, &component);
            let file_path = to_slash(path);

            let files = claimed.entry(key.clone()).or_default();
            files.push(file_path.clone());
            if files.len() > 1 {
                continue;
            }

            islands.push(Island {
                key,
                component,
                import_path: import_path(path, &base),
                file_path,
            });
        }
    }

    for (key, files) in claimed.into_iter().filter(|(_, files)| files.len() > 1) {
        diagnostics.push(Diagnostic::DuplicateIsland { key, files });
    }

    info!("Found {} island(s) in {}", islands.len(), dir.display());
    IslandScan {
        registry: IslandRegistry {
            islands,
            config: TableMeta {
                root_dir: config.dir.clone(),
                generated_at,
                version: TABLE_VERSION.to_string(),
            },
        },
        diagnostics,
    }
}

/// Kebab-cased sub-directory prefix plus the kebab-cased component name
fn island_key(root: &Path, file: &Path, component: &str) -> String {
    let prefix = file
        .parent()
        .and_then(|parent| parent.strip_prefix(root).ok())
        .map(to_slash)
        .unwrap_or_default();

    let mut parts: Vec<String> = prefix
        .split('/')
        .filter(|part| !part.is_empty())
        .map(kebab_case)
        .collect();
    parts.push(kebab_case(component));
    parts.join("/")
}
