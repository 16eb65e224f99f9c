// File: src/table.rs
// Purpose: Route table artifact: indices, segment tree, JSON persistence

use crate::error::{Result, RouterError};
use crate::route::RouteRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

/// Artifact format version
pub const TABLE_VERSION: &str = "1.0.0";

/// Generation metadata carried in the artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableMeta {
    pub root_dir: String,
    pub generated_at: DateTime<Utc>,
    pub version: String,
}

/// One node of the URL segment tree
///
/// The root node stands for `/`; each child is keyed by the next URL
/// segment (`about`, `:id`, `*`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<RouteRecord>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<String, RouteNode>,
}

impl RouteNode {
    fn insert(&mut self, record: &RouteRecord) {
        let leaf = record
            .segments()
            .fold(self, |node, segment| node.children.entry(segment.to_string()).or_default());
        leaf.route = Some(record.clone());
    }

    /// Node reached by following `path` segment by segment, without wildcards
    pub fn descend(&self, path: &str) -> Option<&RouteNode> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(self, |node, segment| node.children.get(segment))
    }

    /// Records stored at or below this node, depth-first, children in key order
    pub fn records(&self) -> Vec<&RouteRecord> {
        let mut out: Vec<&RouteRecord> = self.route.iter().collect();
        for child in self.children.values() {
            out.extend(child.records());
        }
        out
    }
}

/// Emitted route table: one record set seen through four views
///
/// # Examples
///
/// ```
/// use islet_router::RouteTable;
///
/// let table = RouteTable::emit(Vec::new(), "src/app");
/// assert!(table.is_empty());
/// assert_eq!(table.config.version, "1.0.0");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTable {
    /// Scan order
    pub routes: Vec<RouteRecord>,
    pub route_tree: RouteNode,
    /// Last record in scan order wins on a shared path
    pub routes_by_path: BTreeMap<String, RouteRecord>,
    pub routes_by_file_path: BTreeMap<String, RouteRecord>,
    pub config: TableMeta,
}

impl RouteTable {
    /// Builds every index, stamped with the current time
    pub fn emit(records: Vec<RouteRecord>, root_dir: &str) -> Self {
        Self::emit_at(records, root_dir, Utc::now())
    }

    /// Builds every index with a fixed timestamp
    pub fn emit_at(records: Vec<RouteRecord>, root_dir: &str, generated_at: DateTime<Utc>) -> Self {
        let mut route_tree = RouteNode::default();
        let mut routes_by_path = BTreeMap::new();
        let mut routes_by_file_path = BTreeMap::new();

        for record in &records {
            route_tree.insert(record);
            routes_by_path.insert(record.path.clone(), record.clone());
            routes_by_file_path.insert(record.file_path.clone(), record.clone());
        }

        Self {
            routes: records,
            route_tree,
            routes_by_path,
            routes_by_file_path,
            config: TableMeta {
                root_dir: root_dir.to_string(),
                generated_at,
                version: TABLE_VERSION.to_string(),
            },
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Record registered for an exact URL pattern such as `/users/:id`
    pub fn get(&self, path: &str) -> Option<&RouteRecord> {
        self.routes_by_path.get(path)
    }

    pub fn get_by_file(&self, file_path: &str) -> Option<&RouteRecord> {
        self.routes_by_file_path.get(file_path)
    }

    /// Pretty JSON text of the artifact
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Writes the artifact, creating parent directories as needed
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        write_json(self, path)?;
        info!("Wrote {} route(s) to {}", self.len(), path.display());
        Ok(())
    }

    /// Loads a previously written artifact
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| RouterError::io(path, source))?;
        serde_json::from_str(&text).map_err(|source| RouterError::Artifact {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Pretty-prints `value` to `path`, creating parent directories
pub(crate) fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(|source| RouterError::Artifact {
        path: path.to_path_buf(),
        source,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| RouterError::ArtifactWrite {
            path: path.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, json).map_err(|source| RouterError::ArtifactWrite {
        path: path.to_path_buf(),
        source,
    })
}
