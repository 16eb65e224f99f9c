// File: src/collision.rs
// Purpose: Find URL paths claimed by more than one route file

use crate::diagnostics::Diagnostic;
use crate::route::RouteRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// A URL path produced by several source files
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Collision {
    pub path: String,
    /// Contributing files in scan order; the last one wins the path index
    pub files: Vec<String>,
}

impl Collision {
    pub fn count(&self) -> usize {
        self.files.len()
    }

    /// File whose record ends up in the path-keyed index
    pub fn winner(&self) -> Option<&str> {
        self.files.last().map(String::as_str)
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::Collision {
            path: self.path.clone(),
            files: self.files.clone(),
        }
    }
}

/// Groups records by path and reports every path with more than one file
///
/// Pure; collisions come back sorted by path.
///
/// # Examples
///
/// ```
/// use islet_router::collision::detect;
///
/// assert!(detect(&[]).is_empty());
/// ```
pub fn detect(records: &[RouteRecord]) -> Vec<Collision> {
    records
        .iter()
        .fold(BTreeMap::<&str, Vec<String>>::new(), |mut groups, record| {
            groups
                .entry(record.path.as_str())
                .or_default()
                .push(record.file_path.clone());
            groups
        })
        .into_iter()
        .filter(|(_, files)| files.len() > 1)
        .map(|(path, files)| Collision {
            path: path.to_string(),
            files,
        })
        .collect()
}
