// File: src/diagnostics.rs
// Purpose: Non-fatal findings collected during a generation run

use serde::Serialize;
use std::fmt;
use tracing::{debug, error, warn};

/// Something worth telling the user that does not stop generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Diagnostic {
    /// A configured scan directory does not exist
    MissingScanDir { dir: String },
    /// A directory entry could not be listed or inspected
    UnreadableEntry { path: String, reason: String },
    /// Bracketed directory name that is not a valid parameter
    MalformedSegment { file: String, segment: String },
    /// Catch-all directory with more segments below it; the route cannot match
    MisplacedCatchAll { file: String, segment: String },
    /// Recursion stopped at the configured depth
    DepthLimit { dir: String, max_depth: usize },
    /// A convention file could not be turned into a route
    ResolveFailed { file: String, reason: String },
    /// API route file exporting no recognized verb
    NoHandlers { file: String },
    /// Page exports `metadata` that is not plain data
    UnparsableMetadata { file: String, reason: String },
    /// Several files produce the same URL path
    Collision { path: String, files: Vec<String> },
    /// Several island components map to the same registry key
    DuplicateIsland { key: String, files: Vec<String> },
}

impl Diagnostic {
    /// Warnings surface at the default log level; the rest only with `debug`
    pub fn is_warning(&self) -> bool {
        !matches!(self, Diagnostic::UnparsableMetadata { .. })
    }

    /// Emits the diagnostic as a tracing event
    pub fn log(&self) {
        match self {
            Diagnostic::ResolveFailed { .. } => error!("{}", self),
            _ if self.is_warning() => warn!("{}", self),
            _ => debug!("{}", self),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingScanDir { dir } => {
                write!(f, "scan directory does not exist: {}", dir)
            }
            Diagnostic::UnreadableEntry { path, reason } => {
                write!(f, "cannot read {}: {}", path, reason)
            }
            Diagnostic::MalformedSegment { file, segment } => write!(
                f,
                "segment `{}` in {} looks like a parameter but is not valid; treated as static",
                segment, file
            ),
            Diagnostic::MisplacedCatchAll { file, segment } => write!(
                f,
                "catch-all `{}` in {} is followed by more segments; the route never matches",
                segment, file
            ),
            Diagnostic::DepthLimit { dir, max_depth } => write!(
                f,
                "maximum scan depth {} reached, not descending into {}",
                max_depth, dir
            ),
            Diagnostic::ResolveFailed { file, reason } => {
                write!(f, "skipping {}: {}", file, reason)
            }
            Diagnostic::NoHandlers { file } => {
                write!(f, "API route {} exports no HTTP method handlers", file)
            }
            Diagnostic::UnparsableMetadata { file, reason } => {
                write!(f, "ignoring metadata in {}: {}", file, reason)
            }
            Diagnostic::Collision { path, files } => {
                write!(f, "route collision on {}: {}", path, files.join(", "))
            }
            Diagnostic::DuplicateIsland { key, files } => {
                write!(f, "island key {} is claimed by {}", key, files.join(", "))
            }
        }
    }
}

/// Ordered collection of diagnostics; each one is logged as it is recorded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        diagnostic.log();
        self.items.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_warning()).count()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
