// File: src/error.rs
// Purpose: Error type shared by the route compiler

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a generation run.
///
/// Per-file problems never show up here; they are recorded as
/// [`Diagnostic`](crate::Diagnostic)s and the scan keeps going.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("failed to read config file {path:?}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid dynamic parameter pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid glob pattern `{pattern}`")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("{path:?} is not inside scan root {root:?}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("I/O error on {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write artifact {path:?}")]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to (de)serialize artifact {path:?}")]
    Artifact {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl RouterError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RouterError::Io {
            path: path.into(),
            source,
        }
    }

    /// This error's message followed by every underlying cause, `: `-joined
    pub fn display_chain(&self) -> String {
        let mut message = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            message.push_str(": ");
            message.push_str(&err.to_string());
            cause = err.source();
        }
        message
    }
}

pub type Result<T> = std::result::Result<T, RouterError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_display_chain_keeps_the_cause() {
        let err = RouterError::io(
            "app/page.tsx",
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        );
        assert_eq!(err.to_string(), "I/O error on \"app/page.tsx\"");
        assert_eq!(
            err.display_chain(),
            "I/O error on \"app/page.tsx\": permission denied"
        );
    }

    #[test]
    fn test_display_chain_without_cause() {
        let err = RouterError::OutsideRoot {
            path: PathBuf::from("/tmp/x"),
            root: PathBuf::from("/srv/app"),
        };
        assert_eq!(err.display_chain(), err.to_string());
    }
}
