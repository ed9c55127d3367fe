//! Errors raised while resolving or reading a schema source.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of a schema source, either while resolving the identifier or while
/// reading from the resolved origin.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("malformed source identifier '{identifier}': {reason}")]
    InvalidIdentifier { identifier: String, reason: String },

    #[error("unsupported source scheme '{scheme}'")]
    UnsupportedScheme { scheme: String },

    #[error("missing required parameter '{name}' for {scheme} source")]
    MissingParameter {
        scheme: &'static str,
        name: &'static str,
    },

    #[error("invalid parameter '{name}' for {scheme} source: {reason}")]
    InvalidParameter {
        scheme: &'static str,
        name: String,
        reason: String,
    },

    #[error("file not found or not readable: {}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {what}")]
    Io {
        what: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("failed to connect to {target}: {message}")]
    ConnectionFailure { target: String, message: String },

    #[error("failed to introspect {target}: {message}")]
    IntrospectionFailure { target: String, message: String },

    #[error("failed to open repository {}: {message}", path.display())]
    RepositoryOpen { path: PathBuf, message: String },

    #[error("repository error in {}: {message}", path.display())]
    Repository { path: PathBuf, message: String },

    #[error("failed to resolve '{commitish}' to a commit: {message}")]
    RefNotFound { commitish: String, message: String },

    #[error("path '{path}' not found in commit {commit}")]
    PathNotFound { path: String, commit: String },

    #[error("path '{path}' in commit {commit} is not a file")]
    NotABlob { path: String, commit: String },
}

impl SourceError {
    /// True for errors raised while resolving the identifier, before any I/O.
    pub fn is_construction(&self) -> bool {
        matches!(
            self,
            Self::InvalidIdentifier { .. }
                | Self::UnsupportedScheme { .. }
                | Self::MissingParameter { .. }
                | Self::InvalidParameter { .. }
        )
    }

    pub(crate) fn invalid(identifier: &str, reason: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            identifier: identifier.to_string(),
            reason: reason.into(),
        }
    }
}
