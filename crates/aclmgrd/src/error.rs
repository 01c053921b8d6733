//! Error types for ACL reconciliation.
//!
//! All errors implement `std::error::Error` via `thiserror`. Every failure
//! is a deterministic function of the input, so none of them is worth
//! retrying except a facts source that could not be read.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for reconciliation operations.
pub type AclResult<T> = Result<T, AclError>;

/// Errors that can occur while computing an ACL command plan.
#[derive(Debug, Error)]
pub enum AclError {
    /// An entry could not be rendered to a device command.
    #[error("Failed to render entry of ACL '{acl}': {reason}")]
    Render {
        /// The ACL the entry belongs to.
        acl: String,
        /// What was missing or malformed.
        reason: String,
    },

    /// The facts provider could not produce the current state.
    #[error("Failed to gather ACL facts from {source_name}: {message}")]
    Facts {
        /// Where the facts were gathered from.
        source_name: String,
        /// Error message.
        message: String,
    },

    /// Reading an input document failed.
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// An input document is not a valid ACL document.
    #[error("Failed to parse '{}': {message}", path.display())]
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Configuration validation error.
    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig {
        /// The field that failed validation.
        field: String,
        /// Error message.
        message: String,
    },
}

impl AclError {
    /// Creates a rendering error.
    pub fn render(acl: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Render {
            acl: acl.into(),
            reason: reason.into(),
        }
    }

    /// Creates a facts gathering error.
    pub fn facts(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Facts {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error indicates a transient condition
    /// that may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AclError::Facts { .. } | AclError::Io { .. })
    }
}
