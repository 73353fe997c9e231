//! Error types for SQLNav
//!
//! This module defines the internal error type shared by the engine and
//! executor crates. We use `thiserror` for automatic `Display` and `Error`
//! trait implementations.
//!
//! Every variant is a per-call failure: none of them poisons the session
//! or the drive.

use thiserror::Error;

/// Result type alias for SQLNav operations
pub type NavResult<T> = std::result::Result<T, NavError>;

/// Error types for navigation and store operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavError {
    /// The resolved node has no capability for the requested verb
    #[error("{verb} is not supported at {node} node '{path}'")]
    NotSupported {
        /// Verb that was requested
        verb: String,
        /// Kind of node that rejected it
        node: String,
        /// Path of the node
        path: String,
    },

    /// A path did not resolve to any node
    #[error("path not found: {path}")]
    NotFound {
        /// Path that failed to resolve
        path: String,
    },

    /// Table schema cannot support a record-level operation
    #[error("schema violation on table '{table}': {reason}")]
    SchemaViolation {
        /// Table whose schema is unusable
        table: String,
        /// What is wrong with it
        reason: String,
    },

    /// The underlying statement failed
    #[error("store error: {reason}")]
    Store {
        /// Message from the SQL engine
        reason: String,
    },

    /// Malformed verb payload or parameters
    #[error("usage error: {reason}")]
    Usage {
        /// Explanation for the caller
        reason: String,
    },

    /// Copy or move target is not a container of the right kind
    #[error("the item at [{origin}] cannot be copied to [{destination}] because the destination contains different types of items")]
    InvalidDestination {
        /// Path of the item being copied
        origin: String,
        /// Destination path
        destination: String,
    },

    /// Transaction lifecycle misuse
    #[error("transaction error: {reason}")]
    Transaction {
        /// What went wrong
        reason: String,
    },

    /// Invalid drive configuration
    #[error("config error: {reason}")]
    Config {
        /// What is wrong with the configuration
        reason: String,
    },

    /// Bug or invariant violation
    #[error("internal error: {reason}")]
    Internal {
        /// Description of the failure
        reason: String,
    },
}

impl NavError {
    /// Build a `NotSupported` error.
    pub fn not_supported(verb: impl ToString, node: impl ToString, path: impl ToString) -> Self {
        NavError::NotSupported {
            verb: verb.to_string(),
            node: node.to_string(),
            path: path.to_string(),
        }
    }

    /// Build a `NotFound` error.
    pub fn not_found(path: impl ToString) -> Self {
        NavError::NotFound {
            path: path.to_string(),
        }
    }

    /// Build a `SchemaViolation` error.
    pub fn schema(table: impl Into<String>, reason: impl Into<String>) -> Self {
        NavError::SchemaViolation {
            table: table.into(),
            reason: reason.into(),
        }
    }

    /// Build a `Store` error.
    pub fn store(reason: impl ToString) -> Self {
        NavError::Store {
            reason: reason.to_string(),
        }
    }

    /// Build a `Usage` error.
    pub fn usage(reason: impl Into<String>) -> Self {
        NavError::Usage {
            reason: reason.into(),
        }
    }

    /// Build a `Transaction` error.
    pub fn transaction(reason: impl Into<String>) -> Self {
        NavError::Transaction {
            reason: reason.into(),
        }
    }

    /// Build a `Config` error.
    pub fn config(reason: impl Into<String>) -> Self {
        NavError::Config {
            reason: reason.into(),
        }
    }

    /// Build an `Internal` error.
    pub fn internal(reason: impl Into<String>) -> Self {
        NavError::Internal {
            reason: reason.into(),
        }
    }

    /// Build an `InvalidDestination` error.
    pub fn invalid_destination(origin: impl ToString, destination: impl ToString) -> Self {
        NavError::InvalidDestination {
            origin: origin.to_string(),
            destination: destination.to_string(),
        }
    }

    /// True for resolution failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, NavError::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_not_supported() {
        let err = NavError::not_supported("Set", "Table", "\\people");
        let msg = err.to_string();
        assert!(msg.contains("Set"));
        assert!(msg.contains("Table"));
        assert!(msg.contains("\\people"));
    }

    #[test]
    fn test_error_display_schema() {
        let err = NavError::schema("logs", "no primary key column");
        let msg = err.to_string();
        assert!(msg.contains("schema violation"));
        assert!(msg.contains("logs"));
    }

    #[test]
    fn test_error_display_usage() {
        let err = NavError::usage("missing table definition");
        assert!(err.to_string().contains("usage error"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(NavError::not_found("\\x").is_not_found());
        assert!(!NavError::store("disk I/O error").is_not_found());
    }
}
