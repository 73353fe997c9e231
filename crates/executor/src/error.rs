//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//! - **Per call**: No error leaves the session or the drive unusable

use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Resolution | `NotFound` | Path does not resolve |
/// | Capability | `NotSupported`, `InvalidDestination` | Node cannot do what was asked |
/// | Validation | `Usage` | Bad input, caught before any statement runs |
/// | Schema | `SchemaViolation` | Table shape cannot support the operation |
/// | Store | `Store` | Statement failed in SQLite |
/// | Transaction | `TransactionNotActive`, `TransactionAlreadyActive`, `TransactionFailed` | Transaction state |
/// | System | `Config`, `Internal` | Configuration and infrastructure errors |
///
/// # Example
///
/// ```ignore
/// use sqlnav_executor::{Command, Error};
///
/// match executor.execute(Command::get("/people/42")) {
///     Ok(output) => { /* handle success */ }
///     Err(Error::NotFound { path }) => {
///         println!("Nothing at '{}'", path);
///     }
///     Err(e) => {
///         println!("Error: {}", e);
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    // ==================== Resolution ====================
    /// Path did not resolve
    #[error("path not found: {path}")]
    NotFound { path: String },

    // ==================== Capability ====================
    /// The node has no capability for the verb
    #[error("{verb} is not supported at {node} node '{path}'")]
    NotSupported {
        verb: String,
        node: String,
        path: String,
    },

    /// Copy or move target is not a container of the source's kind
    #[error("the item at [{origin}] cannot be copied to [{destination}] because the destination contains different types of items")]
    InvalidDestination { origin: String, destination: String },

    // ==================== Validation ====================
    /// Bad or missing input
    #[error("usage error: {reason}")]
    Usage { reason: String },

    // ==================== Schema ====================
    /// Table schema cannot support the operation
    #[error("schema violation on table '{table}': {reason}")]
    SchemaViolation { table: String, reason: String },

    // ==================== Store ====================
    /// Statement execution failed
    #[error("store error: {reason}")]
    Store { reason: String },

    // ==================== Transaction ====================
    /// No transaction is active
    #[error("no transaction is active")]
    TransactionNotActive,

    /// A transaction is already active
    #[error("a transaction is already active")]
    TransactionAlreadyActive,

    /// Transaction could not be started or completed
    #[error("transaction failed: {reason}")]
    TransactionFailed { reason: String },

    // ==================== System ====================
    /// Invalid configuration
    #[error("config error: {reason}")]
    Config { reason: String },

    /// Internal error (bug or unexpected state)
    #[error("internal error: {reason}")]
    Internal { reason: String },
}

impl Error {
    /// True for `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
