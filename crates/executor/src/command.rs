//! Command enum defining every SQLNav operation.
//!
//! Commands are the instruction set of the navigation layer. Each variant
//! names a verb and a path, plus whatever payload the verb needs.
//!
//! Commands are:
//! - **Self-contained**: All inputs needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON
//! - **Pure data**: No closures or connection handles

use serde::{Deserialize, Serialize};
use sqlnav_core::{Parameters, Value, Verb};

/// A command is a self-contained, serializable operation against a path.
///
/// Paths use `/` or `\` as separators and may carry the store descriptor
/// prefix (`[Data Source=...]`), which is ignored.
///
/// # Command Categories
///
/// | Category | Count | Description |
/// |----------|-------|-------------|
/// | Read | 6 | Get, enumerate and probe nodes |
/// | Write | 7 | Create, remove, update, rename, copy, move, invoke |
/// | Introspection | 1 | Parameter schema of a verb |
/// | Transaction | 4 | Transaction control (session only) |
///
/// # Example
///
/// ```ignore
/// use sqlnav_executor::Command;
/// use sqlnav_core::{Parameters, Value};
///
/// let cmd = Command::Create {
///     path: "/people".into(),
///     value: None,
///     params: Parameters::new().with("name", "Ada"),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    // ==================== Read (6) ====================
    /// Read the node at a path. With a filter or a wildcard, the nodes it
    /// selects.
    /// Returns: `Output::Items`
    Get {
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filter: Option<String>,
    },

    /// Enumerate a container's children, optionally depth-first through
    /// every descendant. The filter narrows the first level only.
    /// Returns: `Output::Items`
    GetChildren {
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filter: Option<String>,
        #[serde(default)]
        recurse: bool,
    },

    /// Names of a container's children.
    /// Returns: `Output::Names`
    GetChildNames {
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filter: Option<String>,
    },

    /// True if the path resolves.
    /// Returns: `Output::Bool`
    Exists { path: String },

    /// True if the node at the path has children capability.
    /// Returns: `Output::Bool`
    IsContainer { path: String },

    /// True if the node at the path currently has at least one child.
    /// Returns: `Output::Bool`
    HasChildren { path: String },

    // ==================== Write (7) ====================
    /// Create a table under the root or a row under a table. When the path
    /// names a child that does not exist yet, the parent creates it under
    /// that name.
    /// Returns: `Output::Item`
    Create {
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
        #[serde(default)]
        params: Parameters,
    },

    /// Remove the selected nodes.
    /// Returns: `Output::Removed`
    Remove {
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filter: Option<String>,
        #[serde(default)]
        recurse: bool,
    },

    /// Update the selected nodes. Only the columns supplied are written.
    /// Returns: `Output::Items`
    Set {
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filter: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Value>,
        #[serde(default)]
        params: Parameters,
    },

    /// Rename the node.
    /// Returns: `Output::Item`
    Rename { path: String, new_name: String },

    /// Copy the selected nodes into a destination container.
    /// Returns: `Output::Items`
    Copy {
        path: String,
        destination: String,
        #[serde(default)]
        recurse: bool,
    },

    /// Copy then remove the source.
    /// Returns: `Output::Items`
    Move { path: String, destination: String },

    /// Run a statement at the node and collect its rows.
    /// Returns: `Output::Rows`
    Invoke {
        path: String,
        #[serde(default)]
        params: Parameters,
    },

    // ==================== Introspection (1) ====================
    /// Inputs a verb accepts at the path.
    /// Returns: `Output::Parameters`
    Parameters { path: String, verb: Verb },

    // ==================== Transaction (4) ====================
    /// Begin a transaction.
    /// Returns: `Output::TxnBegun`
    TxnBegin,

    /// Commit the active transaction.
    /// Returns: `Output::TxnCommitted`
    TxnCommit,

    /// Roll back the active transaction.
    /// Returns: `Output::TxnAborted`
    TxnRollback,

    /// True if a transaction is active.
    /// Returns: `Output::Bool`
    TxnIsActive,
}

impl Command {
    /// Read the node at `path`.
    pub fn get(path: impl Into<String>) -> Self {
        Command::Get {
            path: path.into(),
            filter: None,
        }
    }

    /// Run `sql` at `path`.
    pub fn invoke(path: impl Into<String>, sql: impl Into<String>) -> Self {
        Command::Invoke {
            path: path.into(),
            params: Parameters::new().with("sql", sql.into()),
        }
    }

    /// Verb the command dispatches, if it dispatches one.
    pub fn verb(&self) -> Option<Verb> {
        match self {
            Command::Get { .. }
            | Command::Exists { .. }
            | Command::IsContainer { .. }
            | Command::HasChildren { .. } => Some(Verb::Get),
            Command::GetChildren { .. } | Command::GetChildNames { .. } => Some(Verb::GetChildren),
            Command::Create { .. } => Some(Verb::Create),
            Command::Remove { .. } => Some(Verb::Remove),
            Command::Set { .. } => Some(Verb::Set),
            Command::Rename { .. } => Some(Verb::Rename),
            Command::Copy { .. } => Some(Verb::Copy),
            Command::Move { .. } => Some(Verb::Move),
            Command::Invoke { .. } => Some(Verb::Invoke),
            Command::Parameters { .. }
            | Command::TxnBegin
            | Command::TxnCommit
            | Command::TxnRollback
            | Command::TxnIsActive => None,
        }
    }

    /// True for transaction control commands.
    pub fn is_transaction_control(&self) -> bool {
        matches!(
            self,
            Command::TxnBegin | Command::TxnCommit | Command::TxnRollback | Command::TxnIsActive
        )
    }

    /// Returns the variant name as a static string (for logging).
    pub fn name(&self) -> &'static str {
        match self {
            Command::Get { .. } => "Get",
            Command::GetChildren { .. } => "GetChildren",
            Command::GetChildNames { .. } => "GetChildNames",
            Command::Exists { .. } => "Exists",
            Command::IsContainer { .. } => "IsContainer",
            Command::HasChildren { .. } => "HasChildren",
            Command::Create { .. } => "Create",
            Command::Remove { .. } => "Remove",
            Command::Set { .. } => "Set",
            Command::Rename { .. } => "Rename",
            Command::Copy { .. } => "Copy",
            Command::Move { .. } => "Move",
            Command::Invoke { .. } => "Invoke",
            Command::Parameters { .. } => "Parameters",
            Command::TxnBegin => "TxnBegin",
            Command::TxnCommit => "TxnCommit",
            Command::TxnRollback => "TxnRollback",
            Command::TxnIsActive => "TxnIsActive",
        }
    }
}
