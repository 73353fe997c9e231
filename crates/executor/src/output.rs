//! Output enum for command execution results.
//!
//! Every command produces exactly one output variant. The mapping is
//! deterministic: the same command always produces the same variant, though
//! the values depend on what the database holds.

use serde::{Deserialize, Serialize};
use sqlnav_core::{NodeValue, ParamSpec, Record};

/// Successful command execution results.
///
/// Each [`Command`](crate::Command) variant maps to exactly one `Output`
/// variant, documented on the command.
///
/// # Example
///
/// ```text
/// use sqlnav_executor::{Command, Output};
///
/// match executor.execute(Command::invoke("/", "SELECT 1 AS one"))? {
///     Output::Rows(rows) => println!("{} rows", rows.len()),
///     _ => unreachable!("Invoke always returns Rows"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    // ==================== Primitive Results ====================
    /// No return value
    Unit,

    /// Boolean result (probes, transaction state)
    Bool(bool),

    /// Number of store objects removed
    Removed(u64),

    // ==================== Nodes ====================
    /// A single node
    Item(NodeValue),

    /// Zero or more nodes, in enumeration order
    Items(Vec<NodeValue>),

    /// Child names, in enumeration order
    Names(Vec<String>),

    // ==================== Statements ====================
    /// Rows produced by an invoked statement
    Rows(Vec<Record>),

    /// Inputs a verb accepts
    Parameters(Vec<ParamSpec>),

    // ==================== Transaction ====================
    /// Transaction started
    TxnBegun,

    /// Transaction committed
    TxnCommitted,

    /// Transaction rolled back
    TxnAborted,
}
