//! Verbs and node capabilities.
//!
//! Every node supports `Get`. Everything else is an optional capability
//! that a node may or may not have; the dispatcher queries for the
//! capability a verb needs and reports `NotSupported` when it is missing.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Operations a caller can request against a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verb {
    /// Read the node itself
    Get,
    /// Enumerate a container's children
    GetChildren,
    /// Create a child (table or row)
    Create,
    /// Remove the node
    Remove,
    /// Update the node
    Set,
    /// Rename the node
    Rename,
    /// Copy the node to another container
    Copy,
    /// Copy then remove
    Move,
    /// Run a statement against the node
    Invoke,
}

impl Verb {
    /// Capabilities a node needs for this verb. `Get` needs none.
    pub fn required_capabilities(self) -> &'static [Capability] {
        match self {
            Verb::Get => &[],
            Verb::GetChildren => &[Capability::Container],
            Verb::Create => &[Capability::Creatable],
            Verb::Remove => &[Capability::Removable],
            Verb::Set => &[Capability::Settable],
            Verb::Rename => &[Capability::Renamable],
            Verb::Copy => &[Capability::Copyable],
            Verb::Move => &[Capability::Copyable, Capability::Removable],
            Verb::Invoke => &[Capability::Invocable],
        }
    }

    /// Stable name used in errors and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "Get",
            Verb::GetChildren => "GetChildren",
            Verb::Create => "Create",
            Verb::Remove => "Remove",
            Verb::Set => "Set",
            Verb::Rename => "Rename",
            Verb::Copy => "Copy",
            Verb::Move => "Move",
            Verb::Invoke => "Invoke",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional behaviours a node may implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Capability {
    /// Has children
    Container,
    /// Accepts new children
    Creatable,
    /// Can be removed
    Removable,
    /// Can be updated
    Settable,
    /// Can be renamed
    Renamable,
    /// Can be copied
    Copyable,
    /// Can run statements
    Invocable,
}

/// Kind of node a handle represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// The database itself
    Root,
    /// One table
    Table,
    /// One row
    Record,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeKind::Root => "Root",
            NodeKind::Table => "Table",
            NodeKind::Record => "Record",
        };
        f.write_str(s)
    }
}
