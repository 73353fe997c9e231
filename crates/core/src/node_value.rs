//! The materialized view of a node.

use serde::{Deserialize, Serialize};

use crate::{Capability, NavPath, NodeKind, Record};

/// What a verb hands back for a node: its identity, shape and item.
///
/// `path` is filled in by whoever knows where the node was reached from;
/// nodes themselves only know their own name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeValue {
    /// Node identity within its container
    pub name: String,
    /// Canonical path of the node
    pub path: String,
    /// Root, table or record
    pub kind: NodeKind,
    /// True if the node has children
    pub is_container: bool,
    /// Capabilities the node supports, sorted
    pub capabilities: Vec<Capability>,
    /// Row or schema row backing the node
    pub item: Record,
}

impl NodeValue {
    /// Set the path this value was reached at.
    pub fn at(mut self, path: &NavPath) -> Self {
        self.path = path.to_string();
        self
    }

    /// True if the node supports `capability`.
    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}
