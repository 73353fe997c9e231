//! Node handles.
//!
//! Every path segment resolves to a node. A node always has a name, a kind
//! and an item; everything else it can do is an optional capability that
//! the dispatcher asks for through the `as_*` accessors. A node that is not
//! a [`Container`] is a leaf.
//!
//! Nodes are created per resolution, borrow the session's connection and
//! hold no resources of their own.

mod record;
mod root;
mod table;

pub use record::RecordNode;
pub use root::RootNode;
pub use table::TableNode;

use sqlnav_core::{Capability, NavResult, NodeKind, NodeValue, ParamSpec, Record, Value};

use crate::context::Context;

/// Owned, type-erased node borrowing a connection for `'c`.
pub type NodeRef<'c> = Box<dyn Node<'c> + 'c>;

/// Sink that receives streamed rows.
pub type RowSink<'s> = dyn FnMut(Record) -> NavResult<()> + 's;

/// A resolved node.
pub trait Node<'c> {
    /// Identity within the parent container.
    fn name(&self) -> String;

    /// Root, table or record.
    fn kind(&self) -> NodeKind;

    /// Row (or catalog row) backing the node.
    fn item(&self) -> Record;

    /// Kind of container this node lives in. Copies may only land in a
    /// container of this kind.
    fn container_kind(&self) -> Option<NodeKind> {
        None
    }

    /// Children, if this node has any.
    fn as_container(&self) -> Option<&dyn Container<'c>> {
        None
    }

    /// Accepts new children.
    fn as_creatable(&self) -> Option<&dyn Creatable<'c>> {
        None
    }

    /// Can be removed.
    fn as_removable(&self) -> Option<&dyn Removable> {
        None
    }

    /// Can be updated.
    fn as_settable(&self) -> Option<&dyn Settable<'c>> {
        None
    }

    /// Can be renamed.
    fn as_renamable(&self) -> Option<&dyn Renamable<'c>> {
        None
    }

    /// Can be copied into another container.
    fn as_copyable(&self) -> Option<&dyn Copyable<'c>> {
        None
    }

    /// Can run statements.
    fn as_invocable(&self) -> Option<&dyn Invocable> {
        None
    }

    /// Supported capabilities, in declaration order.
    fn capabilities(&self) -> Vec<Capability> {
        let mut caps = Vec::new();
        if self.as_container().is_some() {
            caps.push(Capability::Container);
        }
        if self.as_creatable().is_some() {
            caps.push(Capability::Creatable);
        }
        if self.as_removable().is_some() {
            caps.push(Capability::Removable);
        }
        if self.as_settable().is_some() {
            caps.push(Capability::Settable);
        }
        if self.as_renamable().is_some() {
            caps.push(Capability::Renamable);
        }
        if self.as_copyable().is_some() {
            caps.push(Capability::Copyable);
        }
        if self.as_invocable().is_some() {
            caps.push(Capability::Invocable);
        }
        caps
    }

    /// True if the node supports `capability`.
    fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Container => self.as_container().is_some(),
            Capability::Creatable => self.as_creatable().is_some(),
            Capability::Removable => self.as_removable().is_some(),
            Capability::Settable => self.as_settable().is_some(),
            Capability::Renamable => self.as_renamable().is_some(),
            Capability::Copyable => self.as_copyable().is_some(),
            Capability::Invocable => self.as_invocable().is_some(),
        }
    }

    /// Materialized view. The path is left empty for the caller to fill.
    fn value(&self) -> NodeValue {
        NodeValue {
            name: self.name(),
            path: String::new(),
            kind: self.kind(),
            is_container: self.as_container().is_some(),
            capabilities: self.capabilities(),
            item: self.item(),
        }
    }
}

/// A node with children.
pub trait Container<'c> {
    /// Children, re-queried on every call. `filter` is a SQL predicate
    /// applied by the store.
    fn children(&self, filter: Option<&str>) -> NavResult<Vec<NodeRef<'c>>>;

    /// The child named exactly `name`.
    fn child(&self, name: &str) -> NavResult<Option<NodeRef<'c>>> {
        Ok(self.children(None)?.into_iter().find(|c| c.name() == name))
    }

    /// True if there is at least one child.
    fn has_children(&self) -> NavResult<bool> {
        Ok(!self.children(None)?.is_empty())
    }
}

/// A node that accepts new children.
pub trait Creatable<'c> {
    /// Inputs accepted by [`create`](Self::create).
    fn create_parameters(&self) -> NavResult<Vec<ParamSpec>>;

    /// Create a child. `name` is the final path segment when the create
    /// path named a child that does not exist yet.
    fn create(&self, ctx: &Context, name: Option<&str>, value: Option<&Value>) -> NavResult<NodeRef<'c>>;
}

/// A node that can be removed.
pub trait Removable {
    /// Remove the node. Returns the number of store objects removed.
    fn remove(&self, ctx: &Context) -> NavResult<u64>;
}

/// A node that can be updated in place.
pub trait Settable<'c> {
    /// Inputs accepted by [`set`](Self::set).
    fn set_parameters(&self) -> NavResult<Vec<ParamSpec>>;

    /// Apply the update and return the node as it now is.
    fn set(&self, ctx: &Context, value: Option<&Value>) -> NavResult<NodeRef<'c>>;
}

/// A node that can be renamed.
pub trait Renamable<'c> {
    /// Rename and return the node under its new name.
    fn rename(&self, ctx: &Context, new_name: &str) -> NavResult<NodeRef<'c>>;
}

/// A node that can be copied into another container.
pub trait Copyable<'c> {
    /// Copy into `destination`, optionally naming the copy.
    fn copy_to(
        &self,
        ctx: &Context,
        destination: &dyn Node<'c>,
        new_name: Option<&str>,
    ) -> NavResult<NodeRef<'c>>;
}

/// A node that can run arbitrary statements.
pub trait Invocable {
    /// Inputs accepted by [`invoke`](Self::invoke).
    fn invoke_parameters(&self) -> Vec<ParamSpec>;

    /// Run the statement and stream every result row into `sink`.
    fn invoke(&self, ctx: &Context, sink: &mut RowSink<'_>) -> NavResult<()>;
}
