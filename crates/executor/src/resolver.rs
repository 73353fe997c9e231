//! Path resolution.
//!
//! Resolution always starts at the root and walks one segment at a time:
//! the current node must be a container with a child whose name equals the
//! segment exactly. Any miss fails the whole path with `NotFound`.

use sqlnav_core::{wildcard_match, NavError, NavPath, NavResult};
use sqlnav_engine::Connection;
use tracing::trace;

use crate::node::{NodeRef, RootNode};

/// A node together with the path it was reached at.
pub struct Target<'c> {
    /// Canonical path of the node
    pub path: NavPath,
    /// The node itself
    pub node: NodeRef<'c>,
}

impl<'c> Target<'c> {
    /// Pair a node with its path.
    pub fn new(path: NavPath, node: NodeRef<'c>) -> Self {
        Self { path, node }
    }
}

/// Resolves paths against one connection.
pub struct Resolver<'c> {
    conn: &'c Connection,
    data_source: String,
}

impl<'c> Resolver<'c> {
    /// Resolver over `conn`; `data_source` names the root.
    pub fn new(conn: &'c Connection, data_source: impl Into<String>) -> Self {
        Self {
            conn,
            data_source: data_source.into(),
        }
    }

    /// A fresh root node.
    pub fn root(&self) -> NodeRef<'c> {
        Box::new(RootNode::new(self.conn, self.data_source.clone()))
    }

    /// The chain of nodes from the root down to `path`.
    ///
    /// The bare root always resolves to a one-element chain.
    pub fn resolve(&self, path: &NavPath) -> NavResult<Vec<NodeRef<'c>>> {
        let mut chain = Vec::with_capacity(path.depth() + 1);
        let mut current = self.root();
        for segment in path.segments() {
            let next = match current.as_container() {
                Some(container) => container.child(segment)?,
                None => None,
            };
            let next = next.ok_or_else(|| NavError::not_found(path))?;
            trace!(target: "sqlnav::dispatch", segment = %segment, "Resolved segment");
            chain.push(std::mem::replace(&mut current, next));
        }
        chain.push(current);
        Ok(chain)
    }

    /// The node at `path`.
    pub fn resolve_node(&self, path: &NavPath) -> NavResult<NodeRef<'c>> {
        self.resolve(path)?
            .pop()
            .ok_or_else(|| NavError::internal("resolution produced an empty chain"))
    }

    /// The nodes a verb applies to.
    ///
    /// A wildcard final segment selects the parent's children whose names
    /// match it. Otherwise a filter selects the target's children that
    /// satisfy it. Without either, the target itself.
    pub fn resolve_targets(&self, path: &NavPath, filter: Option<&str>) -> NavResult<Vec<Target<'c>>> {
        let filter = filter.filter(|f| !f.trim().is_empty());

        if path.has_wildcard() {
            let (parent_path, pattern) = match (path.parent(), path.child_name()) {
                (Some(parent), Some(pattern)) => (parent, pattern),
                _ => return Err(NavError::not_found(path)),
            };
            let parent = self.resolve_node(&parent_path)?;
            let container = parent.as_container().ok_or_else(|| NavError::not_found(path))?;
            return Ok(container
                .children(filter)?
                .into_iter()
                .filter(|child| wildcard_match(pattern, &child.name()))
                .map(|child| Target::new(parent_path.join(&child.name()), child))
                .collect());
        }

        let node = self.resolve_node(path)?;
        match filter {
            Some(filter) => {
                let container = node.as_container().ok_or_else(|| {
                    NavError::usage(format!("a filter needs a container, but {} is a leaf", path))
                })?;
                Ok(container
                    .children(Some(filter))?
                    .into_iter()
                    .map(|child| Target::new(path.join(&child.name()), child))
                    .collect())
            }
            None => Ok(vec![Target::new(path.clone(), node)]),
        }
    }

    /// Resolve `path`, or its parent when `path` does not exist yet.
    ///
    /// Returns the resolved target and, in the parent case, the final
    /// segment as the name of the child to create.
    pub fn resolve_or_parent(&self, path: &NavPath) -> NavResult<(Target<'c>, Option<String>)> {
        match self.resolve_node(path) {
            Ok(node) => Ok((Target::new(path.clone(), node), None)),
            Err(e) if e.is_not_found() => {
                let (parent_path, name) = match (path.parent(), path.child_name()) {
                    (Some(parent), Some(name)) => (parent, name.to_string()),
                    _ => return Err(e),
                };
                let parent = self.resolve_node(&parent_path)?;
                Ok((Target::new(parent_path, parent), Some(name)))
            }
            Err(e) => Err(e),
        }
    }
}
