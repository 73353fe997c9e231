//! Capability dispatch.
//!
//! The dispatcher resolves a command's path to its targets, asks each
//! target for the capability the verb needs, validates the caller's
//! parameters against that capability's schema and only then calls it.
//! Nothing touches the store before validation has passed.

use sqlnav_core::{NavError, NavPath, NavResult, NodeValue, ParamSpec, Parameters, Value, Verb};
use sqlnav_engine::{savepoint, Connection};
use tracing::{debug, warn};

use crate::context::Context;
use crate::node::{Node, RowSink};
use crate::resolver::{Resolver, Target};
use crate::{Command, Output};

const MOVE_SAVEPOINT: &str = "sqlnav_move";

/// Routes commands to node capabilities over one connection.
pub struct Dispatcher<'c> {
    conn: &'c Connection,
    resolver: Resolver<'c>,
}

impl<'c> Dispatcher<'c> {
    /// Dispatcher over `conn`; `data_source` names the root.
    pub fn new(conn: &'c Connection, data_source: impl Into<String>) -> Self {
        Self {
            conn,
            resolver: Resolver::new(conn, data_source),
        }
    }

    /// Execute one command.
    ///
    /// Transaction control commands are not handled here; they belong to
    /// whoever owns the session.
    pub fn dispatch(&self, cmd: Command) -> NavResult<Output> {
        let name = cmd.name();
        debug!(target: "sqlnav::dispatch", command = name, "Dispatching");
        match cmd {
            Command::Get { path, filter } => self.get(&NavPath::parse(&path), filter.as_deref()),
            Command::GetChildren {
                path,
                filter,
                recurse,
            } => self.get_children(&NavPath::parse(&path), filter.as_deref(), recurse),
            Command::GetChildNames { path, filter } => {
                self.get_child_names(&NavPath::parse(&path), filter.as_deref())
            }
            Command::Exists { path } => self.exists(&NavPath::parse(&path)),
            Command::IsContainer { path } => {
                let node = self.resolver.resolve_node(&NavPath::parse(&path))?;
                Ok(Output::Bool(node.as_container().is_some()))
            }
            Command::HasChildren { path } => {
                let node = self.resolver.resolve_node(&NavPath::parse(&path))?;
                let has = match node.as_container() {
                    Some(container) => container.has_children()?,
                    None => false,
                };
                Ok(Output::Bool(has))
            }
            Command::Create {
                path,
                value,
                params,
            } => self.create(&NavPath::parse(&path), value.as_ref(), params),
            Command::Remove {
                path,
                filter,
                recurse,
            } => self.remove(&NavPath::parse(&path), filter, recurse),
            Command::Set {
                path,
                filter,
                value,
                params,
            } => self.set(&NavPath::parse(&path), filter, value.as_ref(), params),
            Command::Rename { path, new_name } => self.rename(&NavPath::parse(&path), &new_name),
            Command::Copy {
                path,
                destination,
                recurse,
            } => self.copy(
                Verb::Copy,
                &NavPath::parse(&path),
                &NavPath::parse(&destination),
                recurse,
            ),
            Command::Move { path, destination } => self.copy(
                Verb::Move,
                &NavPath::parse(&path),
                &NavPath::parse(&destination),
                false,
            ),
            Command::Invoke { path, params } => {
                let mut rows = Vec::new();
                self.invoke_with(&NavPath::parse(&path), params, &mut |row| {
                    rows.push(row);
                    Ok(())
                })?;
                Ok(Output::Rows(rows))
            }
            Command::Parameters { path, verb } => self.parameters(&NavPath::parse(&path), verb),
            Command::TxnBegin | Command::TxnCommit | Command::TxnRollback | Command::TxnIsActive => {
                Err(NavError::usage(format!(
                    "{} needs a session: use Executor::session()",
                    name
                )))
            }
        }
    }

    /// Run a statement at `path`, streaming every row into `sink`.
    pub fn invoke_with(&self, path: &NavPath, params: Parameters, sink: &mut RowSink<'_>) -> NavResult<()> {
        let node = self.resolver.resolve_node(path)?;
        let invocable = node
            .as_invocable()
            .ok_or_else(|| unsupported(Verb::Invoke, node.as_ref(), path))?;
        params.validate(&invocable.invoke_parameters(), None)?;
        let ctx = Context::new(path.clone()).with_params(params);
        invocable.invoke(&ctx, sink)
    }

    // =========================================================================
    // Read
    // =========================================================================

    fn get(&self, path: &NavPath, filter: Option<&str>) -> NavResult<Output> {
        let targets = self.resolver.resolve_targets(path, filter)?;
        Ok(Output::Items(
            targets.iter().map(|t| t.node.value().at(&t.path)).collect(),
        ))
    }

    fn get_children(&self, path: &NavPath, filter: Option<&str>, recurse: bool) -> NavResult<Output> {
        let targets = self.resolver.resolve_targets(path, None)?;
        let items = attempt_all(Verb::GetChildren, &targets, |target| {
            let mut items = Vec::new();
            walk_children(target, filter, recurse, &mut items)?;
            Ok(items)
        })?;
        Ok(Output::Items(items.into_iter().flatten().collect()))
    }

    fn get_child_names(&self, path: &NavPath, filter: Option<&str>) -> NavResult<Output> {
        let targets = self.resolver.resolve_targets(path, None)?;
        let names = attempt_all(Verb::GetChildren, &targets, |target| {
            let container = target
                .node
                .as_container()
                .ok_or_else(|| unsupported(Verb::GetChildren, target.node.as_ref(), &target.path))?;
            Ok(container
                .children(filter)?
                .iter()
                .map(|child| child.name())
                .collect::<Vec<_>>())
        })?;
        Ok(Output::Names(names.into_iter().flatten().collect()))
    }

    fn exists(&self, path: &NavPath) -> NavResult<Output> {
        match self.resolver.resolve_node(path) {
            Ok(_) => Ok(Output::Bool(true)),
            Err(e) if e.is_not_found() => Ok(Output::Bool(false)),
            Err(e) => Err(e),
        }
    }

    // =========================================================================
    // Write
    // =========================================================================

    fn create(&self, path: &NavPath, value: Option<&Value>, params: Parameters) -> NavResult<Output> {
        let (target, name) = self.resolver.resolve_or_parent(path)?;
        let creatable = target
            .node
            .as_creatable()
            .ok_or_else(|| unsupported(Verb::Create, target.node.as_ref(), &target.path))?;
        params.validate(&creatable.create_parameters()?, value)?;

        let ctx = Context::new(target.path.clone()).with_params(params);
        let created = creatable.create(&ctx, name.as_deref(), value)?;
        Ok(Output::Item(
            created.value().at(&target.path.join(&created.name())),
        ))
    }

    fn remove(&self, path: &NavPath, filter: Option<String>, recurse: bool) -> NavResult<Output> {
        let targets = self.resolver.resolve_targets(path, filter.as_deref())?;
        let counts = attempt_all(Verb::Remove, &targets, |target| {
            let removable = target
                .node
                .as_removable()
                .ok_or_else(|| unsupported(Verb::Remove, target.node.as_ref(), &target.path))?;
            let ctx = Context::new(target.path.clone())
                .with_filter(filter.clone())
                .with_recurse(recurse);
            removable.remove(&ctx)
        })?;
        Ok(Output::Removed(counts.into_iter().sum()))
    }

    fn set(
        &self,
        path: &NavPath,
        filter: Option<String>,
        value: Option<&Value>,
        params: Parameters,
    ) -> NavResult<Output> {
        let targets = self.resolver.resolve_targets(path, filter.as_deref())?;
        let items = attempt_all(Verb::Set, &targets, |target| {
            let settable = target
                .node
                .as_settable()
                .ok_or_else(|| unsupported(Verb::Set, target.node.as_ref(), &target.path))?;
            params.validate(&settable.set_parameters()?, value)?;
            let ctx = Context::new(target.path.clone())
                .with_filter(filter.clone())
                .with_params(params.clone());
            Ok(settable.set(&ctx, value)?.value().at(&target.path))
        })?;
        Ok(Output::Items(items))
    }

    fn rename(&self, path: &NavPath, new_name: &str) -> NavResult<Output> {
        let node = self.resolver.resolve_node(path)?;
        let renamable = node
            .as_renamable()
            .ok_or_else(|| unsupported(Verb::Rename, node.as_ref(), path))?;
        let renamed = renamable.rename(&Context::new(path.clone()), new_name)?;
        let new_path = match path.parent() {
            Some(parent) => parent.join(&renamed.name()),
            None => NavPath::root(),
        };
        Ok(Output::Item(renamed.value().at(&new_path)))
    }

    /// Copy, or with `Verb::Move` copy then remove each source.
    ///
    /// Each move runs in its own savepoint: a source that cannot be removed
    /// leaves no copy behind.
    fn copy(&self, verb: Verb, path: &NavPath, destination: &NavPath, recurse: bool) -> NavResult<Output> {
        let targets = self.resolver.resolve_targets(path, None)?;
        let (dest, new_name) = self.resolver.resolve_or_parent(destination)?;

        let items = attempt_all(verb, &targets, |target| {
            let node = target.node.as_ref();
            let copyable = node
                .as_copyable()
                .ok_or_else(|| unsupported(verb, node, &target.path))?;
            let removable = match verb {
                Verb::Move => Some(
                    node.as_removable()
                        .ok_or_else(|| unsupported(verb, node, &target.path))?,
                ),
                _ => None,
            };
            if node.container_kind() != Some(dest.node.kind()) {
                return Err(NavError::invalid_destination(&target.path, &dest.path));
            }

            let ctx = Context::new(target.path.clone()).with_recurse(recurse);
            let copied = match removable {
                Some(removable) => savepoint(self.conn, MOVE_SAVEPOINT, || {
                    let copied = copyable.copy_to(&ctx, dest.node.as_ref(), new_name.as_deref())?;
                    removable.remove(&ctx)?;
                    Ok(copied)
                })?,
                None => copyable.copy_to(&ctx, dest.node.as_ref(), new_name.as_deref())?,
            };
            Ok(copied.value().at(&dest.path.join(&copied.name())))
        })?;
        Ok(Output::Items(items))
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    fn parameters(&self, path: &NavPath, verb: Verb) -> NavResult<Output> {
        let specs = match verb {
            Verb::Create => {
                let (target, _) = self.resolver.resolve_or_parent(path)?;
                let creatable = target
                    .node
                    .as_creatable()
                    .ok_or_else(|| unsupported(verb, target.node.as_ref(), &target.path))?;
                creatable.create_parameters()?
            }
            Verb::Set => {
                let node = self.resolver.resolve_node(path)?;
                let settable = node
                    .as_settable()
                    .ok_or_else(|| unsupported(verb, node.as_ref(), path))?;
                settable.set_parameters()?
            }
            Verb::Invoke => {
                let node = self.resolver.resolve_node(path)?;
                let invocable = node
                    .as_invocable()
                    .ok_or_else(|| unsupported(verb, node.as_ref(), path))?;
                invocable.invoke_parameters()
            }
            _ => {
                let node = self.resolver.resolve_node(path)?;
                if !verb.required_capabilities().iter().all(|cap| node.supports(*cap)) {
                    return Err(unsupported(verb, node.as_ref(), path));
                }
                Vec::<ParamSpec>::new()
            }
        };
        Ok(Output::Parameters(specs))
    }
}

fn unsupported(verb: Verb, node: &dyn Node<'_>, path: &NavPath) -> NavError {
    NavError::not_supported(verb, node.kind(), path)
}

/// Apply `op` to every target. All targets are attempted; the first
/// failure is returned once they have been.
fn attempt_all<'c, T>(
    verb: Verb,
    targets: &[Target<'c>],
    mut op: impl FnMut(&Target<'c>) -> NavResult<T>,
) -> NavResult<Vec<T>> {
    let mut results = Vec::with_capacity(targets.len());
    let mut first_error = None;
    for target in targets {
        match op(target) {
            Ok(result) => results.push(result),
            Err(e) => {
                if targets.len() > 1 {
                    warn!(
                        target: "sqlnav::dispatch",
                        verb = %verb,
                        path = %target.path,
                        error = %e,
                        "Target failed"
                    );
                }
                first_error.get_or_insert(e);
            }
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(results),
    }
}

/// Depth-first enumeration below `target`. `filter` narrows the first
/// level only.
fn walk_children(
    target: &Target<'_>,
    filter: Option<&str>,
    recurse: bool,
    out: &mut Vec<NodeValue>,
) -> NavResult<()> {
    let container = target
        .node
        .as_container()
        .ok_or_else(|| unsupported(Verb::GetChildren, target.node.as_ref(), &target.path))?;
    for child in container.children(filter)? {
        let child = Target::new(target.path.join(&child.name()), child);
        out.push(child.node.value().at(&child.path));
        if recurse && child.node.as_container().is_some() {
            walk_children(&child, None, true, out)?;
        }
    }
    Ok(())
}
