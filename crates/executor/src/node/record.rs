//! Record nodes: one row of a table, addressed by its primary key.
//!
//! A row is named by its key's rendered form. Rows whose key renders with
//! a path separator are still listed but cannot be reached by path; new
//! rows with such keys are rejected on create.

use sqlnav_core::{NavError, NavResult, NodeKind, ParamSpec, Record, Value};
use sqlnav_engine::{CommandBuilder, Connection};
use tracing::debug;

use super::{Copyable, Node, NodeRef, Removable, Settable};
use crate::context::Context;

/// One materialized row.
pub struct RecordNode<'c> {
    conn: &'c Connection,
    table: String,
    key_column: String,
    key: Value,
    row: Record,
}

impl<'c> RecordNode<'c> {
    /// Wrap `row` read from `table`, whose key column is `key_column`.
    pub fn new(conn: &'c Connection, table: &str, key_column: &str, row: Record) -> NavResult<Self> {
        let key = row
            .get(key_column)
            .cloned()
            .ok_or_else(|| NavError::schema(table, format!("row has no '{}' column", key_column)))?;
        Ok(Self {
            conn,
            table: table.to_string(),
            key_column: key_column.to_string(),
            key,
            row,
        })
    }

    fn builder(&self) -> NavResult<CommandBuilder<'c>> {
        CommandBuilder::new(self.conn, &self.table)
    }
}

impl<'c> Node<'c> for RecordNode<'c> {
    fn name(&self) -> String {
        self.key.to_string()
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Record
    }

    fn item(&self) -> Record {
        self.row.clone()
    }

    fn container_kind(&self) -> Option<NodeKind> {
        Some(NodeKind::Table)
    }

    fn as_removable(&self) -> Option<&dyn Removable> {
        Some(self)
    }

    fn as_settable(&self) -> Option<&dyn Settable<'c>> {
        Some(self)
    }

    fn as_copyable(&self) -> Option<&dyn Copyable<'c>> {
        Some(self)
    }
}

impl Removable for RecordNode<'_> {
    fn remove(&self, _ctx: &Context) -> NavResult<u64> {
        let removed = self.builder()?.delete(&self.key)?;
        Ok(removed as u64)
    }
}

impl<'c> Settable<'c> for RecordNode<'c> {
    fn set_parameters(&self) -> NavResult<Vec<ParamSpec>> {
        self.builder()?.set_parameters()
    }

    fn set(&self, ctx: &Context, value: Option<&Value>) -> NavResult<NodeRef<'c>> {
        let builder = self.builder()?;
        let mut update = builder.update()?;
        let columns = update.bind(value, &ctx.params);
        update.bind_key(self.key.clone());
        update.execute(self.conn)?;
        debug!(target: "sqlnav::dispatch", table = %self.table, key = %self.key, columns, "Row updated");

        let row = builder
            .select_by_key(&self.key)?
            .ok_or_else(|| NavError::not_found(&ctx.path))?;
        Ok(Box::new(RecordNode::new(self.conn, &self.table, &self.key_column, row)?))
    }
}

impl<'c> Copyable<'c> for RecordNode<'c> {
    fn copy_to(
        &self,
        ctx: &Context,
        destination: &dyn Node<'c>,
        new_name: Option<&str>,
    ) -> NavResult<NodeRef<'c>> {
        if destination.kind() != NodeKind::Table {
            return Err(NavError::invalid_destination(&ctx.path, destination.name()));
        }
        let table = destination.name();
        let builder = CommandBuilder::new(self.conn, &table)?;
        let key = builder.copy_from(&self.row, new_name)?;
        debug!(target: "sqlnav::dispatch", from = %self.table, to = %table, key = %key, "Row copied");

        let row = match builder.select_by_key(&key)? {
            Some(row) => Some(row),
            None => builder.select_by_name(&key.to_string())?,
        };
        let row = row.ok_or_else(|| NavError::not_found(format!("\\{}\\{}", table, key)))?;
        let key_column = builder.primary_key()?.name.clone();
        Ok(Box::new(RecordNode::new(self.conn, &table, &key_column, row)?))
    }
}
