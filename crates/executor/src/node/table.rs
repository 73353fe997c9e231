//! Table nodes: one `sqlite_master` row, containing the table's rows.

use sqlnav_core::{is_addressable, NavError, NavResult, NodeKind, ParamSpec, Record, Value};
use sqlnav_engine::{ddl, schema, CommandBuilder, Connection};
use tracing::debug;

use super::root::{invoke_parameters, run_statement};
use super::{
    Container, Creatable, Invocable, Node, NodeRef, RecordNode, Removable, Renamable, RowSink,
};
use crate::context::Context;

/// A user table.
pub struct TableNode<'c> {
    conn: &'c Connection,
    name: String,
    row: Record,
}

impl<'c> TableNode<'c> {
    /// Wrap a catalog row read from `sqlite_master`.
    pub fn from_row(conn: &'c Connection, row: Record) -> NavResult<Self> {
        let name = row
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| NavError::internal("catalog row has no table name"))?
            .to_string();
        Ok(Self { conn, name, row })
    }

    fn builder(&self) -> NavResult<CommandBuilder<'c>> {
        CommandBuilder::new(self.conn, &self.name)
    }

    fn record(&self, builder: &CommandBuilder<'c>, row: Record) -> NavResult<RecordNode<'c>> {
        let key_column = builder.primary_key()?.name.clone();
        RecordNode::new(self.conn, &self.name, &key_column, row)
    }
}

impl<'c> Node<'c> for TableNode<'c> {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Table
    }

    fn item(&self) -> Record {
        self.row.clone()
    }

    fn container_kind(&self) -> Option<NodeKind> {
        Some(NodeKind::Root)
    }

    fn as_container(&self) -> Option<&dyn Container<'c>> {
        Some(self)
    }

    fn as_creatable(&self) -> Option<&dyn Creatable<'c>> {
        Some(self)
    }

    fn as_removable(&self) -> Option<&dyn Removable> {
        Some(self)
    }

    fn as_renamable(&self) -> Option<&dyn Renamable<'c>> {
        Some(self)
    }

    fn as_invocable(&self) -> Option<&dyn Invocable> {
        Some(self)
    }
}

impl<'c> Container<'c> for TableNode<'c> {
    fn children(&self, filter: Option<&str>) -> NavResult<Vec<NodeRef<'c>>> {
        let builder = self.builder()?;
        builder.primary_key()?;
        builder
            .select_all(filter)?
            .into_iter()
            .map(|row| Ok(Box::new(self.record(&builder, row)?) as NodeRef<'c>))
            .collect()
    }

    fn child(&self, name: &str) -> NavResult<Option<NodeRef<'c>>> {
        let builder = self.builder()?;
        match builder.select_by_name(name)? {
            Some(row) => Ok(Some(Box::new(self.record(&builder, row)?))),
            None => Ok(None),
        }
    }
}

impl<'c> Creatable<'c> for TableNode<'c> {
    fn create_parameters(&self) -> NavResult<Vec<ParamSpec>> {
        Ok(self.builder()?.create_parameters())
    }

    fn create(&self, ctx: &Context, name: Option<&str>, value: Option<&Value>) -> NavResult<NodeRef<'c>> {
        let builder = self.builder()?;
        let mut insert = builder.insert()?;
        insert.bind(value, &ctx.params);
        if let Some(name) = name {
            let key_column = insert.key_column().to_string();
            if !insert.bound_columns().iter().any(|c| c.eq_ignore_ascii_case(&key_column)) {
                insert.set(&key_column, Value::from(name));
            }
        }
        if let Some(key) = insert.key_value() {
            let rendered = key.to_string();
            if !is_addressable(&rendered) {
                return Err(NavError::usage(format!(
                    "row key '{}' cannot be used as a path segment",
                    rendered
                )));
            }
        }
        let key = insert.execute(self.conn)?;
        debug!(target: "sqlnav::dispatch", table = %self.name, key = %key, "Row inserted");

        let row = match builder.select_by_key(&key)? {
            Some(row) => Some(row),
            None => builder.select_by_name(&key.to_string())?,
        };
        let row = row.ok_or_else(|| NavError::not_found(ctx.path.join(&key.to_string())))?;
        Ok(Box::new(self.record(&builder, row)?))
    }
}

impl Removable for TableNode<'_> {
    fn remove(&self, _ctx: &Context) -> NavResult<u64> {
        ddl::drop_table(self.conn, &self.name)?;
        Ok(1)
    }
}

impl<'c> Renamable<'c> for TableNode<'c> {
    fn rename(&self, _ctx: &Context, new_name: &str) -> NavResult<NodeRef<'c>> {
        if new_name.trim().is_empty() {
            return Err(NavError::usage("new table name must not be empty"));
        }
        if !is_addressable(new_name) {
            return Err(NavError::usage(format!(
                "table name '{}' cannot be used as a path segment",
                new_name
            )));
        }
        ddl::rename_table(self.conn, &self.name, new_name)?;
        let row = schema::require_table(self.conn, new_name)?;
        Ok(Box::new(TableNode::from_row(self.conn, row)?))
    }
}

impl Invocable for TableNode<'_> {
    fn invoke_parameters(&self) -> Vec<ParamSpec> {
        invoke_parameters()
    }

    fn invoke(&self, ctx: &Context, sink: &mut RowSink<'_>) -> NavResult<()> {
        run_statement(self.conn, ctx, sink)
    }
}
