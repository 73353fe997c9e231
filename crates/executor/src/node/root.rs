//! The drive root: the database itself.

use sqlnav_core::{NavError, NavResult, NodeKind, ParamSpec, Record, Value, ValueKind};
use sqlnav_engine::convert::stream_records;
use sqlnav_engine::{ddl, schema, Connection};
use tracing::debug;

use super::{Container, Creatable, Invocable, Node, NodeRef, RowSink, TableNode};
use crate::context::Context;

/// Dynamic parameter holding a flag-style column list for a new table.
pub const COLUMNS_PARAM: &str = "columns";

/// Dynamic parameter holding the statement text for `Invoke`.
pub const SQL_PARAM: &str = "sql";

const CREATE_TABLE_USAGE: &str = "a new table needs its columns: pass a DDL column list \
     (\"id INTEGER PRIMARY KEY, name TEXT\"), a column-to-type mapping \
     ({\"name\": \"TEXT\"}), or the columns parameter \
     ([\"-id\", \"INTEGER\", \"PRIMARY\", \"KEY\", \"-name\", \"TEXT\"])";

/// Root node. Its children are the user tables.
pub struct RootNode<'c> {
    conn: &'c Connection,
    data_source: String,
}

impl<'c> RootNode<'c> {
    /// Root of the database reachable through `conn`.
    pub fn new(conn: &'c Connection, data_source: impl Into<String>) -> Self {
        Self {
            conn,
            data_source: data_source.into(),
        }
    }
}

impl<'c> Node<'c> for RootNode<'c> {
    fn name(&self) -> String {
        self.data_source.clone()
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Root
    }

    fn item(&self) -> Record {
        Record::new().with("data_source", self.data_source.as_str())
    }

    fn as_container(&self) -> Option<&dyn Container<'c>> {
        Some(self)
    }

    fn as_creatable(&self) -> Option<&dyn Creatable<'c>> {
        Some(self)
    }

    fn as_invocable(&self) -> Option<&dyn Invocable> {
        Some(self)
    }
}

impl<'c> Container<'c> for RootNode<'c> {
    fn children(&self, filter: Option<&str>) -> NavResult<Vec<NodeRef<'c>>> {
        schema::list_tables(self.conn, filter)?
            .into_iter()
            .map(|row| Ok(Box::new(TableNode::from_row(self.conn, row)?) as NodeRef<'c>))
            .collect()
    }

    fn child(&self, name: &str) -> NavResult<Option<NodeRef<'c>>> {
        match schema::find_table(self.conn, name)? {
            Some(row) => Ok(Some(Box::new(TableNode::from_row(self.conn, row)?))),
            None => Ok(None),
        }
    }

    fn has_children(&self) -> NavResult<bool> {
        Ok(!schema::list_tables(self.conn, None)?.is_empty())
    }
}

impl<'c> Creatable<'c> for RootNode<'c> {
    fn create_parameters(&self) -> NavResult<Vec<ParamSpec>> {
        Ok(vec![ParamSpec::optional(COLUMNS_PARAM, ValueKind::StringList)])
    }

    fn create(&self, ctx: &Context, name: Option<&str>, value: Option<&Value>) -> NavResult<NodeRef<'c>> {
        let name = name.ok_or_else(|| {
            NavError::usage("a new table needs a name: create it at \\<table name>")
        })?;
        let columns = table_columns(ctx, value)?;
        ddl::create_table(self.conn, name, &columns)?;
        debug!(target: "sqlnav::dispatch", table = name, "Table created");
        let row = schema::require_table(self.conn, name)?;
        Ok(Box::new(TableNode::from_row(self.conn, row)?))
    }
}

impl Invocable for RootNode<'_> {
    fn invoke_parameters(&self) -> Vec<ParamSpec> {
        invoke_parameters()
    }

    fn invoke(&self, ctx: &Context, sink: &mut RowSink<'_>) -> NavResult<()> {
        run_statement(self.conn, ctx, sink)
    }
}

// DDL text first, then a mapping, then the flag list.
fn table_columns(ctx: &Context, value: Option<&Value>) -> NavResult<String> {
    match value {
        Some(Value::String(ddl)) if !ddl.trim().is_empty() => return Ok(ddl.clone()),
        Some(Value::Object(mapping)) => return ddl::columns_from_mapping(mapping),
        _ => {}
    }
    match ctx.params.get(COLUMNS_PARAM) {
        Some(Value::Array(flags)) => ddl::columns_from_flags(flags),
        Some(Value::String(flags)) if !flags.trim().is_empty() => {
            let flags: Vec<Value> = flags.split_whitespace().map(Value::from).collect();
            ddl::columns_from_flags(&flags)
        }
        _ => Err(NavError::usage(CREATE_TABLE_USAGE)),
    }
}

pub(super) fn invoke_parameters() -> Vec<ParamSpec> {
    vec![ParamSpec::required(SQL_PARAM, ValueKind::String)]
}

pub(super) fn run_statement(conn: &Connection, ctx: &Context, sink: &mut RowSink<'_>) -> NavResult<()> {
    let sql = match ctx.params.get(SQL_PARAM) {
        Some(Value::String(sql)) => sql.as_str(),
        Some(Value::Null) | None => "",
        Some(other) => {
            return Err(NavError::usage(format!(
                "'{}' must be text, got {}",
                SQL_PARAM,
                other.type_name()
            )))
        }
    };
    if sql.trim().is_empty() {
        return Ok(());
    }
    stream_records(conn, sql, [], sink)
}
