//! Schema-driven command construction.
//!
//! A [`CommandBuilder`] reads a table's live columns and derives every
//! row-level statement from them: INSERT over all columns, per-column
//! guarded UPDATEs, DELETE by key, keyed and filtered SELECTs, plus the
//! dynamic parameter schemas that describe what a caller may supply.
//!
//! Placeholders are only bound for columns the caller actually named
//! (payload property or parameter); everything else stays NULL on insert
//! and untouched on update.

use rusqlite::Connection;
use sqlnav_core::{NavError, NavResult, ParamSpec, Parameters, Record, Value};
use tracing::debug;

use crate::convert::{convert_result, query_optional, query_records, Bindings};
use crate::schema::{quote_ident, table_columns, ColumnSchema};
use crate::transaction::savepoint;

const UPDATE_SAVEPOINT: &str = "sqlnav_update";

#[derive(Debug, Clone)]
struct Slot {
    column: String,
    placeholder: String,
    value: Value,
    specified: bool,
}

impl Slot {
    fn new(column: &str, index: usize) -> Self {
        Self {
            column: column.to_string(),
            placeholder: format!(":c{}", index),
            value: Value::Null,
            specified: false,
        }
    }

    fn set(&mut self, value: Value) {
        self.value = value;
        self.specified = true;
    }
}

// Parameters override payload properties of the same name.
fn bind_slots(slots: &mut [Slot], payload: Option<&Value>, params: &Parameters) -> usize {
    for slot in slots.iter_mut() {
        if let Some(value) = payload.and_then(|p| p.property(&slot.column)) {
            slot.set(value.clone());
        }
        if let Some(value) = params.get(&slot.column) {
            slot.set(value.clone());
        }
    }
    slots.iter().filter(|s| s.specified).count()
}

fn find_slot<'s>(slots: &'s mut [Slot], column: &str) -> Option<&'s mut Slot> {
    let exact = slots.iter().position(|s| s.column == column);
    let index = exact.or_else(|| slots.iter().position(|s| s.column.eq_ignore_ascii_case(column)))?;
    slots.get_mut(index)
}

/// Builds statements for one table from its current schema.
#[derive(Debug)]
pub struct CommandBuilder<'c> {
    conn: &'c Connection,
    table: String,
    columns: Vec<ColumnSchema>,
}

impl<'c> CommandBuilder<'c> {
    /// Discover `table`'s columns. Fails with `NotFound` if it does not exist.
    pub fn new(conn: &'c Connection, table: &str) -> NavResult<Self> {
        let columns = table_columns(conn, table)?;
        if columns.is_empty() {
            return Err(NavError::not_found(table));
        }
        debug!(target: "sqlnav::sql", table, columns = columns.len(), "Discovered table schema");
        Ok(Self {
            conn,
            table: table.to_string(),
            columns,
        })
    }

    /// Table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    /// The single primary-key column.
    ///
    /// Tables with no key, or with a composite key, cannot address
    /// individual rows and fail with `SchemaViolation`.
    pub fn primary_key(&self) -> NavResult<&ColumnSchema> {
        let mut keys = self.columns.iter().filter(|c| c.primary_key);
        match (keys.next(), keys.next()) {
            (Some(key), None) => Ok(key),
            (None, _) => Err(NavError::schema(&self.table, "table has no primary key column")),
            (Some(_), Some(_)) => Err(NavError::schema(
                &self.table,
                "composite primary keys are not supported",
            )),
        }
    }

    /// Key value of a row read from this table.
    pub fn key_of(&self, record: &Record) -> NavResult<Value> {
        let key = self.primary_key()?;
        record.get(&key.name).cloned().ok_or_else(|| {
            NavError::schema(&self.table, format!("row has no '{}' column", key.name))
        })
    }

    /// Inputs accepted when inserting a row: every column, required when
    /// NOT NULL and not the key.
    pub fn create_parameters(&self) -> Vec<ParamSpec> {
        self.columns
            .iter()
            .map(|c| ParamSpec {
                name: c.name.clone(),
                kind: c.kind(),
                required: c.is_required(),
            })
            .collect()
    }

    /// Inputs accepted when updating a row: every non-key column, optional.
    pub fn set_parameters(&self) -> NavResult<Vec<ParamSpec>> {
        let key = self.primary_key()?;
        Ok(self
            .columns
            .iter()
            .filter(|c| c.name != key.name)
            .map(|c| ParamSpec::optional(c.name.clone(), c.kind()))
            .collect())
    }

    /// INSERT over every column plus the new-key query.
    pub fn insert(&self) -> NavResult<InsertCommand> {
        let key = self.primary_key()?;
        let table = quote_ident(&self.table);
        let slots: Vec<Slot> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| Slot::new(&c.name, i))
            .collect();
        let columns = slots
            .iter()
            .map(|s| quote_ident(&s.column))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = slots
            .iter()
            .map(|s| s.placeholder.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Ok(InsertCommand {
            sql: format!("INSERT INTO {} ({}) VALUES ({})", table, columns, placeholders),
            key_query: format!("SELECT MAX({}) FROM {}", quote_ident(&key.name), table),
            key_column: key.name.clone(),
            slots,
        })
    }

    /// One guarded UPDATE per non-key column.
    pub fn update(&self) -> NavResult<UpdateCommand> {
        let key = self.primary_key()?;
        let table = quote_ident(&self.table);
        let key_ident = quote_ident(&key.name);
        let mut slots = Vec::new();
        let mut statements = Vec::new();
        for (i, column) in self.columns.iter().enumerate() {
            if column.name == key.name {
                continue;
            }
            let slot = Slot::new(&column.name, i);
            statements.push(format!(
                "UPDATE {} SET {} = {p} WHERE ({p}_set AND {} = :key)",
                table,
                quote_ident(&column.name),
                key_ident,
                p = slot.placeholder
            ));
            slots.push(slot);
        }
        Ok(UpdateCommand {
            table: self.table.clone(),
            statements,
            slots,
            key: None,
        })
    }

    /// DELETE of one row, with the key rendered as a literal.
    pub fn delete_sql(&self, key: &Value) -> NavResult<String> {
        let pk = self.primary_key()?;
        Ok(format!(
            "DELETE FROM {} WHERE {} = {}",
            quote_ident(&self.table),
            quote_ident(&pk.name),
            key.to_sql_literal()
        ))
    }

    /// Delete one row by key. Returns the number of rows removed.
    pub fn delete(&self, key: &Value) -> NavResult<usize> {
        let sql = self.delete_sql(key)?;
        debug!(target: "sqlnav::sql", sql = %sql, "execute");
        convert_result(self.conn.execute(&sql, []))
    }

    /// `SELECT *` over the table, optionally narrowed by a SQL predicate.
    pub fn select_all_sql(&self, filter: Option<&str>) -> String {
        let table = quote_ident(&self.table);
        match filter {
            Some(filter) if !filter.trim().is_empty() => {
                format!("SELECT * FROM {} WHERE ({})", table, filter)
            }
            _ => format!("SELECT * FROM {}", table),
        }
    }

    /// All rows, optionally filtered, in storage order.
    pub fn select_all(&self, filter: Option<&str>) -> NavResult<Vec<Record>> {
        query_records(self.conn, &self.select_all_sql(filter), [])
    }

    /// The row whose key renders as `name`.
    ///
    /// SQLite's text form of a key usually equals its rendered name, so a
    /// `CAST` lookup is tried first. Keys whose forms differ (large or
    /// inexact floats, blobs) are found by scanning the table and comparing
    /// rendered names.
    pub fn select_by_name(&self, name: &str) -> NavResult<Option<Record>> {
        let pk = self.primary_key()?;
        let sql = format!(
            "SELECT * FROM {} WHERE CAST({} AS TEXT) = ?1",
            quote_ident(&self.table),
            quote_ident(&pk.name)
        );
        if let Some(row) = query_optional(self.conn, &sql, [name])? {
            if self.key_of(&row)?.to_string() == name {
                return Ok(Some(row));
            }
        }
        for row in self.select_all(None)? {
            if self.key_of(&row)?.to_string() == name {
                return Ok(Some(row));
            }
        }
        Ok(None)
    }

    /// The row with key `key`.
    pub fn select_by_key(&self, key: &Value) -> NavResult<Option<Record>> {
        let pk = self.primary_key()?;
        let sql = format!(
            "SELECT * FROM {} WHERE {} = :key",
            quote_ident(&self.table),
            quote_ident(&pk.name)
        );
        let mut bindings = Bindings::new();
        bindings.push(":key", key);
        bindings.query_optional(self.conn, &sql)
    }

    /// Insert a copy of `source` into this table.
    ///
    /// Columns are matched by name; source columns this table lacks are
    /// ignored. The source's key is never carried over: the new row gets
    /// `new_key` if given, otherwise a generated one. Returns the new key.
    pub fn copy_from(&self, source: &Record, new_key: Option<&str>) -> NavResult<Value> {
        let mut insert = self.insert()?;
        insert.bind(Some(&source.clone().into_object()), &Parameters::new());
        let key_column = insert.key_column().to_string();
        insert.clear(&key_column);
        if let Some(name) = new_key {
            insert.set(&key_column, Value::from(name));
        }
        insert.execute(self.conn)
    }
}

/// A prepared INSERT with its named bindings.
#[derive(Debug, Clone)]
pub struct InsertCommand {
    sql: String,
    key_query: String,
    key_column: String,
    slots: Vec<Slot>,
}

impl InsertCommand {
    /// Statement text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Query that reads back the newest key.
    pub fn key_query(&self) -> &str {
        &self.key_query
    }

    /// Name of the key column.
    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    /// Key value the caller supplied, if any.
    pub fn key_value(&self) -> Option<&Value> {
        self.slots
            .iter()
            .find(|s| s.column == self.key_column && s.specified && !s.value.is_null())
            .map(|s| &s.value)
    }

    /// Bind columns named by the payload or the parameters.
    ///
    /// Returns how many columns are now bound.
    pub fn bind(&mut self, payload: Option<&Value>, params: &Parameters) -> usize {
        bind_slots(&mut self.slots, payload, params)
    }

    /// Bind one column. Returns `false` if the table has no such column.
    pub fn set(&mut self, column: &str, value: Value) -> bool {
        match find_slot(&mut self.slots, column) {
            Some(slot) => {
                slot.set(value);
                true
            }
            None => false,
        }
    }

    /// Unbind one column so it is inserted as NULL.
    pub fn clear(&mut self, column: &str) -> bool {
        match find_slot(&mut self.slots, column) {
            Some(slot) => {
                slot.value = Value::Null;
                slot.specified = false;
                true
            }
            None => false,
        }
    }

    /// Columns the caller supplied.
    pub fn bound_columns(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter(|s| s.specified)
            .map(|s| s.column.as_str())
            .collect()
    }

    /// Run the insert and return the new row's key.
    ///
    /// An explicitly supplied key is returned as given; otherwise the
    /// largest key in the table is read back on the same connection.
    pub fn execute(&self, conn: &Connection) -> NavResult<Value> {
        let mut bindings = Bindings::new();
        for slot in &self.slots {
            bindings.push(slot.placeholder.clone(), &slot.value);
        }
        bindings.execute(conn, &self.sql)?;

        if let Some(key) = self.key_value() {
            return Ok(key.clone());
        }
        let row = query_optional(conn, &self.key_query, [])?;
        Ok(row
            .and_then(|r| r.into_iter().next().map(|(_, v)| v))
            .unwrap_or(Value::Null))
    }
}

/// A prepared partial update: one guarded statement per non-key column.
#[derive(Debug, Clone)]
pub struct UpdateCommand {
    table: String,
    statements: Vec<String>,
    slots: Vec<Slot>,
    key: Option<Value>,
}

impl UpdateCommand {
    /// The statement batch, for logging.
    pub fn sql(&self) -> String {
        self.statements.join(";\n")
    }

    /// Bind columns named by the payload or the parameters.
    ///
    /// Returns how many columns will be written.
    pub fn bind(&mut self, payload: Option<&Value>, params: &Parameters) -> usize {
        bind_slots(&mut self.slots, payload, params)
    }

    /// Bind one column. Returns `false` if it is not an updatable column.
    pub fn set(&mut self, column: &str, value: Value) -> bool {
        match find_slot(&mut self.slots, column) {
            Some(slot) => {
                slot.set(value);
                true
            }
            None => false,
        }
    }

    /// Bind the key of the row to update.
    pub fn bind_key(&mut self, key: Value) {
        self.key = Some(key);
    }

    /// Columns that will be written.
    pub fn specified_columns(&self) -> Vec<&str> {
        self.slots
            .iter()
            .filter(|s| s.specified)
            .map(|s| s.column.as_str())
            .collect()
    }

    /// Apply the update atomically.
    ///
    /// Runs inside a savepoint, so it nests inside an enlisted transaction.
    /// Returns the number of column writes applied; an update naming no
    /// columns is a no-op that touches nothing.
    pub fn execute(&self, conn: &Connection) -> NavResult<usize> {
        let key = self
            .key
            .as_ref()
            .ok_or_else(|| NavError::internal("update executed without a row key"))?;
        if !self.slots.iter().any(|s| s.specified) {
            debug!(target: "sqlnav::sql", table = %self.table, "Update names no columns, skipping");
            return Ok(0);
        }

        debug!(
            target: "sqlnav::sql",
            table = %self.table,
            columns = ?self.specified_columns(),
            sql = %self.sql(),
            "execute update"
        );
        savepoint(conn, UPDATE_SAVEPOINT, || self.run(conn, key))
    }

    fn run(&self, conn: &Connection, key: &Value) -> NavResult<usize> {
        let mut written = 0;
        for (sql, slot) in self.statements.iter().zip(&self.slots) {
            let mut bindings = Bindings::new();
            bindings.push(slot.placeholder.clone(), &slot.value);
            bindings.push(format!("{}_set", slot.placeholder), &Value::Bool(slot.specified));
            bindings.push(":key", key);
            written += bindings.execute(conn, sql)?;
        }
        Ok(written)
    }
}
