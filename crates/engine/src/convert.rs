//! Conversion between SQLite values and navigation values.
//!
//! Everything that touches `rusqlite` types directly goes through here so
//! the rest of the workspace only ever sees [`Value`], [`Record`] and
//! [`NavError`].

use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{Connection, Params, Row, Statement, ToSql};
use sqlnav_core::{NavError, NavResult, Record, Value};
use tracing::debug;

/// Map a `rusqlite` failure to a store error.
pub fn convert_result<T>(result: rusqlite::Result<T>) -> NavResult<T> {
    result.map_err(NavError::store)
}

/// Convert a value into an owned SQLite value for binding.
///
/// Bool is stored as 0/1; arrays and objects are bound as JSON text.
pub fn to_sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Int(i) => SqlValue::Integer(*i),
        Value::Float(f) => SqlValue::Real(*f),
        Value::String(s) => SqlValue::Text(s.clone()),
        Value::Bytes(b) => SqlValue::Blob(b.clone()),
        Value::Array(_) | Value::Object(_) => SqlValue::Text(value.to_json_text()),
    }
}

/// Convert a borrowed SQLite value read from a row.
pub fn from_value_ref(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Int(i),
        ValueRef::Real(f) => Value::Float(f),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::Bytes(b.to_vec()),
    }
}

/// Named bindings: `(placeholder, value)` pairs ready for a statement.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    entries: Vec<(String, SqlValue)>,
}

impl Bindings {
    /// Empty set of bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding. `placeholder` includes its `:` sigil.
    pub fn push(&mut self, placeholder: impl Into<String>, value: &Value) {
        self.entries.push((placeholder.into(), to_sql_value(value)));
    }

    /// Placeholder names, for logging.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(k, _)| k.as_str()).collect()
    }

    /// Execute `sql` with these bindings, returning the changed-row count.
    pub fn execute(&self, conn: &Connection, sql: &str) -> NavResult<usize> {
        debug!(target: "sqlnav::sql", sql, params = ?self.names(), "execute");
        let named: Vec<(&str, &dyn ToSql)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v as &dyn ToSql))
            .collect();
        convert_result(conn.execute(sql, named.as_slice()))
    }

    /// Run a query with these bindings, returning its first row.
    pub fn query_optional(&self, conn: &Connection, sql: &str) -> NavResult<Option<Record>> {
        let named: Vec<(&str, &dyn ToSql)> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v as &dyn ToSql))
            .collect();
        query_optional(conn, sql, named.as_slice())
    }
}

/// Column names of a prepared statement, owned.
pub fn column_names(stmt: &Statement<'_>) -> Vec<String> {
    stmt.column_names().into_iter().map(String::from).collect()
}

/// Project one row into a record using the statement's column names.
pub fn read_record(row: &Row<'_>, names: &[String]) -> NavResult<Record> {
    let mut record = Record::new();
    for (i, name) in names.iter().enumerate() {
        let value = convert_result(row.get_ref(i))?;
        record.push(name.clone(), from_value_ref(value));
    }
    Ok(record)
}

/// Run a query and hand every row to `sink` as it is read.
///
/// Rows are never collected here; a sink error stops the scan.
pub fn stream_records<P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    sink: &mut dyn FnMut(Record) -> NavResult<()>,
) -> NavResult<()> {
    debug!(target: "sqlnav::sql", sql, "query");
    let mut stmt = convert_result(conn.prepare(sql))?;
    let names = column_names(&stmt);
    let mut rows = convert_result(stmt.query(params))?;
    while let Some(row) = convert_result(rows.next())? {
        sink(read_record(row, &names)?)?;
    }
    Ok(())
}

/// Run a query and collect every row.
pub fn query_records<P: Params>(conn: &Connection, sql: &str, params: P) -> NavResult<Vec<Record>> {
    let mut records = Vec::new();
    stream_records(conn, sql, params, &mut |record| {
        records.push(record);
        Ok(())
    })?;
    Ok(records)
}

/// Run a query expected to return at most one row.
pub fn query_optional<P: Params>(conn: &Connection, sql: &str, params: P) -> NavResult<Option<Record>> {
    let mut found = None;
    stream_records(conn, sql, params, &mut |record| {
        if found.is_none() {
            found = Some(record);
        }
        Ok(())
    })?;
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_sql_value_mapping() {
        assert_eq!(to_sql_value(&Value::Bool(true)), SqlValue::Integer(1));
        assert_eq!(to_sql_value(&Value::Null), SqlValue::Null);
        assert_eq!(
            to_sql_value(&Value::Array(vec![Value::Int(1)])),
            SqlValue::Text("[1]".to_string())
        );
    }

    #[test]
    fn test_query_records_reads_every_storage_class() {
        let conn = Connection::open_in_memory().unwrap();
        let rows = query_records(&conn, "SELECT 1 AS i, 2.5 AS f, 'x' AS s, X'ff' AS b, NULL AS n", [])
            .unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.get("i"), Some(&Value::Int(1)));
        assert_eq!(row.get("f"), Some(&Value::Float(2.5)));
        assert_eq!(row.get("s"), Some(&Value::from("x")));
        assert_eq!(row.get("b"), Some(&Value::Bytes(vec![0xff])));
        assert_eq!(row.get("n"), Some(&Value::Null));
    }

    #[test]
    fn test_bindings_execute_named() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (a INTEGER, b TEXT)").unwrap();

        let mut bindings = Bindings::new();
        bindings.push(":a", &Value::Int(7));
        bindings.push(":b", &Value::from("seven"));
        let changed = bindings.execute(&conn, "INSERT INTO t (a, b) VALUES (:a, :b)").unwrap();
        assert_eq!(changed, 1);

        let row = query_optional(&conn, "SELECT a, b FROM t", []).unwrap().unwrap();
        assert_eq!(row.get("b"), Some(&Value::from("seven")));
    }

    #[test]
    fn test_store_errors_are_converted() {
        let conn = Connection::open_in_memory().unwrap();
        let err = query_records(&conn, "SELECT * FROM missing", []).unwrap_err();
        assert!(matches!(err, NavError::Store { .. }));
    }

    #[test]
    fn test_sink_error_stops_scan() {
        let conn = Connection::open_in_memory().unwrap();
        let mut seen = 0;
        let result = stream_records(
            &conn,
            "SELECT 1 UNION ALL SELECT 2 UNION ALL SELECT 3",
            [],
            &mut |_| {
                seen += 1;
                if seen == 2 {
                    Err(NavError::internal("stop"))
                } else {
                    Ok(())
                }
            },
        );
        assert!(result.is_err());
        assert_eq!(seen, 2);
    }
}
