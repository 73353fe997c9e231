//! Live schema introspection.
//!
//! Nothing here is cached: every call reads the catalog again, so callers
//! always see the schema as it is right now.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use sqlnav_core::{NavError, NavResult, Record, ValueKind};

use crate::convert::{convert_result, query_optional, query_records};

/// One column of a table, as reported by `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name
    pub name: String,
    /// Declared type text, possibly empty
    pub declared_type: String,
    /// False when declared NOT NULL
    pub nullable: bool,
    /// True when the column is (part of) the primary key
    pub primary_key: bool,
}

impl ColumnSchema {
    /// Advertised parameter type for this column.
    pub fn kind(&self) -> ValueKind {
        ValueKind::from_declared_type(&self.declared_type)
    }

    /// A caller must supply a value on insert.
    ///
    /// Key columns are never required since SQLite can generate them.
    pub fn is_required(&self) -> bool {
        !self.nullable && !self.primary_key
    }
}

/// Columns of `table` in declaration order.
///
/// Returns an empty list when the table does not exist.
pub fn table_columns(conn: &Connection, table: &str) -> NavResult<Vec<ColumnSchema>> {
    let mut stmt = convert_result(conn.prepare(
        "SELECT name, type, \"notnull\", pk FROM pragma_table_info(?1) ORDER BY cid",
    ))?;
    let rows = convert_result(stmt.query_map([table], |row| {
        Ok(ColumnSchema {
            name: row.get(0)?,
            declared_type: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            nullable: row.get::<_, i64>(2)? == 0,
            primary_key: row.get::<_, i64>(3)? > 0,
        })
    }))?;
    convert_result(rows.collect())
}

const TABLES_SQL: &str = "SELECT type, name, tbl_name, rootpage, sql FROM sqlite_master \
     WHERE type = 'table' AND name NOT LIKE 'sqlite_%'";

/// Catalog rows of all user tables, optionally narrowed by a SQL predicate.
pub fn list_tables(conn: &Connection, filter: Option<&str>) -> NavResult<Vec<Record>> {
    let sql = match filter {
        Some(filter) => format!("{} AND ({}) ORDER BY name", TABLES_SQL, filter),
        None => format!("{} ORDER BY name", TABLES_SQL),
    };
    query_records(conn, &sql, [])
}

/// Catalog row of one table, matched by exact name.
pub fn find_table(conn: &Connection, name: &str) -> NavResult<Option<Record>> {
    let sql = format!("{} AND name = ?1", TABLES_SQL);
    query_optional(conn, &sql, [name])
}

/// Quote an identifier, doubling embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Fail with `NotFound` unless the table exists.
pub fn require_table(conn: &Connection, name: &str) -> NavResult<Record> {
    find_table(conn, name)?.ok_or_else(|| NavError::not_found(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlnav_core::Value;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE people (id INTEGER PRIMARY KEY, name TEXT NOT NULL, age integer, photo BLOB, note);
             CREATE TABLE logs (line TEXT);",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_table_columns_in_order() {
        let cols = table_columns(&conn(), "people").unwrap();
        let names: Vec<_> = cols.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "age", "photo", "note"]);

        assert!(cols[0].primary_key);
        assert!(!cols[0].is_required());
        assert!(cols[1].is_required());
        assert!(!cols[2].is_required());
        assert_eq!(cols[2].kind(), ValueKind::Integer);
        assert_eq!(cols[3].kind(), ValueKind::Bytes);
        assert_eq!(cols[4].declared_type, "");
        assert_eq!(cols[4].kind(), ValueKind::Dynamic);
    }

    #[test]
    fn test_missing_table_has_no_columns() {
        assert!(table_columns(&conn(), "nope").unwrap().is_empty());
    }

    #[test]
    fn test_schema_is_read_fresh() {
        let conn = conn();
        assert_eq!(table_columns(&conn, "logs").unwrap().len(), 1);
        conn.execute_batch("ALTER TABLE logs ADD COLUMN level TEXT").unwrap();
        assert_eq!(table_columns(&conn, "logs").unwrap().len(), 2);
    }

    #[test]
    fn test_list_tables_with_filter() {
        let conn = conn();
        let all = list_tables(&conn, None).unwrap();
        let names: Vec<_> = all.iter().map(|r| r.get("name").cloned().unwrap()).collect();
        assert_eq!(names, vec![Value::from("logs"), Value::from("people")]);

        let filtered = list_tables(&conn, Some("name LIKE 'p%'")).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].get("tbl_name"), Some(&Value::from("people")));
    }

    #[test]
    fn test_find_table() {
        let conn = conn();
        assert!(find_table(&conn, "people").unwrap().is_some());
        assert!(find_table(&conn, "sqlite_master").unwrap().is_none());
        assert!(require_table(&conn, "nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("people"), "\"people\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
