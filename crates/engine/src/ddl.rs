//! Table-level statements: create, drop, rename.
//!
//! A new table's column list can be given as raw DDL text, as a
//! column-to-type mapping, or as a flag list such as
//! `["-id", "INTEGER", "PRIMARY", "KEY", "-name", "TEXT"]`. The last two
//! forms get a generated key column when none of their columns is a key.

use rusqlite::Connection;
use sqlnav_core::{NavError, NavResult, Value};
use std::collections::BTreeMap;
use tracing::debug;

use crate::convert::convert_result;
use crate::schema::quote_ident;

/// Key column added to generated tables that declare none.
pub const GENERATED_KEY_COLUMN: &str = "_id";

/// Build a column list from a `column -> declared type` mapping.
///
/// A `Null` type declares an untyped column.
pub fn columns_from_mapping(mapping: &BTreeMap<String, Value>) -> NavResult<String> {
    if mapping.is_empty() {
        return Err(NavError::usage("table definition maps no columns"));
    }
    let mut columns = Vec::with_capacity(mapping.len());
    for (name, declared) in mapping {
        match declared {
            Value::Null => columns.push(quote_ident(name)),
            Value::String(ty) => columns.push(format!("{} {}", quote_ident(name), ty)),
            other => {
                return Err(NavError::usage(format!(
                    "type of column '{}' must be text, got {}",
                    name,
                    other.type_name()
                )))
            }
        }
    }
    Ok(ensure_primary_key(columns.join(", ")))
}

/// Build a column list from flag-style tokens.
///
/// Every token starting with `-` opens a column; following tokens are its
/// declaration.
pub fn columns_from_flags(flags: &[Value]) -> NavResult<String> {
    let mut columns: Vec<String> = Vec::new();
    for flag in flags {
        let token = flag
            .as_str()
            .ok_or_else(|| NavError::usage("column flags must be text"))?;
        if let Some(name) = token.strip_prefix('-') {
            if name.is_empty() {
                return Err(NavError::usage("empty column flag '-'"));
            }
            columns.push(quote_ident(name));
        } else {
            let column = columns.last_mut().ok_or_else(|| {
                NavError::usage(format!("'{}' does not follow a -column flag", token))
            })?;
            column.push(' ');
            column.push_str(token);
        }
    }
    if columns.is_empty() {
        return Err(NavError::usage("table definition names no columns"));
    }
    Ok(ensure_primary_key(columns.join(", ")))
}

/// True if a column list declares a primary key.
pub fn declares_primary_key(columns: &str) -> bool {
    let words: Vec<String> = columns
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase)
        .collect();
    words.windows(2).any(|w| w[0] == "primary" && w[1] == "key")
}

/// Prepend the generated key column unless one is declared.
pub fn ensure_primary_key(columns: String) -> String {
    if declares_primary_key(&columns) {
        columns
    } else {
        format!("{} integer primary key, {}", quote_ident(GENERATED_KEY_COLUMN), columns)
    }
}

/// `CREATE TABLE "name" (columns)`.
pub fn create_table(conn: &Connection, name: &str, columns: &str) -> NavResult<()> {
    let sql = format!("CREATE TABLE {} ({})", quote_ident(name), columns);
    execute(conn, &sql)
}

/// `DROP TABLE "name"`.
pub fn drop_table(conn: &Connection, name: &str) -> NavResult<()> {
    execute(conn, &format!("DROP TABLE {}", quote_ident(name)))
}

/// `ALTER TABLE "from" RENAME TO "to"`.
pub fn rename_table(conn: &Connection, from: &str, to: &str) -> NavResult<()> {
    execute(
        conn,
        &format!("ALTER TABLE {} RENAME TO {}", quote_ident(from), quote_ident(to)),
    )
}

fn execute(conn: &Connection, sql: &str) -> NavResult<()> {
    debug!(target: "sqlnav::sql", sql, "execute");
    convert_result(conn.execute_batch(sql))
}
