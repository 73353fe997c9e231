//! Store engine for SQLNav
//!
//! This crate owns everything that talks to SQLite:
//! - Drive: configured data source, persistent or transient connections
//! - StoreSession: exclusive lease on a connection for one unit of work
//! - TransactionContext: explicit enlistment with synchronous completion
//! - Schema introspection and table-level DDL
//! - CommandBuilder: schema-driven INSERT/UPDATE/DELETE/SELECT
//!
//! Nothing above this crate sees `rusqlite` errors; they are converted to
//! `NavError::Store` at this boundary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod convert;
pub mod ddl;
pub mod drive;
pub mod schema;
pub mod session;
pub mod transaction;

pub use builder::{CommandBuilder, InsertCommand, UpdateCommand};
pub use drive::{Drive, DriveConfig};
pub use schema::ColumnSchema;
pub use session::StoreSession;
pub use transaction::{savepoint, TransactionContext, TransactionOutcome};

pub use rusqlite::Connection;
