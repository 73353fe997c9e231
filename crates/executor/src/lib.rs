//! # SQLNav Executor
//!
//! The public API for SQLNav: a SQLite database exposed as a navigable
//! path hierarchy.
//!
//! This is the only crate users need to import. It provides:
//! - [`SqlNav`] - Typed wrapper with one method per operation
//! - [`Command`]/[`Output`] - Serializable command interface
//! - [`Executor`] - Stateless dispatcher over a drive
//! - [`Session`] - Transactions across several commands
//!
//! ## Quick Start
//!
//! ```text
//! use sqlnav_executor::{Parameters, SqlNav};
//!
//! let nav = SqlNav::open_in_memory();
//! nav.create_table("people", "id INTEGER PRIMARY KEY, name TEXT NOT NULL")?;
//! nav.create_row("\\people", Parameters::new().with("name", "Ada"))?;
//!
//! let ada = nav.get("\\people\\1")?;
//! ```
//!
//! ## Paths
//!
//! | Path | Node | Capabilities |
//! |------|------|--------------|
//! | `\` | Root (the database) | Container, Creatable, Invocable |
//! | `\<table>` | Table | Container, Creatable, Removable, Renamable, Invocable |
//! | `\<table>\<key>` | Record (one row) | Removable, Settable, Copyable |
//!
//! Either separator works, and a leading `[Data Source=...]` descriptor is
//! ignored.

#![warn(missing_docs)]

mod api;
mod command;
mod context;
mod convert;
mod dispatch;
mod error;
mod executor;
pub mod node;
mod output;
mod resolver;
mod session;

// Test modules
#[cfg(test)]
mod tests;

// =============================================================================
// Public API - Everything users need is re-exported here
// =============================================================================

pub use api::SqlNav;
pub use command::Command;
pub use context::Context;
pub use dispatch::Dispatcher;
pub use error::Error;
pub use executor::Executor;
pub use output::Output;
pub use resolver::{Resolver, Target};
pub use session::Session;

// Re-export core types so users don't need sqlnav-core directly
pub use sqlnav_core::{
    Capability, NavError, NavPath, NavResult, NodeKind, NodeValue, ParamSpec, Parameters, Record,
    Value, ValueKind, Verb,
};

// Re-export configuration types so users don't need sqlnav-engine directly
pub use sqlnav_engine::{Drive, DriveConfig};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
