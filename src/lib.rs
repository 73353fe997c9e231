//! SQLNav - a SQLite database as a navigable path hierarchy
//!
//! The database is the root, its tables are containers below it and every
//! row is an item addressed by its primary key:
//!
//! ```text
//! [Data Source=app.db]\people\42
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use sqlnav::{Parameters, SqlNav};
//!
//! let nav = SqlNav::open_in_memory();
//! nav.create_table("people", "id INTEGER PRIMARY KEY, name TEXT NOT NULL")?;
//! let ada = nav.create_row("\\people", Parameters::new().with("name", "Ada"))?;
//! nav.set(&ada.path, None, Parameters::new().with("name", "Ada L."))?;
//! ```
//!
//! # Architecture
//!
//! All operations go through the [`Executor`], which resolves a command's
//! path to nodes and routes its verb to the capability that handles it.
//! The [`SqlNav`] struct provides a convenient typed interface.
//!
//! Connection management and SQL generation live in the engine crate and
//! are not exposed beyond [`DriveConfig`] and [`Drive`].

// Re-export the public API from sqlnav-executor
pub use sqlnav_executor::*;
