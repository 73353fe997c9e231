//! High-level typed wrapper for the Executor.
//!
//! The [`SqlNav`] struct provides a convenient Rust API that wraps the
//! [`Executor`] and [`Command`]/[`Output`] enums with typed method calls.
//!
//! # Example
//!
//! ```text
//! use sqlnav_executor::{SqlNav, Value};
//!
//! let nav = SqlNav::open_in_memory();
//! nav.create_table("people", "id INTEGER PRIMARY KEY, name TEXT NOT NULL")?;
//!
//! let ada = nav.create_row("/people", Parameters::new().with("name", "Ada"))?;
//! assert_eq!(ada.path, "\\people\\1");
//!
//! let rows = nav.invoke("/people", "SELECT count(*) AS n FROM people")?;
//! ```

mod nodes;
mod statements;

use std::path::Path;
use std::sync::Arc;

use sqlnav_engine::{Drive, DriveConfig};

use crate::{Command, Error, Executor, Output, Result, Session};

/// High-level typed wrapper for navigation operations.
///
/// Every method builds one [`Command`], runs it on the executor and
/// unpacks the expected [`Output`] variant.
#[derive(Debug, Clone)]
pub struct SqlNav {
    executor: Executor,
}

impl SqlNav {
    /// Open a navigator over the drive described by `config`.
    pub fn open(config: DriveConfig) -> Self {
        Self {
            executor: Executor::open(config),
        }
    }

    /// Open a navigator over a private in-memory database.
    pub fn open_in_memory() -> Self {
        Self::open(DriveConfig::in_memory())
    }

    /// Open a navigator from a root descriptor such as
    /// `[Data Source=app.db]`.
    pub fn from_root(root: &str) -> Result<Self> {
        let drive = Drive::from_root(root)?;
        Ok(Self {
            executor: Executor::new(Arc::new(drive)),
        })
    }

    /// Open a navigator from a TOML config file.
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = DriveConfig::from_file(path.as_ref())?;
        Ok(Self::open(config))
    }

    /// The underlying executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    /// Root descriptor of the drive.
    pub fn root(&self) -> String {
        self.executor.drive().config().root()
    }

    /// Open a stateful session for transactions.
    pub fn session(&self) -> Session<'_> {
        self.executor.session()
    }

    /// Close the drive's connection. Safe to call more than once.
    pub fn close(&self) -> Result<bool> {
        self.executor.close()
    }

    fn run(&self, cmd: Command) -> Result<Output> {
        self.executor.execute(cmd)
    }
}

fn unexpected(cmd: &str) -> Error {
    Error::Internal {
        reason: format!("Unexpected output for {}", cmd),
    }
}
