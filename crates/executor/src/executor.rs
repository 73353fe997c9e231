//! The Executor - single entry point to the navigation layer.
//!
//! The Executor is a stateless dispatcher: for every command it leases a
//! store session from the drive, resolves the command's path and routes the
//! verb to the capability that handles it.

use std::sync::Arc;

use sqlnav_core::{NavPath, Parameters};
use sqlnav_engine::{Drive, DriveConfig, StoreSession};

use crate::convert::convert_result;
use crate::dispatch::Dispatcher;
use crate::node::RowSink;
use crate::{Command, Output, Result, Session};

/// The command executor - single entry point to a navigable database.
///
/// The Executor is **stateless**: it holds the drive but no state of its
/// own. Each command runs on its own store session, which is released when
/// the command returns.
///
/// # Thread Safety
///
/// Executor is `Send + Sync` and can be shared across threads. Sessions on
/// one drive are serialized by the drive's connection lease.
///
/// # Example
///
/// ```ignore
/// use sqlnav_executor::{Command, Executor};
///
/// let executor = Executor::open_in_memory();
///
/// // Single command execution
/// executor.execute(Command::invoke("/", "CREATE TABLE t (id INTEGER PRIMARY KEY)"))?;
///
/// // Batch execution
/// let results = executor.execute_many(vec![
///     Command::get("/t"),
///     Command::get("/missing"),
/// ]);
/// ```
#[derive(Clone)]
pub struct Executor {
    drive: Arc<Drive>,
}

impl Executor {
    /// Create a new executor over a drive.
    pub fn new(drive: Arc<Drive>) -> Self {
        Self { drive }
    }

    /// Create an executor over a drive built from `config`.
    pub fn open(config: DriveConfig) -> Self {
        Self::new(Arc::new(Drive::new(config)))
    }

    /// Create an executor over a private in-memory database.
    pub fn open_in_memory() -> Self {
        Self::new(Arc::new(Drive::open_in_memory()))
    }

    /// The underlying drive.
    pub fn drive(&self) -> &Arc<Drive> {
        &self.drive
    }

    /// Execute a single command.
    ///
    /// Transaction commands need a [`Session`]: `TxnIsActive` reports
    /// `false` here and the others fail with `Usage`.
    pub fn execute(&self, cmd: Command) -> Result<Output> {
        if let Command::TxnIsActive = cmd {
            return Ok(Output::Bool(false));
        }
        let store = convert_result(self.drive.session())?;
        dispatch_on(&self.drive, &store, cmd)
    }

    /// Execute multiple commands sequentially.
    ///
    /// Each command runs on its own; a failure never stops the batch.
    /// Returns one result per command, in order.
    pub fn execute_many(&self, cmds: Vec<Command>) -> Vec<Result<Output>> {
        cmds.into_iter().map(|cmd| self.execute(cmd)).collect()
    }

    /// Run a statement at `path`, streaming its rows into `sink`.
    pub fn invoke_with(&self, path: &str, params: Parameters, sink: &mut RowSink<'_>) -> Result<()> {
        let store = convert_result(self.drive.session())?;
        let dispatcher = Dispatcher::new(store.connection(), self.drive.data_source());
        convert_result(dispatcher.invoke_with(&NavPath::parse(path), params, sink))
    }

    /// Open a stateful session for transactions.
    pub fn session(&self) -> Session<'_> {
        Session::new(&self.drive)
    }

    /// Close the drive's connection. Returns `false` if none was open.
    pub fn close(&self) -> Result<bool> {
        convert_result(self.drive.close())
    }
}

/// Dispatch `cmd` on an already leased store session.
pub(crate) fn dispatch_on(drive: &Drive, store: &StoreSession<'_>, cmd: Command) -> Result<Output> {
    let dispatcher = Dispatcher::new(store.connection(), drive.data_source());
    convert_result(dispatcher.dispatch(cmd))
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("data_source", &self.drive.data_source())
            .field("persistent", &self.drive.is_persistent())
            .finish()
    }
}
