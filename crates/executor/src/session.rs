//! Stateful session for transaction support.
//!
//! The [`Session`] borrows a drive and manages an optional open
//! transaction. While a transaction is active the session keeps the drive's
//! connection leased and enlisted, so every data command it runs sees the
//! transaction's own writes and lands in the same unit of work.
//!
//! # Usage
//!
//! ```ignore
//! use sqlnav_executor::{Command, Executor};
//!
//! let executor = Executor::open_in_memory();
//! let mut session = executor.session();
//!
//! session.execute(Command::TxnBegin)?;
//! session.execute(Command::invoke("/", "INSERT INTO t VALUES (1)"))?;
//! session.execute(Command::TxnCommit)?;
//! ```
//!
//! Other sessions on the same drive wait for the lease until the
//! transaction completes. Do not run commands through the owning
//! [`Executor`](crate::Executor) on the same thread while it is active.

use sqlnav_engine::{Drive, StoreSession, TransactionContext, TransactionOutcome};
use tracing::warn;
use uuid::Uuid;

use crate::convert::convert_result;
use crate::executor::dispatch_on;
use crate::{Command, Error, Output, Result};

/// A stateful session with an optional open transaction.
///
/// When no transaction is active, every command leases the connection for
/// its own duration. Dropping a session with an active transaction rolls
/// it back.
pub struct Session<'d> {
    drive: &'d Drive,
    store: Option<StoreSession<'d>>,
    txn: Option<TransactionContext>,
}

impl<'d> Session<'d> {
    /// Create a new session on `drive`.
    pub fn new(drive: &'d Drive) -> Self {
        Self {
            drive,
            store: None,
            txn: None,
        }
    }

    /// Returns whether a transaction is currently active.
    pub fn in_transaction(&self) -> bool {
        self.txn.is_some()
    }

    /// Id of the active transaction.
    pub fn transaction_id(&self) -> Option<Uuid> {
        self.txn.as_ref().map(TransactionContext::id)
    }

    /// Execute a command, routing through the active transaction when there
    /// is one.
    pub fn execute(&mut self, cmd: Command) -> Result<Output> {
        match cmd {
            Command::TxnBegin => self.handle_begin(),
            Command::TxnCommit => self.handle_complete(TransactionOutcome::Committed),
            Command::TxnRollback => self.handle_complete(TransactionOutcome::RolledBack),
            Command::TxnIsActive => Ok(Output::Bool(self.in_transaction())),
            cmd => match &self.store {
                Some(store) => dispatch_on(self.drive, store, cmd),
                None => {
                    let store = convert_result(self.drive.session())?;
                    dispatch_on(self.drive, &store, cmd)
                }
            },
        }
    }

    // =========================================================================
    // Transaction lifecycle handlers
    // =========================================================================

    fn handle_begin(&mut self) -> Result<Output> {
        if self.txn.is_some() {
            return Err(Error::TransactionAlreadyActive);
        }

        let txn = TransactionContext::new();
        let store = convert_result(self.drive.session_in(&txn))?;
        self.store = Some(store);
        self.txn = Some(txn);

        Ok(Output::TxnBegun)
    }

    fn handle_complete(&mut self, outcome: TransactionOutcome) -> Result<Output> {
        let txn = self.txn.take().ok_or(Error::TransactionNotActive)?;
        let mut store = self.store.take().ok_or_else(|| Error::Internal {
            reason: "active transaction without a store session".into(),
        })?;

        store
            .complete_transaction(&txn, outcome)
            .map_err(|e| Error::TransactionFailed {
                reason: e.to_string(),
            })?;

        Ok(match outcome {
            TransactionOutcome::Committed => Output::TxnCommitted,
            TransactionOutcome::RolledBack => Output::TxnAborted,
        })
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        if let (Some(txn), Some(store)) = (self.txn.take(), self.store.as_mut()) {
            if let Err(e) = store.complete_transaction(&txn, TransactionOutcome::RolledBack) {
                warn!(target: "sqlnav::txn", txn_id = %txn.id(), error = %e, "Rollback on drop failed");
            }
        }
    }
}

impl std::fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("transaction", &self.transaction_id())
            .finish()
    }
}
