//! Live connections and the persistent connection slot.

use parking_lot::{Mutex, MutexGuard};
use rusqlite::Connection;
use sqlnav_core::{NavError, NavResult};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::DriveConfig;
use crate::convert::convert_result;
use crate::transaction::{TransactionContext, TransactionOutcome};

/// An open connection plus the transaction it is enlisted in, if any.
#[derive(Debug)]
pub struct LiveConnection {
    conn: Connection,
    data_source: String,
    enlistment: Option<Uuid>,
}

impl LiveConnection {
    /// Open a connection for `config`.
    pub fn open(config: &DriveConfig) -> NavResult<Self> {
        let conn = if config.is_in_memory() {
            convert_result(Connection::open_in_memory())?
        } else {
            convert_result(Connection::open(&config.data_source))?
        };
        info!(target: "sqlnav::session", data_source = %config.data_source, "Connection opened");
        Ok(Self {
            conn,
            data_source: config.data_source.clone(),
            enlistment: None,
        })
    }

    /// The underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Transaction this connection is enlisted in.
    pub fn enlistment(&self) -> Option<Uuid> {
        self.enlistment
    }

    /// Enlist in `txn`, issuing `BEGIN` the first time.
    ///
    /// Returns `false` if already enlisted in the same transaction.
    pub fn enlist(&mut self, txn: &TransactionContext) -> NavResult<bool> {
        if !txn.is_active() {
            return Err(NavError::transaction(format!(
                "transaction {} is already completed",
                txn.id()
            )));
        }
        match self.enlistment {
            Some(id) if id == txn.id() => Ok(false),
            Some(other) => Err(NavError::transaction(format!(
                "connection is already enlisted in transaction {}",
                other
            ))),
            None => {
                convert_result(self.conn.execute_batch("BEGIN"))?;
                self.enlistment = Some(txn.id());
                debug!(target: "sqlnav::txn", txn_id = %txn.id(), "Connection enlisted");
                Ok(true)
            }
        }
    }

    /// Apply `outcome` to the enlisted transaction `txn_id` and forget it.
    ///
    /// Returns `false` when not enlisted in `txn_id` (never enlisted, or
    /// already completed).
    pub fn complete(&mut self, txn_id: Uuid, outcome: TransactionOutcome) -> NavResult<bool> {
        if self.enlistment != Some(txn_id) {
            return Ok(false);
        }
        self.enlistment = None;

        if self.conn.is_autocommit() {
            // A statement run through Invoke already ended it.
            warn!(target: "sqlnav::txn", txn_id = %txn_id, "Transaction ended outside its context");
            return Ok(true);
        }

        match self.conn.execute_batch(outcome.statement()) {
            Ok(()) => {
                match outcome {
                    TransactionOutcome::Committed => {
                        info!(target: "sqlnav::txn", txn_id = %txn_id, "Transaction committed")
                    }
                    TransactionOutcome::RolledBack => {
                        warn!(target: "sqlnav::txn", txn_id = %txn_id, "Transaction rolled back")
                    }
                }
                Ok(true)
            }
            Err(e) => {
                warn!(target: "sqlnav::txn", txn_id = %txn_id, error = %e, "Transaction completion failed");
                if !self.conn.is_autocommit() {
                    if let Err(rollback) = self.conn.execute_batch("ROLLBACK") {
                        warn!(target: "sqlnav::txn", txn_id = %txn_id, error = %rollback, "Rollback after failed completion failed");
                    }
                }
                Err(NavError::store(e))
            }
        }
    }

    /// Roll back an enlistment that was never completed.
    pub fn rollback_pending(&mut self) {
        if let Some(txn_id) = self.enlistment {
            if let Err(e) = self.complete(txn_id, TransactionOutcome::RolledBack) {
                warn!(target: "sqlnav::txn", txn_id = %txn_id, error = %e, "Rollback of pending transaction failed");
            }
        }
    }

    /// Close the connection, rolling back any pending enlistment.
    pub fn close(mut self) -> NavResult<()> {
        self.rollback_pending();
        let data_source = std::mem::take(&mut self.data_source);
        self.conn
            .close()
            .map_err(|(_, e)| NavError::store(e))?;
        info!(target: "sqlnav::session", data_source = %data_source, "Connection closed");
        Ok(())
    }
}

/// Holder of the drive's persistent connection.
///
/// The slot is the only owner of the connection; sessions lease it by
/// locking the slot, which serializes them.
#[derive(Debug, Default)]
pub struct ConnectionSlot {
    inner: Mutex<Option<LiveConnection>>,
}

impl ConnectionSlot {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the slot for exclusive use.
    pub fn lease(&self) -> MutexGuard<'_, Option<LiveConnection>> {
        self.inner.lock()
    }

    /// Take the connection out, leaving the slot empty.
    ///
    /// Of any number of racing callers, exactly one receives the connection.
    pub fn take(&self) -> Option<LiveConnection> {
        self.inner.lock().take()
    }

    /// True if a connection is currently held.
    ///
    /// Blocks while a session holds the lease.
    pub fn is_open(&self) -> bool {
        self.inner.lock().is_some()
    }

    /// Close the held connection, if any.
    ///
    /// Returns `true` if this call closed it. Safe to call repeatedly.
    pub fn close(&self) -> NavResult<bool> {
        match self.take() {
            Some(live) => {
                live.close()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
