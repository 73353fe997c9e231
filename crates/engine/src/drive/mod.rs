//! Drives: a configured data source and its connection lifetime.
//!
//! In persistent mode the drive owns one connection, opened lazily on
//! first use and kept until [`Drive::close`]. In transient mode every
//! session opens and closes its own connection.

mod config;
mod slot;

pub use config::{DriveConfig, CONFIG_FILE_NAME, IN_MEMORY};
pub use slot::{ConnectionSlot, LiveConnection};

use parking_lot::MutexGuard;
use sqlnav_core::{NavError, NavResult};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

use crate::session::StoreSession;
use crate::transaction::TransactionContext;

/// A mounted database.
///
/// `Drive` is `Sync`; sessions on one drive are serialized by the
/// persistent slot's lock.
#[derive(Debug)]
pub struct Drive {
    config: DriveConfig,
    slot: ConnectionSlot,
    next_session: AtomicU64,
}

impl Drive {
    /// Mount a drive. No connection is opened until the first session.
    pub fn new(config: DriveConfig) -> Self {
        debug!(
            target: "sqlnav::session",
            data_source = %config.data_source,
            persistent = config.is_persistent(),
            "Drive mounted"
        );
        Self {
            config,
            slot: ConnectionSlot::new(),
            next_session: AtomicU64::new(1),
        }
    }

    /// Mount a private in-memory database.
    pub fn open_in_memory() -> Self {
        Self::new(DriveConfig::in_memory())
    }

    /// Mount the drive named by a root descriptor such as `[Data Source=app.db]`.
    pub fn from_root(root: &str) -> NavResult<Self> {
        Ok(Self::new(DriveConfig::from_root(root)?))
    }

    /// Drive configuration.
    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    /// Name of the data source, used as the root node's name.
    pub fn data_source(&self) -> &str {
        &self.config.data_source
    }

    /// Effective connection mode.
    pub fn is_persistent(&self) -> bool {
        self.config.is_persistent()
    }

    /// True if the persistent connection is currently open.
    ///
    /// Always `false` for transient drives. Blocks while a session is open.
    pub fn is_connected(&self) -> bool {
        self.slot.is_open()
    }

    /// Open a session.
    ///
    /// Blocks while another session on this drive holds the connection.
    /// Must not be called while the calling thread already holds a session
    /// on a persistent drive.
    pub fn session(&self) -> NavResult<StoreSession<'_>> {
        let id = self.next_session.fetch_add(1, Ordering::Relaxed);
        if self.is_persistent() {
            let mut guard = self.slot.lease();
            if guard.is_none() {
                *guard = Some(LiveConnection::open(&self.config)?);
            }
            let mapped = MutexGuard::try_map(guard, Option::as_mut)
                .map_err(|_| NavError::internal("persistent connection slot is empty"))?;
            Ok(StoreSession::shared(id, mapped))
        } else {
            Ok(StoreSession::owned(id, LiveConnection::open(&self.config)?))
        }
    }

    /// Open a session whose connection is enlisted in `txn`.
    pub fn session_in(&self, txn: &TransactionContext) -> NavResult<StoreSession<'_>> {
        let mut session = self.session()?;
        session.enlist(txn)?;
        Ok(session)
    }

    /// Close the persistent connection.
    ///
    /// Rolls back any pending enlistment. Returns `true` if a connection
    /// was closed; repeated calls return `false`.
    pub fn close(&self) -> NavResult<bool> {
        self.slot.close()
    }
}

impl Drop for Drive {
    fn drop(&mut self) {
        if let Err(e) = self.slot.close() {
            warn!(target: "sqlnav::session", error = %e, "Failed to close connection on drop");
        }
    }
}
