//! Store sessions.
//!
//! A [`StoreSession`] is an exclusive lease on a drive's connection for the
//! duration of one unit of work. On a persistent drive it borrows the
//! drive's connection and releases it on drop; on a transient drive it
//! owns a fresh connection and closes it on drop, rolling back any
//! enlistment that was never completed.

use parking_lot::MappedMutexGuard;
use rusqlite::Connection;
use sqlnav_core::NavResult;
use tracing::debug;
use uuid::Uuid;

use crate::drive::LiveConnection;
use crate::transaction::{TransactionContext, TransactionOutcome};

enum Lease<'d> {
    Shared(MappedMutexGuard<'d, LiveConnection>),
    Owned(LiveConnection),
}

/// Exclusive use of a drive's connection.
pub struct StoreSession<'d> {
    id: u64,
    lease: Lease<'d>,
}

impl<'d> StoreSession<'d> {
    pub(crate) fn shared(id: u64, live: MappedMutexGuard<'d, LiveConnection>) -> Self {
        debug!(target: "sqlnav::session", session_id = id, persistent = true, "Session opened");
        Self {
            id,
            lease: Lease::Shared(live),
        }
    }

    pub(crate) fn owned(id: u64, live: LiveConnection) -> Self {
        debug!(target: "sqlnav::session", session_id = id, persistent = false, "Session opened");
        Self {
            id,
            lease: Lease::Owned(live),
        }
    }

    /// Numeric session id, unique per drive.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// True if the connection outlives this session.
    pub fn is_persistent(&self) -> bool {
        matches!(self.lease, Lease::Shared(_))
    }

    /// The leased connection.
    pub fn connection(&self) -> &Connection {
        self.live().connection()
    }

    /// Transaction the connection is enlisted in.
    pub fn enlistment(&self) -> Option<Uuid> {
        self.live().enlistment()
    }

    /// Enlist the connection in `txn`. Returns `false` if it already was.
    pub fn enlist(&mut self, txn: &TransactionContext) -> NavResult<bool> {
        self.live_mut().enlist(txn)
    }

    /// Complete `txn` on this connection.
    ///
    /// The first completion recorded on the context decides the outcome.
    /// Returns `false` if the connection was not enlisted in `txn`, which
    /// makes duplicate completions no-ops.
    pub fn complete_transaction(
        &mut self,
        txn: &TransactionContext,
        outcome: TransactionOutcome,
    ) -> NavResult<bool> {
        let outcome = txn.finish(outcome);
        self.live_mut().complete(txn.id(), outcome)
    }

    fn live(&self) -> &LiveConnection {
        match &self.lease {
            Lease::Shared(live) => &**live,
            Lease::Owned(live) => live,
        }
    }

    fn live_mut(&mut self) -> &mut LiveConnection {
        match &mut self.lease {
            Lease::Shared(live) => &mut **live,
            Lease::Owned(live) => live,
        }
    }
}

impl std::fmt::Debug for StoreSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreSession")
            .field("id", &self.id)
            .field("persistent", &self.is_persistent())
            .field("enlistment", &self.enlistment())
            .finish()
    }
}

impl Drop for StoreSession<'_> {
    fn drop(&mut self) {
        if let Lease::Owned(live) = &mut self.lease {
            live.rollback_pending();
        }
        debug!(target: "sqlnav::session", session_id = self.id, "Session closed");
    }
}
