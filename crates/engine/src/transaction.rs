//! Explicit transaction contexts.
//!
//! A [`TransactionContext`] is created by the caller and handed to session
//! creation. The session's connection enlists in it at most once (issuing
//! `BEGIN`) and the caller completes it synchronously with a
//! [`TransactionOutcome`]. The first completion decides the outcome; later
//! completions are no-ops.
//!
//! [`savepoint`] makes a multi-statement step atomic on its own, nested
//! inside an enlisted transaction when there is one.

use parking_lot::Mutex;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use sqlnav_core::NavResult;
use std::fmt;
use tracing::warn;
use uuid::Uuid;

use crate::convert::convert_result;

/// How a transaction ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionOutcome {
    /// Changes were committed
    Committed,
    /// Changes were discarded
    RolledBack,
}

impl TransactionOutcome {
    /// SQL statement that applies this outcome.
    pub fn statement(self) -> &'static str {
        match self {
            TransactionOutcome::Committed => "COMMIT",
            TransactionOutcome::RolledBack => "ROLLBACK",
        }
    }
}

impl fmt::Display for TransactionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionOutcome::Committed => f.write_str("committed"),
            TransactionOutcome::RolledBack => f.write_str("rolled back"),
        }
    }
}

/// A unit of work spanning one or more statements on one connection.
#[derive(Debug)]
pub struct TransactionContext {
    id: Uuid,
    outcome: Mutex<Option<TransactionOutcome>>,
}

impl TransactionContext {
    /// Start a new, active context.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            outcome: Mutex::new(None),
        }
    }

    /// Unique identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// True until an outcome has been recorded.
    pub fn is_active(&self) -> bool {
        self.outcome.lock().is_none()
    }

    /// Recorded outcome, if completed.
    pub fn outcome(&self) -> Option<TransactionOutcome> {
        *self.outcome.lock()
    }

    /// Record `outcome` if none has been recorded yet.
    ///
    /// Returns the outcome that stands, which is the first one recorded.
    pub fn finish(&self, outcome: TransactionOutcome) -> TransactionOutcome {
        *self.outcome.lock().get_or_insert(outcome)
    }
}

impl Default for TransactionContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `op` inside `SAVEPOINT name`.
///
/// The savepoint is released when `op` succeeds and rolled back when it
/// fails, so either every statement `op` ran stands or none does.
pub fn savepoint<T>(conn: &Connection, name: &str, op: impl FnOnce() -> NavResult<T>) -> NavResult<T> {
    convert_result(conn.execute_batch(&format!("SAVEPOINT {}", name)))?;
    match op() {
        Ok(value) => {
            convert_result(conn.execute_batch(&format!("RELEASE {}", name)))?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = conn.execute_batch(&format!("ROLLBACK TO {sp}; RELEASE {sp}", sp = name)) {
                warn!(target: "sqlnav::txn", savepoint = name, error = %rollback, "Savepoint rollback failed");
            }
            Err(e)
        }
    }
}
