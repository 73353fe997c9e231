//! Error conversion from internal error types.
//!
//! This module provides the conversion from [`NavError`] to the executor's
//! public [`Error`] type.

use crate::Error;
use sqlnav_core::NavError;

/// Convert a NavError to an executor Error.
///
/// Every detail is preserved; only the transaction variant is renamed.
impl From<NavError> for Error {
    fn from(err: NavError) -> Self {
        match err {
            NavError::NotFound { path } => Error::NotFound { path },
            NavError::NotSupported { verb, node, path } => Error::NotSupported { verb, node, path },
            NavError::InvalidDestination {
                origin,
                destination,
            } => Error::InvalidDestination {
                origin,
                destination,
            },
            NavError::Usage { reason } => Error::Usage { reason },
            NavError::SchemaViolation { table, reason } => Error::SchemaViolation { table, reason },
            NavError::Store { reason } => Error::Store { reason },
            NavError::Transaction { reason } => Error::TransactionFailed { reason },
            NavError::Config { reason } => Error::Config { reason },
            NavError::Internal { reason } => Error::Internal { reason },
        }
    }
}

/// Convert a NavResult to an executor Result.
pub(crate) fn convert_result<T>(r: sqlnav_core::NavResult<T>) -> crate::Result<T> {
    r.map_err(Error::from)
}
