//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::TimerError;
use storage::StorageError;

/// Errors emitted while setting up a quiz session.
///
/// Once a session is running it never returns errors; stale or duplicate
/// input is ignored instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    Empty,
    #[error(transparent)]
    Timer(#[from] TimerError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
