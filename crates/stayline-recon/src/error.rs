//! # Reconciliation Error Types

use thiserror::Error;

use stayline_db::DbError;

/// Errors from the reconciliation layer.
///
/// None of these escape the loop: a failed cycle is logged and skipped,
/// and the next tick retries from scratch.
#[derive(Debug, Error)]
pub enum ReconError {
    /// A data-access step failed mid-cycle.
    #[error("Database error during reconciliation: {0}")]
    Db(#[from] DbError),

    /// The cycle exceeded its configured timeout.
    #[error("Reconciliation cycle timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// The control channel to the running loop is gone.
    #[error("Reconciler channel closed: {0}")]
    ChannelClosed(String),
}

/// Result type for reconciliation operations.
pub type ReconResult<T> = Result<T, ReconError>;
