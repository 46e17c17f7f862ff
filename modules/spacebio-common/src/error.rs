use thiserror::Error;

/// Errors that cross the service boundary.
///
/// Everything transient inside the pipeline (interpreter timeouts, malformed
/// AI output, unknown filter fields) is absorbed before it gets here and the
/// request completes with degraded keyword search. Only two things reach the
/// caller: asking for an entity we have no schema for, and faults nobody
/// anticipated.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("unknown entity '{entity}': no schema registered under that name")]
    EntityNotFound { entity: String },

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
