use reqwest::StatusCode;
use thiserror::Error;

/// Failure classes for a round trip to the interpretation service.
///
/// Callers treat every variant the same way (fall back to keyword search);
/// the split exists so logs can say what actually went wrong.
#[derive(Error, Debug)]
pub enum InterpreterError {
    #[error("interpreter timed out after {0}s")]
    Timeout(u64),

    #[error("interpreter returned HTTP {0}")]
    Status(StatusCode),

    #[error("interpreter transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
