use async_trait::async_trait;

use crate::error::InterpreterError;

/// Transport seam for the interpretation service.
///
/// `InterpreterClient` is the real implementation; tests substitute stubs
/// that return canned bodies or canned failures.
#[async_trait]
pub trait InstructionRunner: Send + Sync {
    /// Send one instruction document and return the raw response body.
    async fn run(&self, instruction: &str) -> Result<String, InterpreterError>;
}
