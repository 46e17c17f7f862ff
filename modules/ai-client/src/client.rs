use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use tracing::debug;

use crate::error::InterpreterError;
use crate::traits::InstructionRunner;

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_HEALTH_TIMEOUT_SECS: u64 = 5;

/// Client for the interpretation service.
///
/// The service takes an instruction document as a `text/plain` POST body and
/// answers with free text that should contain one JSON object. Interpretation
/// can be slow (it runs a generative model), so the main call gets a long
/// timeout while the health probe gets a short one.
pub struct InterpreterClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    health_timeout: Duration,
}

impl InterpreterClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            health_timeout: Duration::from_secs(DEFAULT_HEALTH_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    /// Cheap liveness probe against the service root.
    pub async fn health(&self) -> Result<(), InterpreterError> {
        let response = self
            .http
            .get(&self.base_url)
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(|e| self.classify(e, self.health_timeout))?;

        if !response.status().is_success() {
            return Err(InterpreterError::Status(response.status()));
        }
        Ok(())
    }

    fn classify(&self, err: reqwest::Error, timeout: Duration) -> InterpreterError {
        if err.is_timeout() {
            InterpreterError::Timeout(timeout.as_secs())
        } else {
            InterpreterError::Transport(err)
        }
    }
}

#[async_trait]
impl InstructionRunner for InterpreterClient {
    async fn run(&self, instruction: &str) -> Result<String, InterpreterError> {
        debug!(url = %self.base_url, bytes = instruction.len(), "interpreter request");

        let response = self
            .http
            .post(&self.base_url)
            .header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
            .timeout(self.timeout)
            .body(instruction.to_string())
            .send()
            .await
            .map_err(|e| self.classify(e, self.timeout))?;

        if !response.status().is_success() {
            return Err(InterpreterError::Status(response.status()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.classify(e, self.timeout))?;

        debug!(bytes = body.len(), "interpreter response");
        Ok(body)
    }
}
