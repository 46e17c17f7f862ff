use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Endpoint of the AI interpretation service.
    pub ai_service_url: String,
    /// Timeout for one interpretation round trip, in seconds.
    pub ai_timeout_secs: u64,
    /// Timeout for the interpreter health probe, in seconds.
    pub ai_health_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables, with local-dev defaults.
    pub fn from_env() -> Self {
        Self {
            ai_service_url: env::var("AI_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:5000/run_ai".to_string()),
            ai_timeout_secs: numeric_env("AI_TIMEOUT_SECS", 60),
            ai_health_timeout_secs: numeric_env("AI_HEALTH_TIMEOUT_SECS", 5),
        }
    }
}

fn numeric_env(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(v) => v
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a number, got '{v}'")),
        Err(_) => default,
    }
}
