//! Domain-specific error types for text-insight

use thiserror::Error;

/// Main error type for calls against the text-analysis API
#[derive(Error, Debug)]
pub enum InsightError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Timeout error: {operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },

    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("Unknown sentiment class id: {class_id}")]
    UnknownClass { class_id: i64 },

    #[error("Confidence {value} is outside [0, 1]")]
    InvalidConfidence { value: f64 },
}

impl InsightError {
    /// True for failures that never reached a response (connect, DNS, timeout)
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            InsightError::Transport { .. } | InsightError::Timeout { .. }
        )
    }
}

impl From<reqwest::Error> for InsightError {
    // Timeouts are classified by the transport, which knows the configured limit.
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return InsightError::Decode {
                message: err.to_string(),
            };
        }
        InsightError::Transport {
            message: format!("HTTP request failed: {}", err),
        }
    }
}

impl From<serde_json::Error> for InsightError {
    fn from(err: serde_json::Error) -> Self {
        InsightError::Decode {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for InsightError {
    fn from(err: toml::de::Error) -> Self {
        InsightError::Config {
            message: format!("invalid TOML: {}", err),
        }
    }
}

/// Result type alias for text-insight operations
pub type Result<T> = std::result::Result<T, InsightError>;
