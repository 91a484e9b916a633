//! Failure reporting injected into the client.

use crate::error::InsightError;
use std::sync::Arc;

/// Which best-effort operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    SentimentAnalysis,
    SummaryGeneration,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::SentimentAnalysis => "sentiment analysis",
            Operation::SummaryGeneration => "summary generation",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives exactly one call per degraded operation.
pub trait FailureReporter: Send + Sync {
    fn report(&self, operation: Operation, cause: &InsightError);
}

/// Default reporter: one `tracing` error event per failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl FailureReporter for TracingReporter {
    fn report(&self, operation: Operation, cause: &InsightError) {
        tracing::error!(operation = operation.as_str(), "Error in {}: {}", operation, cause);
    }
}

pub fn default_reporter() -> Arc<dyn FailureReporter> {
    Arc::new(TracingReporter)
}
