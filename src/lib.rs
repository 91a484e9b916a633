//! Thin client for a hosted text-analysis API: sentiment classification and
//! multi-style summarization of article text.
//!
//! Public operations are best-effort. They never return an error; failures are
//! reported through an injected [`FailureReporter`] and surface as
//! [`Outcome::Degraded`] carrying a documented fallback value.

pub mod client;
pub mod config;
pub mod credential;
pub mod error;
pub mod outcome;
pub mod reporter;
pub mod sentiment;
pub mod summary;
pub mod transport;

#[cfg(test)]
mod test_support;

pub use client::{ArticleInsight, TextInsightClient};
pub use config::{ApiConfig, Config};
pub use credential::Credential;
pub use error::{InsightError, Result};
pub use outcome::Outcome;
pub use reporter::{FailureReporter, Operation, TracingReporter};
pub use sentiment::{Sentiment, SentimentResult, Strength};
pub use summary::SummaryResult;
pub use transport::{HttpTransport, Transport};
