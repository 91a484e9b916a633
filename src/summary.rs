//! Summary result shape and the three request shapes sent to `/summarize`.

use serde::{Deserialize, Serialize};

/// Placeholder brief used when summarization fails.
pub const SUMMARY_UNAVAILABLE: &str = "Summary unavailable";

/// Prefix the service expects for the market-impact prompt.
pub const MARKET_IMPACT_PREFIX: &str = "Summarize the market impact: ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub brief: String,
    pub key_points: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_impact: Option<String>,
}

impl SummaryResult {
    pub fn degraded() -> Self {
        Self {
            brief: SUMMARY_UNAVAILABLE.to_string(),
            key_points: String::new(),
            market_impact: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum SummaryStyle {
    Brief,
    BulletPoints,
    Analytical,
}

/// Body of `POST /summarize`
#[derive(Debug, Serialize)]
pub(crate) struct SummarizeRequest {
    pub text: String,
    pub max_length: u32,
    pub style: SummaryStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_sequences: Option<u32>,
}

impl SummarizeRequest {
    pub fn brief(text: &str) -> Self {
        Self {
            text: text.to_string(),
            max_length: 128,
            style: SummaryStyle::Brief,
            num_sequences: None,
        }
    }

    pub fn key_points(text: &str) -> Self {
        Self {
            text: text.to_string(),
            max_length: 256,
            style: SummaryStyle::BulletPoints,
            num_sequences: Some(3),
        }
    }

    pub fn market_impact(text: &str) -> Self {
        Self {
            text: format!("{MARKET_IMPACT_PREFIX}{text}"),
            max_length: 128,
            style: SummaryStyle::Analytical,
            num_sequences: None,
        }
    }
}

/// Single-summary response (brief and market impact)
#[derive(Debug, Deserialize)]
pub(crate) struct SingleSummary {
    pub summary: String,
}

/// Multi-sequence response (key points)
#[derive(Debug, Deserialize)]
pub(crate) struct MultiSummary {
    pub summaries: Vec<String>,
}

impl MultiSummary {
    pub fn joined(self) -> String {
        self.summaries.join(" ")
    }
}
