//! Sentiment labels, confidence strength, and the sentiment result shape.

use crate::error::{InsightError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Overall sentiment label returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    /// Map the remote service's class id to a label.
    ///
    /// Ids outside `0..=2` are a contract violation by the API and are not guessed.
    pub fn from_class_id(class_id: i64) -> Result<Self> {
        match class_id {
            0 => Ok(Sentiment::Negative),
            1 => Ok(Sentiment::Neutral),
            2 => Ok(Sentiment::Positive),
            other => Err(InsightError::UnknownClass { class_id: other }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Negative => "NEGATIVE",
            Sentiment::Neutral => "NEUTRAL",
            Sentiment::Positive => "POSITIVE",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative reading of a confidence value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strength {
    Strong,
    Moderate,
    Weak,
}

impl Strength {
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.8 {
            Strength::Strong
        } else if confidence > 0.6 {
            Strength::Moderate
        } else {
            Strength::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Strong => "Strong",
            Strength::Moderate => "Moderate",
            Strength::Weak => "Weak",
        }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// e.g. "Strong positive sentiment detected"
pub fn explain(sentiment: Sentiment, confidence: f64) -> String {
    format!(
        "{} {} sentiment detected",
        Strength::from_confidence(confidence),
        sentiment.as_str().to_lowercase()
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub overall_sentiment: Sentiment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<BTreeMap<String, f64>>,
}

impl SentimentResult {
    /// Fallback returned when classification fails: neutral, zero confidence,
    /// no explanation or scores.
    pub fn degraded() -> Self {
        Self {
            overall_sentiment: Sentiment::Neutral,
            explanation: None,
            confidence: 0.0,
            scores: None,
        }
    }
}

/// Body of `POST /sentiment`
#[derive(Debug, Serialize)]
pub(crate) struct SentimentRequest<'a> {
    pub text: &'a str,
}

/// Expected JSON from `POST /sentiment`
#[derive(Debug, Deserialize)]
pub(crate) struct SentimentResponse {
    #[serde(deserialize_with = "de_class_id")]
    pub sentiment: i64,
    pub confidence: f64,
    pub scores: BTreeMap<String, f64>,
}

/// Class ids arrive as integers, but whole-number floats (`2.0`) are accepted too.
fn de_class_id<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let n = serde_json::Number::deserialize(deserializer)?;
    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => Ok(f as i64),
        _ => Err(D::Error::custom(format!(
            "sentiment class id must be a whole number, got {}",
            n
        ))),
    }
}

impl TryFrom<SentimentResponse> for SentimentResult {
    type Error = InsightError;

    fn try_from(resp: SentimentResponse) -> Result<Self> {
        let sentiment = Sentiment::from_class_id(resp.sentiment)?;
        if !(0.0..=1.0).contains(&resp.confidence) {
            return Err(InsightError::InvalidConfidence {
                value: resp.confidence,
            });
        }
        Ok(Self {
            overall_sentiment: sentiment,
            explanation: Some(explain(sentiment, resp.confidence)),
            confidence: resp.confidence,
            scores: Some(resp.scores),
        })
    }
}
