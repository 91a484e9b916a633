//! Client for the hosted sentiment and summarization endpoints.

use crate::config::{ApiConfig, Config};
use crate::credential::Credential;
use crate::error::{InsightError, Result};
use crate::outcome::Outcome;
use crate::reporter::{FailureReporter, Operation, default_reporter};
use crate::sentiment::{SentimentRequest, SentimentResponse, SentimentResult};
use crate::summary::{MultiSummary, SingleSummary, SummarizeRequest, SummaryResult};
use crate::transport::{HttpTransport, Transport};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

const SENTIMENT_PATH: &str = "/sentiment";
const SUMMARIZE_PATH: &str = "/summarize";

/// Both analyses of one article; each half degrades on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleInsight {
    pub sentiment: Outcome<SentimentResult>,
    pub summary: Outcome<SummaryResult>,
}

/// Holds no per-call state, so clones are cheap and safe to share across tasks.
#[derive(Clone)]
pub struct TextInsightClient {
    transport: Arc<dyn Transport>,
    reporter: Arc<dyn FailureReporter>,
}

impl TextInsightClient {
    /// Build a reqwest-backed client for `api.base_url` authenticated with `credential`.
    pub fn new(credential: Credential, api: &ApiConfig) -> Result<Self> {
        let transport = HttpTransport::new(&credential, &api.base_url, api.timeout_ms)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let credential = config.credential.clone().ok_or_else(|| InsightError::Config {
            message: "no API credential configured; set INSIGHT_API_KEY or DEEPSEEK_API_KEY"
                .to_string(),
        })?;
        Self::new(credential, &config.api)
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            reporter: default_reporter(),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn FailureReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    async fn post<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let body = serde_json::to_value(request)?;
        let value = self.transport.post_json(path, body).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Classify `text`, returning the raw error on failure.
    pub async fn try_classify_sentiment(&self, text: &str) -> Result<SentimentResult> {
        debug!(chars = text.len(), "Requesting sentiment classification");
        let response: SentimentResponse = self
            .post(SENTIMENT_PATH, &SentimentRequest { text })
            .await?;
        SentimentResult::try_from(response)
    }

    /// Classify `text`. Never fails: any error is reported and a neutral,
    /// zero-confidence result is returned tagged as degraded.
    pub async fn classify_sentiment(&self, text: &str) -> Outcome<SentimentResult> {
        match self.try_classify_sentiment(text).await {
            Ok(result) => Outcome::success(result),
            Err(err) => self.degrade(Operation::SentimentAnalysis, err, SentimentResult::degraded()),
        }
    }

    /// Brief, key points and market impact of `text`, fetched concurrently.
    /// The first failing request aborts the others.
    pub async fn try_summarize(&self, text: &str) -> Result<SummaryResult> {
        debug!(chars = text.len(), "Requesting summaries");
        let brief_req = SummarizeRequest::brief(text);
        let points_req = SummarizeRequest::key_points(text);
        let market_req = SummarizeRequest::market_impact(text);

        let (brief, points, market) = tokio::try_join!(
            self.post::<_, SingleSummary>(SUMMARIZE_PATH, &brief_req),
            self.post::<_, MultiSummary>(SUMMARIZE_PATH, &points_req),
            self.post::<_, SingleSummary>(SUMMARIZE_PATH, &market_req),
        )?;

        Ok(SummaryResult {
            brief: brief.summary,
            key_points: points.joined(),
            market_impact: Some(market.summary),
        })
    }

    /// Summarize `text`. All-or-nothing: if any of the three requests fails the
    /// whole result is the "Summary unavailable" fallback.
    pub async fn summarize(&self, text: &str) -> Outcome<SummaryResult> {
        match self.try_summarize(text).await {
            Ok(result) => Outcome::success(result),
            Err(err) => self.degrade(Operation::SummaryGeneration, err, SummaryResult::degraded()),
        }
    }

    /// Run sentiment and summarization for one article concurrently.
    pub async fn analyze(&self, text: &str) -> ArticleInsight {
        let (sentiment, summary) = tokio::join!(self.classify_sentiment(text), self.summarize(text));
        ArticleInsight { sentiment, summary }
    }

    fn degrade<T>(&self, operation: Operation, err: InsightError, fallback: T) -> Outcome<T> {
        self.reporter.report(operation, &err);
        Outcome::degraded(fallback, err.to_string())
    }
}

impl std::fmt::Debug for TextInsightClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextInsightClient").finish_non_exhaustive()
    }
}
