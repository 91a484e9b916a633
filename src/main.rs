use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use text_insight::config::LoggingConfig;
use text_insight::{Config, TextInsightClient};
use tracing::info;
use tracing_subscriber::{EnvFilter, Registry, prelude::*, reload};

#[derive(Parser, Debug)]
#[command(
    name = "text-insight",
    version,
    about = "Sentiment and summaries for article text via the hosted analysis API"
)]
struct Cli {
    /// TOML config file (defaults to INSIGHT_CONFIG or ./text_insight.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify the overall sentiment of the text
    Sentiment(InputArgs),
    /// Brief summary, key points and market impact
    Summarize(InputArgs),
    /// Run both sentiment and summarization
    Analyze(InputArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Text to analyze; read from stdin when neither this nor --file is given
    text: Option<String>,

    /// Read text from a file
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,
}

impl InputArgs {
    fn read(&self) -> Result<String> {
        let text = match (&self.text, &self.file) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            (None, None) => {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("Failed to read text from stdin")?;
                buf
            }
        };
        if text.trim().is_empty() {
            bail!("no text to analyze");
        }
        Ok(text)
    }
}

/// Install the subscriber up front so config-loading warnings are visible.
/// The returned handle swaps in the configured filter once config is loaded.
fn init_logging() -> reload::Handle<EnvFilter, Registry> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(LoggingConfig::default().level));
    let (filter, handle) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    handle
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_filter = init_logging();

    let input = match &cli.command {
        Command::Sentiment(input) | Command::Summarize(input) | Command::Analyze(input) => input,
    };
    let text = input.read()?;

    let mut config = Config::load_from(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(url) = cli.base_url {
        config.api.base_url = url;
    }
    if let Some(ms) = cli.timeout_ms {
        config.api.timeout_ms = ms;
    }
    config.validate()?;
    log_filter
        .reload(EnvFilter::new(&config.logging.level))
        .context("Failed to apply configured log level")?;

    let client = TextInsightClient::from_config(&config)?;
    info!("Using text-analysis API at {}", config.api.base_url);

    let output = match &cli.command {
        Command::Sentiment(_) => serde_json::to_string_pretty(&client.classify_sentiment(&text).await)?,
        Command::Summarize(_) => serde_json::to_string_pretty(&client.summarize(&text).await)?,
        Command::Analyze(_) => serde_json::to_string_pretty(&client.analyze(&text).await)?,
    };
    println!("{output}");

    Ok(())
}
