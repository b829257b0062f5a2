//! Slate quote CLI
//!
//! Prices a JSON quote request against the active rate card.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slate_common::{QuoteRequest, VERSION};
use slate_quote::{EngineConfig, QuoteEngine};

#[derive(Parser, Debug)]
#[command(name = "slate-quote", version, about = "Slate subscription quoting engine")]
struct Cli {
    /// JSON rate card replacing the built-in catalog
    #[arg(long, global = true)]
    rate_card: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price a quote request read from a JSON file
    Quote {
        /// Path to the request JSON
        request: PathBuf,
        /// Print a saved-quote draft for this client instead
        #[arg(long)]
        client: Option<String>,
        /// Mark the draft as a trial
        #[arg(long, requires = "client")]
        trial: bool,
    },
    /// List the tiers in the active rate card
    Tiers,
    /// Print the active rate card fingerprint
    Fingerprint,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut config = EngineConfig::load();
    if let Some(path) = cli.rate_card {
        config = config.with_rate_card(path);
    }
    info!("Starting slate-quote v{}", VERSION);

    let engine = QuoteEngine::from_config(config)
        .await
        .context("Failed to load rate card")?;

    match cli.command {
        Command::Quote {
            request,
            client,
            trial,
        } => {
            let content = tokio::fs::read_to_string(&request)
                .await
                .with_context(|| format!("Failed to read {}", request.display()))?;
            let request: QuoteRequest =
                serde_json::from_str(&content).context("Failed to parse quote request")?;

            let output = match client {
                Some(client) => serde_json::to_string_pretty(&engine.draft(client, trial, request)?)?,
                None => serde_json::to_string_pretty(&engine.quote(&request)?)?,
            };
            println!("{}", output);
        }
        Command::Tiers => {
            let card = engine.rate_card();
            for tier in &card.tiers {
                println!(
                    "{:<14} {:<14} {:>8} {}/month",
                    tier.key,
                    tier.name,
                    tier.base_price,
                    engine.config().currency
                );
            }
        }
        Command::Fingerprint => {
            println!("{}", engine.rate_card().fingerprint());
        }
    }

    Ok(())
}
