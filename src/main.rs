//! Binary entry point: harvest the configured categories and persist them.

use std::path::Path;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arxiv_harvester::config::{load_config, Config};
use arxiv_harvester::harvest::Harvester;
use arxiv_harvester::sources::{ArxivApiClient, ArxivRssClient};
use arxiv_harvester::storage::save_papers;

/// Config file looked up in the working directory.
const CONFIG_FILE: &str = "config.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = Path::new(CONFIG_FILE);
    let config = if config_path.exists() {
        load_config(config_path).context("failed to load config.toml")?
    } else {
        Config::default()
    };

    let default_level = if config.output.debug_messages {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| format!("arxiv_harvester={}", default_level)),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let feed = ArxivRssClient::new()?;
    let api = ArxivApiClient::new()?;
    let harvester = Harvester::new(feed, api, config.clone());

    let papers = harvester.harvest_all().await?;
    save_papers(&papers, &config.output.path)?;

    println!("Fetched {} papers.", papers.len());
    if papers.is_empty() {
        println!("No papers fetched.");
    } else {
        println!("\nTitles of the first ten papers:");
        for (idx, paper) in papers.iter().take(10).enumerate() {
            println!("{}. {}", idx + 1, paper.title);
        }
    }

    Ok(())
}
