//! Air-Losses main entry point
//!
//! This is the command-line interface for the Air-Losses scraper.

use air_losses::config::{load_config_or_default, Config};
use air_losses::crawler::crawl;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Air-Losses: daily air-defence loss tracker
///
/// Scrapes the casualties listing and its monthly archives, and stores
/// every day that is not in the database yet. Running without arguments
/// uses the built-in defaults.
#[derive(Parser, Debug)]
#[command(name = "air-losses")]
#[command(version)]
#[command(about = "Daily air-defence loss tracker", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show statistics from the database and exit
    #[arg(long)]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_config_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Invalid default configuration".to_string(),
    })?;

    if cli.stats {
        handle_stats(&config)
    } else {
        handle_crawl(config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("air_losses=info,warn"),
            1 => EnvFilter::new("air_losses=debug,info"),
            2 => EnvFilter::new("air_losses=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    use air_losses::output::{load_statistics, print_statistics};
    use air_losses::storage::open_storage;
    use std::path::Path;

    println!("Database: {}\n", config.output.database_path);

    let storage = open_storage(Path::new(&config.output.database_path))?;
    let stats = load_statistics(&storage)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    tracing::info!("Main page: {}", config.source.start_url);

    let summary = crawl(config).await.context("Crawl failed")?;

    if summary.main_page_failed {
        tracing::warn!("Main page could not be loaded; nothing was crawled");
    }
    for page in &summary.failed_pages {
        tracing::warn!("Skipped {}: {}", page.url, page.reason);
    }

    println!(
        "Saved {} new rows ({} found, {} already stored)",
        summary.rows_saved, summary.records_found, summary.existing_dates
    );

    Ok(())
}
