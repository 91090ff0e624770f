//! Sitemapper main entry point
//!
//! This is the command-line interface for the sitemapper crawler.

use anyhow::Context;
use clap::Parser;
use sitemapper::config::{load_config_with_hash, validate, Config};
use sitemapper::crawler::crawl;
use sitemapper::output::write_sitemap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Sitemapper: a same-origin sitemap generator
///
/// Sitemapper crawls a website from a seed URL, follows links that stay on
/// the seed's origin up to a maximum depth, and writes every discovered URL
/// to a sitemap XML file.
#[derive(Parser, Debug)]
#[command(name = "sitemapper")]
#[command(version)]
#[command(about = "A same-origin sitemap generator", long_about = None)]
struct Cli {
    /// Start URL
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Number of parallel workers to navigate through the site
    #[arg(long, value_name = "N")]
    parallel: Option<usize>,

    /// Max depth of link navigation
    #[arg(long, value_name = "DEPTH")]
    max_depth: Option<u32>,

    /// File to write the sitemap to
    #[arg(long, value_name = "FILE")]
    output_file: Option<PathBuf>,

    /// Path to TOML configuration file; flags override its values
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    let started = Instant::now();

    let report = match crawl(&config).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Discovered {} URLs ({} pages fetched, {} failed, {} outside {})",
        report.urls.len(),
        report.stats.pages_fetched,
        report.stats.fetch_failures,
        report.stats.out_of_scope,
        report.base_origin
    );

    let output_path = Path::new(&config.output.sitemap_path);
    write_sitemap(&report.urls, output_path)
        .with_context(|| format!("writing sitemap to {}", output_path.display()))?;

    tracing::info!("Duration: {:.3}s", started.elapsed().as_secs_f64());

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemapper=info,warn"),
            1 => EnvFilter::new("sitemapper=debug,info"),
            2 => EnvFilter::new("sitemapper=trace,debug"),
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

/// Loads the config file, if any, then applies command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(url) = &cli.url {
        config.crawler.seed_url = url.clone();
    }
    if let Some(parallel) = cli.parallel {
        config.crawler.parallelism = parallel;
    }
    if let Some(max_depth) = cli.max_depth {
        config.crawler.max_depth = max_depth;
    }
    if let Some(output_file) = &cli.output_file {
        config.output.sitemap_path = output_file.to_string_lossy().into_owned();
    }

    validate(&config).context("invalid settings")?;

    Ok(config)
}
