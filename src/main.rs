//! Hop-Crawler main entry point
//!
//! This is the command-line interface for the Hop-Crawler bounded-depth crawler.

use clap::error::ErrorKind;
use clap::Parser;
use hop_crawler::config::{build_config, CrawlerOverrides};
use hop_crawler::crawler::crawl;
use hop_crawler::output::print_statistics;
use hop_crawler::{FrontierPolicy, RetryScope};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Hop-Crawler: a bounded-depth web crawler
///
/// Starts at START_URL, extracts absolute anchor links from every page it
/// fetches, and keeps following them until HOPS pages beyond the seed have
/// been visited or no links remain.
#[derive(Parser, Debug)]
#[command(name = "hop-crawler")]
#[command(version)]
#[command(about = "A bounded-depth web crawler", long_about = None)]
struct Cli {
    /// URL to start crawling from
    #[arg(value_name = "START_URL")]
    start_url: String,

    /// Hop budget: the crawl stops once more than this many pages have been visited
    #[arg(value_name = "HOPS")]
    hops: u32,

    /// Path to an optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fetch attempts allowed for one URL (default 3)
    #[arg(long)]
    retries: Option<u32>,

    /// Length of one backoff step in milliseconds (default 1000)
    #[arg(long, value_name = "MS")]
    backoff_unit_ms: Option<u64>,

    /// Traversal order: depth-first or breadth-first
    #[arg(long, value_name = "POLICY")]
    frontier: Option<FrontierPolicy>,

    /// Retry counter scope: shared or per-url
    #[arg(long, value_name = "SCOPE")]
    retry_scope: Option<RetryScope>,

    /// Print crawl statistics when the crawl ends
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                e.exit();
            }
            // Usage errors, including a non-integer hop count, exit with 1.
            let _ = e.print();
            return ExitCode::from(1);
        }
    };

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let overrides = CrawlerOverrides {
        retries: cli.retries,
        backoff_unit_ms: cli.backoff_unit_ms,
        frontier: cli.frontier,
        retry_scope: cli.retry_scope,
    };

    let config = match build_config(&cli.start_url, cli.hops, cli.config.as_deref(), &overrides) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return ExitCode::from(1);
        }
    };

    tracing::debug!("Configuration: {:?}", config);

    match crawl(config).await {
        Ok(report) => {
            tracing::info!(
                "Crawl finished: {} hops, {} URLs visited, {} left in frontier",
                report.hops,
                report.visited.len(),
                report.pending
            );
            if cli.stats {
                print_statistics(&report.statistics);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hop_crawler=info,warn"),
            1 => EnvFilter::new("hop_crawler=debug,info"),
            2 => EnvFilter::new("hop_crawler=trace,debug"),
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
