//! nucat command-line entry point
//!
//! Exit codes: 0 on success, 2 on usage errors (clap), 3 when the service
//! index cannot be fetched, 4 when it has no `resources` field, 5 for the
//! reserved `hash` command.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use nucat::error::RunError;
use nucat::registry::http::RegistryClient;
use nucat::registry::index;
use nucat::resolve::{crawl, CrawlOutcome};
use std::num::NonZeroUsize;
use tracing::Level;
use url::Url;

/// Well-known registry root crawled when no index URL is given.
const DEFAULT_INDEX_URL: &str = "https://api.nuget.org/v3/index.json";

/// Concurrent NuGet v3 registry crawler
#[derive(Parser, Debug)]
#[command(name = "nucat", version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Service index URL to crawl
    #[arg(long, global = true, default_value = DEFAULT_INDEX_URL)]
    index_url: Url,

    /// Maximum resources (and catalog pages) fetched in parallel
    #[arg(long, global = true, default_value = "16")]
    concurrency: NonZeroUsize,

    /// Log level for diagnostics on stderr
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crawl the registry and print the package -> versions mapping
    List,
    /// Reserved output mode (content-hash summary); not implemented
    Hash,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

/// Diagnostics go to stderr; stdout carries only the result mapping.
fn setup_logging(level: LogLevel) {
    let Some(tracing_level) = level.to_tracing_level() else {
        return;
    };

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(args.log_level);

    std::process::exit(match run(args).await {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_code_for(&err)
        }
    });
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Command::List => {}
        Command::Hash => return Err(RunError::UnsupportedCommand("hash".to_string()).into()),
    }

    let client = RegistryClient::new()?;

    let service_index = index::fetch_service_index(&client, args.index_url.as_str()).await?;
    let resources = service_index.descriptors();

    let outcome = crawl(&client, resources, args.concurrency).await;
    summarize(&outcome);

    let rendered = nucat::output::render_packages(&outcome.packages)
        .context("Failed to serialize package mapping")?;
    println!("{rendered}");

    Ok(())
}

fn summarize(outcome: &CrawlOutcome) {
    tracing::info!(
        "{} packages from {} resources ({} skipped, {} failed)",
        outcome.packages.len(),
        outcome.resolved_count(),
        outcome.skipped_count(),
        outcome.failed_count()
    );
}

/// Map run-level failures to their exit status; anything else is a generic 1.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<RunError>() {
        Some(run_err) => run_err.exit_code(),
        None => 1,
    }
}
