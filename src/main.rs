//! Sumi-Lens main entry point
//!
//! This is the command-line interface for reading crawl and analysis results.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sumi_lens::config::{load_config_with_hash, validate, Config};
use sumi_lens::output::{
    export_page_markdown, format_notice, format_page_markdown, format_record_state,
    format_sidebar,
};
use sumi_lens::state::FetchState;
use sumi_lens::{ApiClient, ListFeed, PageShell, SubmissionState};
use tracing_subscriber::EnvFilter;

/// Sumi-Lens: a reader for crawl and analysis results
///
/// Lists crawled pages, shows a page with its summary, insights, links and
/// metadata, and submits new domains for crawling.
#[derive(Parser, Debug)]
#[command(name = "sumi-lens")]
#[command(version)]
#[command(about = "A reader for crawl and analysis results", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Backend base URL (overrides the configuration file)
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List recently crawled pages
    List,

    /// Show one crawled page alongside the page list
    Show {
        /// Page identifier
        id: String,

        /// Also write the page as markdown to this file
        #[arg(long, value_name = "PATH")]
        export: Option<PathBuf>,
    },

    /// Submit a domain or URL for crawling
    Crawl {
        /// Domain or URL; `https://` is assumed when no scheme is given
        target: String,
    },

    /// Page through full records
    Pages {
        /// Records per page (1-100); defaults to the configured page size
        #[arg(long)]
        limit: Option<u32>,

        /// Number of records to skip
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },

    /// Check that the backend is up
    Health,

    /// Show the effective configuration and exit
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(cli.config.as_ref(), cli.base_url.as_deref())?;

    if let Command::Config = cli.command {
        print_config(&config);
        return Ok(());
    }

    let client = ApiClient::new(&config).context("Failed to build API client")?;
    tracing::debug!("Using backend at {}", client.base_url());

    match cli.command {
        Command::List => handle_list(&client).await,
        Command::Show { id, export } => handle_show(client, &id, export).await,
        Command::Crawl { target } => handle_crawl(client, target).await,
        Command::Pages { limit, offset } => {
            handle_pages(&client, limit.unwrap_or(config.pages.page_size), offset).await
        }
        Command::Health => handle_health(&client).await,
        Command::Config => Ok(()),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_lens=info,warn"),
            1 => EnvFilter::new("sumi_lens=debug,info"),
            2 => EnvFilter::new("sumi_lens=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration file (if any) and applies command-line overrides
fn resolve_config(path: Option<&PathBuf>, base_url: Option<&str>) -> anyhow::Result<Config> {
    let mut config = match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(base_url) = base_url {
        config.backend.base_url = base_url.to_string();
        validate(&config).context("Invalid --base-url")?;
    }

    Ok(config)
}

/// Handles `config`: prints the effective configuration
fn print_config(config: &Config) {
    println!("=== Sumi-Lens Configuration ===\n");
    println!("Backend:");
    println!("  Base URL: {}", config.backend.base_url);
    println!("\nClient:");
    println!("  User agent: {}", config.client.user_agent());
    println!("\nPages:");
    println!("  Page size: {}", config.pages.page_size);
    println!("\n✓ Configuration is valid");
}

/// Handles `list`: mounts the list feed and prints its snapshot
async fn handle_list(client: &ApiClient) -> anyhow::Result<()> {
    let mut feed = ListFeed::mount(client);
    print!("{}", format_sidebar(feed.settle().await));
    Ok(())
}

/// Handles `show`: runs the list feed and record fetcher side by side
async fn handle_show(
    client: ApiClient,
    id: &str,
    export: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut shell = PageShell::mount(client, Some(id));
    if shell.record().subject().is_none() {
        bail!("Page identifier cannot be empty");
    }

    shell.settle().await;

    print!("{}", format_sidebar(shell.sidebar().state()));
    println!();
    print!(
        "{}",
        format_record_state(shell.record().state(), format_page_markdown)
    );

    match shell.record().state() {
        Some(FetchState::Ready(view)) => {
            if let Some(path) = export {
                export_page_markdown(view, &path)
                    .with_context(|| format!("Failed to export to {}", path.display()))?;
                println!("✓ Page exported to: {}", path.display());
            }
            Ok(())
        }
        Some(FetchState::Failed(error)) => Err(error.clone().into()),
        _ => Ok(()),
    }
}

/// Handles `crawl`: submits the target and reloads the page list on success
async fn handle_crawl(client: ApiClient, target: String) -> anyhow::Result<()> {
    let mut shell = PageShell::mount(client, None);

    if shell.submission_mut().submit_input(target) {
        if let Some(notice) = format_notice(shell.submission().state()) {
            println!("{}", notice);
        }
        let reloaded = shell.settle_submission().await;
        if reloaded {
            shell.settle().await;
        }
    }

    if let Some(notice) = format_notice(shell.submission().state()) {
        println!("{}", notice);
    }

    match shell.submission().state() {
        SubmissionState::ErrorNotice(message) => bail!("Crawl failed: {}", message),
        _ => {
            println!();
            print!("{}", format_sidebar(shell.sidebar().state()));
            Ok(())
        }
    }
}

/// Handles `pages`: prints one window of full records
async fn handle_pages(client: &ApiClient, limit: u32, offset: u32) -> anyhow::Result<()> {
    let batch = client
        .list_pages_window(limit, offset)
        .await
        .context("Failed to fetch pages")?;

    println!(
        "Pages {}-{} (total: {})\n",
        offset,
        offset as usize + batch.pages.len(),
        batch.total
    );

    for view in &batch.pages {
        println!("[{}] {}", view.id, view.title);
        println!("    URL: {}", view.url);
        println!("    Crawled at: {}", view.crawled_at);
        if let Some(category) = &view.category {
            println!("    Category: {}", category);
        }
        if let Some(sentiment) = &view.sentiment {
            println!("    Sentiment: {}", sentiment);
        }
        println!("    Insights: {}", view.insights.len());
        for anomaly in &view.anomalies {
            tracing::warn!(id = %view.id, %anomaly, "Malformed field in page record");
        }
    }

    Ok(())
}

/// Handles `health`: reports backend liveness
async fn handle_health(client: &ApiClient) -> anyhow::Result<()> {
    let health = client.health().await.context("Backend health check failed")?;

    if health.is_healthy() {
        println!("✓ Backend is {}", health.status);
        Ok(())
    } else {
        bail!("Backend reported status: {}", health.status)
    }
}
