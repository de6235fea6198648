//! Page-Gallery main entry point
//!
//! This is the command-line interface for the Page-Gallery thumbnail builder.

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use page_gallery::config::{
    load_config_with_hash, validate_max_concurrent, validate_thumbnail_width, Config,
};
use page_gallery::output::print_statistics;
use page_gallery::pipeline::{run_gallery, RunContext};
use page_gallery::url::parse_target_url;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Page-Gallery: a thumbnail gallery for the images on one web page
///
/// Page-Gallery fetches a page, downloads every image it references into
/// the output folder, writes a thumbnail next to each one and generates an
/// index.html showing them with their source URL, size and format.
#[derive(Parser, Debug)]
#[command(name = "page-gallery")]
#[command(version)]
#[command(about = "Builds a thumbnail gallery from the images on a web page", long_about = None)]
struct Cli {
    /// Page to collect images from
    #[arg(value_name = "TARGET_URL")]
    target_url: String,

    /// Folder receiving the images, thumbnails and gallery page
    #[arg(value_name = "OUTPUT_FOLDER")]
    output_folder: PathBuf,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of images downloaded at once
    #[arg(short = 'j', long, value_name = "N")]
    concurrency: Option<u32>,

    /// Thumbnail width in pixels
    #[arg(short, long, value_name = "PX")]
    width: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            // Usage errors go to stdout and exit 1
            println!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    setup_logging(cli.verbose, cli.quiet);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("Error: {:#}", e);
            ExitCode::FAILURE
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
            0 => EnvFilter::new("page_gallery=info,warn"),
            1 => EnvFilter::new("page_gallery=debug,info"),
            2 => EnvFilter::new("page_gallery=trace,debug"),
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

/// Loads configuration, applies command line overrides and runs the pipeline
async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_effective_config(&cli)?;

    let target_url = parse_target_url(&cli.target_url).context("Invalid target URL")?;
    let context = RunContext::new(target_url, cli.output_folder.clone(), &config);

    tracing::info!(
        "Building gallery for {} in {} (concurrency {}, width {}px)",
        context.target_url,
        context.output_folder.display(),
        context.max_concurrent,
        context.thumbnail_width
    );

    let report = run_gallery(&context)
        .await
        .with_context(|| format!("Failed to build gallery for {}", context.target_url))?;

    if !cli.quiet {
        print_statistics(&report.statistics);
        println!("✓ Gallery written to: {}", report.gallery.path.display());
    }

    Ok(())
}

/// Reads the config file if given, then layers command line flags on top
fn load_effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path).with_context(|| {
                format!("Failed to load configuration from {}", path.display())
            })?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(concurrency) = cli.concurrency {
        validate_max_concurrent(concurrency).context("Invalid --concurrency")?;
        config.download.max_concurrent = concurrency;
    }

    if let Some(width) = cli.width {
        validate_thumbnail_width(width).context("Invalid --width")?;
        config.thumbnail.width = width;
    }

    Ok(config)
}
