// src/main.rs
// =============================================================================
// This is the entry point of the link-status CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging to stderr
// 3. Read the files, pull out URLs, check them
// 4. Print the report and exit with a proper code
//    (0 = everything 200, 1 = something else came back, 2 = error)
//
// One tokio runtime (#[tokio::main]) serves every batch the process runs.
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use link_status::extract::{read_sources, Extraction};
use link_status::{check_urls, output};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Check {
            files,
            json,
            csv,
            checker,
        } => handle_check(&files, json, csv, checker.to_config()).await,
        Commands::Extract { files } => handle_extract(&files),
    }
}

fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("link_status=debug,info")
        } else {
            EnvFilter::new("link_status=warn")
        }
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

async fn handle_check(
    files: &[PathBuf],
    json: bool,
    csv: bool,
    config: link_status::CheckerConfig,
) -> Result<i32> {
    let sources = read_sources(files)?;
    let extraction = Extraction::from_sources(&sources);
    info!(
        found = extraction.urls.len(),
        unique = extraction.unique_urls.len(),
        "extracted urls"
    );

    // Ctrl-C cancels the batch instead of killing the process mid-report
    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, cancelling remaining probes");
            on_ctrl_c.cancel();
        }
    });

    let report = check_urls(extraction.unique_urls.clone(), &config, &cancel)
        .await
        .context("checking URLs")?;

    if json {
        let response = output::Response::new(&extraction, &report)?;
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else if csv {
        print!("{}", output::to_csv(&report));
    } else {
        output::print_table(&report);
    }

    Ok(if report.all_ok() { 0 } else { 1 })
}

fn handle_extract(files: &[PathBuf]) -> Result<i32> {
    let sources = read_sources(files)?;
    let extraction = Extraction::from_sources(&sources);
    for url in &extraction.unique_urls {
        println!("{}", url);
    }
    Ok(0)
}
