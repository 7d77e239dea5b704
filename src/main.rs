// src/main.rs
// =============================================================================
// This is the entry point of the crawler.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Validate the seed URL and create the results file
// 3. Run the crawl until there is no work left
// 4. Exit with the proper code
//
// Exit codes:
//   0 = crawl finished cleanly
//   1 = missing argument (or any other usage error)
//   2 = the seed URL is not a valid http(s) URL
//   3 = the results file could not be created
//   4 = unexpected internal error
// =============================================================================

mod cli;
mod config;
mod crawl;
mod error;
mod logging;
mod output;
mod page;

use std::sync::Arc;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use log::info;
use url::Url;

use cli::Cli;
use error::CrawlError;
use output::{create_output_file, ResultSink};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            4
        }
    };

    std::process::exit(exit_code);
}

// Runs the application and returns the process exit code
//
// Expected failures (bad seed, unwritable output) come back as Ok(code);
// Err is reserved for things that should never happen.
async fn run() -> Result<i32> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return Ok(usage_error(e)),
    };

    if let Err(e) = logging::init_logger(cli.log_filter()) {
        eprintln!("Warning: could not initialize logging: {}", e);
    }

    let seed_arg = cli.seed_argument();
    let seed = match parse_seed_url(seed_arg) {
        Ok(seed) => seed,
        Err(e) => {
            eprintln!("Please enter a valid URL to crawl: {}", e);
            return Ok(e.exit_code());
        }
    };

    let config = cli.crawl_config();

    // The file is named after the seed as typed, minus surrounding whitespace
    let (path, file) = match create_output_file(&config.output_dir, seed_arg) {
        Ok(created) => created,
        Err(e) => {
            eprintln!("Error creating output file: {}", e);
            return Ok(e.exit_code());
        }
    };
    info!("writing results to {}", path.display());

    let sink = Arc::new(ResultSink::stdout_and_file(file));
    let summary = match crawl::crawl(&seed, &config, sink).await {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(e.exit_code());
        }
    };

    info!(
        "crawl finished: {} pages recorded, {} fetch failures, {:.2}s",
        summary.pages_recorded, summary.fetch_failures, summary.elapsed_secs
    );

    if cli.json {
        print_summary(&summary)?;
    }

    Ok(0)
}

// Maps a clap parse failure to our exit codes
fn usage_error(e: clap::Error) -> i32 {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = e.print();
            0
        }
        ErrorKind::MissingRequiredArgument => {
            let _ = e.print();
            eprintln!("Please specify base URL to crawl");
            1
        }
        _ => {
            let _ = e.print();
            1
        }
    }
}

// Checks that the seed is an absolute http(s) URL with a host
fn parse_seed_url(raw: &str) -> Result<Url, CrawlError> {
    let invalid = |reason: String| CrawlError::InvalidSeedUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }

    Ok(url)
}

// Prints the crawl summary as pretty JSON on stdout
fn print_summary(summary: &crawl::CrawlSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    println!("{}", json);
    Ok(())
}
