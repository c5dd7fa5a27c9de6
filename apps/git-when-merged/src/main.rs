//! # git when-merged
//!
//! Find when a commit was merged into one or more branches.
//!
//! Installed as `git-when-merged` on `PATH`, so git runs it as
//! `git when-merged`.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                apps/git-when-merged (THE BINARY)           │
//! │                                                            │
//! │   ┌─────────────┐    ┌──────────────┐    ┌────────────┐    │
//! │   │    CLI      │    │  GitCli      │    │  Renderer  │    │
//! │   │   (clap)    │    │ (git plumbing│    │ (log/diff/ │    │
//! │   │             │    │  subprocess) │    │   gitk)    │    │
//! │   └──────┬──────┘    └──────┬───────┘    └─────┬──────┘    │
//! │          └──────────────────┼──────────────────┘           │
//! │                             ▼                              │
//! │                   ┌──────────────────┐                     │
//! │                   │ when-merged-core │                     │
//! │                   │   (THE LOGIC)    │                     │
//! │                   └──────────────────┘                     │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exit Status
//!
//! - 0: every destination reference reported a merge
//! - 1: some reference had no merge to report, or a fatal error
//! - 2: invalid command line

use clap::Parser;
use git_when_merged::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // WHENMERGED_LOG_FORMAT=json enables machine-parseable output.
    // Logs go to stderr only; stdout carries the results.
    let log_format = std::env::var("WHENMERGED_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "git_when_merged=warn,when_merged_core=warn".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    match cli::execute(cli) {
        Ok(summary) if summary.all_merged() => {}
        Ok(summary) => {
            tracing::debug!(references = summary.reports.len(), "some references had no merge");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::debug!("run failed: {:?}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
