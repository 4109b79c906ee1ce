//! Mistake review from the terminal.
//!
//! `analyze` builds a report from a Chess.com player's latest games with a
//! local Ollama model; `review` steps through a saved report on the board.

mod analyze;
mod args;
mod repl;

use std::io;

use anyhow::Context;
use chess_core::MultiGameAnalysisReport;
use review::{ReportReview, ReviewOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::{parse_args, Command, USAGE};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays clean for the report and the board
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    match command {
        Command::Analyze { username, out, games, list, select } => {
            analyze::run(analyze::AnalyzeRequest {
                username: &username,
                out: out.as_deref(),
                games,
                list,
                select,
            })
            .await
        }
        Command::Review { report } => {
            let raw = std::fs::read_to_string(&report)
                .with_context(|| format!("reading {}", report.display()))?;
            let report = MultiGameAnalysisReport::from_json(&raw)
                .with_context(|| format!("parsing {}", report.display()))?;

            let options = ReviewOptions::from_env();
            let review = ReportReview::open(report, &options);
            info!(
                examples = review.example_count(),
                failed = review.failed_count(),
                "Report loaded"
            );

            let stdin = io::stdin();
            repl::run(review, stdin.lock(), io::stdout())?;
            Ok(())
        }
    }
}
