//! Main entry point for the helpdesk assignment CLI
//!
//! Reads a ticket and agent dataset, runs the assignment engine and writes
//! the submission file plus a detailed report.

mod cli;
mod commands;
mod logging;
mod output;

use clap::Parser;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.execute().await {
        eprintln!("❌ Error: {:#}", e);
        std::process::exit(1);
    }
}
