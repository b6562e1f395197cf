//! Lineage CLI - Lay out family tree snapshots

mod cli;
mod config;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Logging is set up inside run() once the flags are known
    let mut app = cli::LineageApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
