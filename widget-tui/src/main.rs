//! Binary crate for the `weather-widget` terminal tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive credential configuration
//! - The terminal frontend and event loop driving the input controller

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod ui;
mod view;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to stderr so the alternate screen stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
