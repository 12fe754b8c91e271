//! Binary crate for the `wetter` dashboard.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive query loop and configuration prompts
//! - Rendering dashboards as text

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the dashboard on stdout stays readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wetter=info,wetter_core=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
