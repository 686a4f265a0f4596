//! Binary crate for the `weather-quip` handler.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Serving the handler over HTTP
//! - Interactive credential setup

use clap::Parser;

mod cli;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cmd = cli::Cli::parse();
    cmd.run().await
}
