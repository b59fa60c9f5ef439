use anyhow::Result;
use clap::Parser;

mod cli;
mod config;
mod server;
mod utils;

#[tokio::main]
async fn main() -> Result<()> {
    utils::log::init();
    Ok(cli::Cli::parse().run().await?)
}
