pub mod serve;

use clap::Parser;
use thiserror::Error;

use crate::server::core::ServeError;

#[derive(Debug, Parser)]
#[command(name = "updrop", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, clap::Subcommand)]
#[non_exhaustive]
pub enum Command {
    Serve(serve::Command),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Failed to run server: {0}")]
    ServeError(#[from] ServeError),
}

impl Cli {
    pub async fn run(&self) -> Result<(), CommandError> {
        match &self.command {
            | Command::Serve(x) => x.run().await,
        }
    }
}
