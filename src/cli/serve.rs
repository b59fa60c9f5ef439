use clap::Args;

use super::CommandError;
use crate::server;

/// Run the upload echo server
#[derive(Args, Debug)]
pub struct Command {
    /// Address to listen on, overriding the config
    #[arg(short, long)]
    address: Option<String>,
}

impl Command {
    pub async fn run(&self) -> Result<(), CommandError> {
        Ok(server::core::serve(self.address.as_deref()).await?)
    }
}
