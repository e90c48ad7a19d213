//! Command-line interface for the portal server.

use clap::Parser;

use crate::config::Settings;
use crate::server;

/// Web front end for KTP record management.
#[derive(Debug, Parser)]
#[command(name = "ktp-portal", version, about)]
pub struct Cli {
    /// Address to bind the server to.
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run the server with settings drawn from the environment.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::from_env();
    server::serve(&settings, &cli.host, cli.port).await
}
