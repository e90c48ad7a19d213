//! KTP Portal - web front end for citizen identity card records.
//!
//! A thin server-rendered UI that authenticates against a remote API,
//! proxies KTP record CRUD, and forwards scanned documents to an OCR
//! extraction endpoint. All durable state lives in the backend.

mod backend;
mod cli;
mod config;
mod models;
mod server;
mod session;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (before anything else)
    let _ = dotenvy::dotenv();

    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity
    let default_filter = if cli.verbose {
        "ktp_portal=debug"
    } else {
        "ktp_portal=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    cli::run(cli).await
}
