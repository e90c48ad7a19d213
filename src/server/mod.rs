//! Web server for the KTP portal.
//!
//! One axum router covering login, the dashboard listing, record
//! create/edit/delete, and document upload. Each handler makes at most
//! one backend call (edit makes two: fetch then update), branches on
//! the status, and renders a template or redirects.

mod assets;
mod handlers;
mod routes;
mod template_structs;

pub use routes::create_router;

use std::net::SocketAddr;

use tower_sessions::MemoryStore;

use crate::backend::BackendClient;
use crate::config::Settings;
use crate::session::{PostgresSessionStore, SessionBackend};

/// Shared state for the web server.
#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
}

impl AppState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            backend: BackendClient::new(&settings.api_url),
        }
    }
}

/// Start the web server.
pub async fn serve(settings: &Settings, host: &str, port: u16) -> anyhow::Result<()> {
    let store = match settings.database_url.as_deref() {
        Some(url) => {
            let store = PostgresSessionStore::connect(url).await?;
            if let Err(e) = store.migrate().await {
                // The role may lack DDL rights; the table may be managed
                // externally.
                tracing::warn!("session table setup skipped: {}", e);
            }
            tracing::info!("using database-backed sessions");
            SessionBackend::Postgres(store)
        }
        None => {
            tracing::info!("using in-process sessions");
            SessionBackend::Memory(MemoryStore::default())
        }
    };

    let state = AppState::new(settings);
    let app = create_router(state, store, settings.signing_key());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
