//! Router configuration for the web server.

use axum::routing::{get, post};
use axum::Router;
use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::Key;
use tower_sessions::{Expiry, SessionManagerLayer};

use super::{assets, handlers, AppState};
use crate::session::SessionBackend;

/// Create the main router with all routes.
pub fn create_router(state: AppState, store: SessionBackend, signing_key: Key) -> Router {
    let session_layer = SessionManagerLayer::new(store)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)))
        .with_signed(signing_key);

    Router::new()
        .route("/", get(handlers::dashboard))
        .route(
            "/login",
            get(handlers::login_form).post(handlers::login_submit),
        )
        .route("/logout", get(handlers::logout))
        .route(
            "/ktp/upload",
            get(handlers::upload_form).post(handlers::upload_submit),
        )
        .route(
            "/ktp/add",
            get(handlers::add_form).post(handlers::add_submit),
        )
        .route(
            "/ktp/edit/:nik",
            get(handlers::edit_form).post(handlers::edit_submit),
        )
        .route("/ktp/delete/:nik", post(handlers::delete_record))
        .route("/static/style.css", get(assets::serve_css))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
