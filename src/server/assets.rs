//! Static asset constants.

use axum::http::header;
use axum::response::IntoResponse;

/// Stylesheet for the web interface.
pub const CSS: &str = include_str!("style.css");

/// Serve the stylesheet.
pub async fn serve_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], CSS)
}
