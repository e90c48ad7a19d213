//! HTTP request handlers for the portal.

mod auth;
mod dashboard;
mod records;
mod upload;

pub use auth::{login_form, login_submit, logout};
pub use dashboard::dashboard;
pub use records::{add_form, add_submit, delete_record, edit_form, edit_submit};
pub use upload::{upload_form, upload_submit};

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::session::UserSession;

/// Infrastructure failure: session store I/O, template rendering, or a
/// request body that could not be read. Backend-call failures never
/// take this path; they become flash messages at the call site.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Render a template into an HTML response.
pub fn render_page<T: Template>(template: &T) -> Response {
    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
    .into_response()
}

/// Clear the session and send the caller back to the login page.
///
/// Used whenever the backend reports the bearer token invalid.
pub async fn expel(session: &UserSession) -> Result<Response, AppError> {
    session.clear().await?;
    Ok(Redirect::to("/login").into_response())
}
