//! Login and logout.

use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use super::super::template_structs::LoginTemplate;
use super::super::AppState;
use super::{render_page, AppError};
use crate::backend::BackendError;
use crate::session::{FlashLevel, UserSession};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Render the login page.
pub async fn login_form(session: UserSession) -> Result<Response, AppError> {
    let flashes = session.take_flashes().await?;
    Ok(render_page(&LoginTemplate::new(flashes)))
}

/// Forward credentials to the backend and store the returned token.
pub async fn login_submit(
    State(state): State<AppState>,
    session: UserSession,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    match state.backend.login(&form.username, &form.password).await {
        Ok(token) => {
            session.set_token(&token).await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(BackendError::Rejected { .. } | BackendError::Unauthorized) => {
            session
                .flash(FlashLevel::Danger, "Invalid credentials")
                .await?;
            let flashes = session.take_flashes().await?;
            Ok(render_page(&LoginTemplate::new(flashes)))
        }
        Err(e) => {
            session
                .flash(FlashLevel::Danger, format!("Connection error: {}", e))
                .await?;
            let flashes = session.take_flashes().await?;
            Ok(render_page(&LoginTemplate::new(flashes)))
        }
    }
}

/// Drop the session and return to the login page.
pub async fn logout(session: UserSession) -> Result<Response, AppError> {
    session.clear().await?;
    Ok(Redirect::to("/login").into_response())
}
