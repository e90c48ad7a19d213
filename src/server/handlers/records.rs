//! Record create, edit, and delete.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;

use super::super::template_structs::FormTemplate;
use super::super::AppState;
use super::{expel, render_page, AppError};
use crate::backend::BackendError;
use crate::models::KtpRecord;
use crate::session::{FlashLevel, UserSession};

/// Render the creation form, pre-filled from any OCR data left in the
/// session. The prefill is consumed here: reloading the form renders it
/// empty whether or not the submission in between succeeded.
pub async fn add_form(session: UserSession) -> Result<Response, AppError> {
    let Some(_token) = session.token().await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let record = session
        .take_ocr_data()
        .await?
        .map(|fields| KtpRecord::from_prefill(&fields))
        .unwrap_or_default();
    let flashes = session.take_flashes().await?;
    Ok(render_page(&FormTemplate::create(flashes, &record)))
}

/// Submit a new record to the backend.
pub async fn add_submit(
    State(state): State<AppState>,
    session: UserSession,
    Form(record): Form<KtpRecord>,
) -> Result<Response, AppError> {
    let Some(token) = session.token().await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    match state.backend.create_record(&token, &record).await {
        Ok(()) => {
            session
                .flash(FlashLevel::Success, "Record created successfully!")
                .await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(BackendError::Unauthorized) => expel(&session).await,
        Err(e) => {
            session
                .flash(FlashLevel::Danger, format!("Error: {}", e))
                .await?;
            let flashes = session.take_flashes().await?;
            // Re-render with the submitted values preserved.
            Ok(render_page(&FormTemplate::create(flashes, &record)))
        }
    }
}

/// Fetch a record and render it into the shared form template.
///
/// If the fetch fails the form is never rendered; the caller lands
/// back on the listing with an error flash.
pub async fn edit_form(
    State(state): State<AppState>,
    Path(nik): Path<String>,
    session: UserSession,
) -> Result<Response, AppError> {
    let Some(token) = session.token().await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    match state.backend.get_record(&token, &nik).await {
        Ok(record) => {
            let flashes = session.take_flashes().await?;
            Ok(render_page(&FormTemplate::edit(flashes, &nik, &record)))
        }
        Err(BackendError::Unauthorized) => expel(&session).await,
        Err(BackendError::Rejected { .. }) => {
            session.flash(FlashLevel::Danger, "Record not found").await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            session
                .flash(FlashLevel::Danger, format!("Error: {}", e))
                .await?;
            Ok(Redirect::to("/").into_response())
        }
    }
}

/// Send an update for an existing record. The NIK travels in the URL;
/// a `nik` form field is ignored.
pub async fn edit_submit(
    State(state): State<AppState>,
    Path(nik): Path<String>,
    session: UserSession,
    Form(record): Form<KtpRecord>,
) -> Result<Response, AppError> {
    let Some(token) = session.token().await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    match state.backend.update_record(&token, &nik, &record).await {
        Ok(()) => {
            session
                .flash(FlashLevel::Success, "Record updated successfully!")
                .await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(BackendError::Unauthorized) => expel(&session).await,
        Err(e) => {
            session
                .flash(FlashLevel::Danger, format!("Error: {}", e))
                .await?;
            let flashes = session.take_flashes().await?;
            Ok(render_page(&FormTemplate::edit(flashes, &nik, &record)))
        }
    }
}

/// Delete a record. Always lands back on the listing; only the flash
/// message differs.
pub async fn delete_record(
    State(state): State<AppState>,
    Path(nik): Path<String>,
    session: UserSession,
) -> Result<Response, AppError> {
    let Some(token) = session.token().await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    match state.backend.delete_record(&token, &nik).await {
        Ok(()) => {
            session
                .flash(FlashLevel::Success, "Record deleted successfully!")
                .await?;
        }
        Err(BackendError::Unauthorized) => return expel(&session).await,
        Err(BackendError::Rejected { .. }) => {
            session
                .flash(FlashLevel::Danger, "Failed to delete record")
                .await?;
        }
        Err(e) => {
            session
                .flash(FlashLevel::Danger, format!("Error: {}", e))
                .await?;
        }
    }

    Ok(Redirect::to("/").into_response())
}
