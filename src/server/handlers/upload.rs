//! Document upload and OCR extraction.

use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Redirect, Response};

use super::super::template_structs::UploadTemplate;
use super::super::AppState;
use super::{expel, render_page, AppError};
use crate::backend::BackendError;
use crate::session::{FlashLevel, UserSession};

/// Render the upload page.
pub async fn upload_form(session: UserSession) -> Result<Response, AppError> {
    let Some(_token) = session.token().await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let flashes = session.take_flashes().await?;
    Ok(render_page(&UploadTemplate::new(flashes)))
}

/// Forward the uploaded file to the OCR endpoint and stash the
/// extracted fields for the creation form.
pub async fn upload_submit(
    State(state): State<AppState>,
    session: UserSession,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let Some(token) = session.token().await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    let mut file = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await?;
            file = Some((filename, content_type, bytes));
            break;
        }
    }

    let Some((filename, content_type, bytes)) = file else {
        session.flash(FlashLevel::Danger, "No file part").await?;
        let flashes = session.take_flashes().await?;
        return Ok(render_page(&UploadTemplate::new(flashes)));
    };

    if filename.is_empty() {
        session.flash(FlashLevel::Danger, "No selected file").await?;
        let flashes = session.take_flashes().await?;
        return Ok(render_page(&UploadTemplate::new(flashes)));
    }

    match state
        .backend
        .extract_document(&token, &filename, &content_type, bytes.to_vec())
        .await
    {
        Ok(fields) => {
            session.set_ocr_data(&fields).await?;
            session
                .flash(
                    FlashLevel::Success,
                    "KTP scanned successfully! Please review the data.",
                )
                .await?;
            Ok(Redirect::to("/ktp/add").into_response())
        }
        Err(BackendError::Unauthorized) => expel(&session).await,
        Err(BackendError::Rejected { message, .. }) => {
            session
                .flash(FlashLevel::Danger, format!("OCR failed: {}", message))
                .await?;
            let flashes = session.take_flashes().await?;
            Ok(render_page(&UploadTemplate::new(flashes)))
        }
        Err(e) => {
            session
                .flash(FlashLevel::Danger, format!("Connection error: {}", e))
                .await?;
            let flashes = session.take_flashes().await?;
            Ok(render_page(&UploadTemplate::new(flashes)))
        }
    }
}
