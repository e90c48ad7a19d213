//! Dashboard: the paginated, searchable record listing.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use super::super::template_structs::{DashboardTemplate, RecordRow};
use super::super::AppState;
use super::{expel, render_page, AppError};
use crate::backend::BackendError;
use crate::session::{FlashLevel, UserSession};

/// Records shown per dashboard page.
pub const PAGE_SIZE: u64 = 5;

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    page: Option<String>,
    search: Option<String>,
}

/// Offset of the first record on a page.
fn page_offset(page: u64) -> u64 {
    page.saturating_sub(1) * PAGE_SIZE
}

/// Number of pages needed for a filtered total.
fn total_pages(total_records: u64) -> u64 {
    total_records.div_ceil(PAGE_SIZE)
}

/// Render the record listing.
///
/// The page always renders: a failed backend call yields an empty
/// listing and a flash, never an error page.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
    session: UserSession,
) -> Result<Response, AppError> {
    let Some(token) = session.token().await? else {
        return Ok(Redirect::to("/login").into_response());
    };

    // Non-numeric page input falls back to the first page.
    let page = params
        .page
        .as_deref()
        .and_then(|p| p.parse::<u64>().ok())
        .unwrap_or(1)
        .max(1);
    let search = params.search.unwrap_or_default();
    let start = page_offset(page);

    match state
        .backend
        .list_records(&token, start, PAGE_SIZE, &search)
        .await
    {
        Ok(listing) => {
            let records: Vec<RecordRow> =
                listing.records.iter().map(RecordRow::from_record).collect();
            let flashes = session.take_flashes().await?;
            Ok(render_page(&DashboardTemplate::new(
                flashes,
                records,
                page,
                total_pages(listing.total_filtered),
                listing.total_filtered,
                search,
            )))
        }
        Err(BackendError::Unauthorized) => expel(&session).await,
        Err(e) => {
            let (level, message) = match &e {
                BackendError::Rejected { status, .. } => {
                    tracing::warn!("record listing failed with status {}", status);
                    (FlashLevel::Warning, "Failed to fetch data".to_string())
                }
                _ => (FlashLevel::Danger, format!("Error: {}", e)),
            };
            session.flash(level, message).await?;
            let flashes = session.take_flashes().await?;
            Ok(render_page(&DashboardTemplate::new(
                flashes,
                Vec::new(),
                1,
                0,
                0,
                search,
            )))
        }
    }
}
