use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::info;

use crate::entries::filter::{EntryFilter, ListParams};
use crate::entries::summary::{SummaryResponse, SummaryWindow};
use crate::entries::validation::{validate_new_entry, CreateEntryRequest};
use crate::errors::AppError;
use crate::models::entry::ProductivityEntry;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreateEntryResponse {
    pub message: String,
    pub id: i64,
    pub entry: ProductivityEntry,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn server_today() -> NaiveDate {
    Local::now().date_naive()
}

/// GET /api/entries
pub async fn handle_list_entries(
    State(state): State<AppState>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<ProductivityEntry>>, AppError> {
    let Query(params) = query?;
    let filter = EntryFilter::from_params(&params)?;
    let entries = state.store.list(&filter).await?;
    Ok(Json(entries))
}

/// GET /api/entries/summary
pub async fn handle_summary(
    State(state): State<AppState>,
) -> Result<Json<SummaryResponse>, AppError> {
    let window = SummaryWindow::trailing(server_today(), state.config.summary_window_days);
    let stats = state.store.summary(window).await?;
    Ok(Json(SummaryResponse::new(stats, window)))
}

/// POST /api/entries
pub async fn handle_create_entry(
    State(state): State<AppState>,
    payload: Result<Json<CreateEntryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateEntryResponse>), AppError> {
    let Json(req) = payload?;
    let new_entry = validate_new_entry(&req)?;
    let entry = state.store.insert(new_entry, server_today()).await?;

    info!("Created productivity entry {} for '{}'", entry.id, entry.name);

    Ok((
        StatusCode::CREATED,
        Json(CreateEntryResponse {
            message: "Productivity data submitted successfully".to_string(),
            id: entry.id,
            entry,
        }),
    ))
}

/// GET /api/entries/:id
pub async fn handle_get_entry(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ProductivityEntry>, AppError> {
    let Path(id) = path?;
    state
        .store
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Entry {id} not found")))
}

/// PATCH /api/entries/:id/archive
pub async fn handle_archive_entry(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(id) = path?;
    if !state.store.archive(id).await? {
        return Err(AppError::NotFound(format!("Entry {id} not found")));
    }

    info!("Archived productivity entry {id}");

    Ok(Json(MessageResponse {
        message: format!("Entry {id} archived"),
    }))
}
