use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::cases::fields::{CaseField, CaseTuple};
use crate::cases::paging::{page_response, PageResponse};
use crate::cases::quiz::{build_quiz, DueFilter};
use crate::cases::search::search;
use crate::cases::sort::{SortColumn, SortOrder};
use crate::cases::store;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    pub id: Option<i64>,
    #[serde(rename = "fieldName")]
    pub field_name: String,
    #[serde(default)]
    pub data: Value,
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub id: i64,
    pub front: String,
}

#[derive(Debug, Deserialize)]
pub struct QuizQuery {
    #[serde(default)]
    pub due: DueFilter,
    pub tag: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub data: Vec<CaseTuple>,
    pub total: usize,
}

/// GET /api/all/:page
pub async fn handle_all(
    State(state): State<AppState>,
    Path(page): Path<i64>,
    Query(order): Query<SortOrder>,
) -> Result<Json<PageResponse>, AppError> {
    let records = store::fetch_all(&state.db, order).await?;
    Ok(Json(page_response(&records, page, state.config.page_size)))
}

/// POST /api/search/:page
pub async fn handle_search(
    State(state): State<AppState>,
    Path(page): Path<i64>,
    Query(order): Query<SortOrder>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<PageResponse>, AppError> {
    let records = search(store::fetch_all(&state.db, order).await?, &req.q);
    Ok(Json(page_response(&records, page, state.config.page_size)))
}

/// POST /api/edit
pub async fn handle_edit(
    State(state): State<AppState>,
    Json(req): Json<EditRequest>,
) -> Result<(StatusCode, Json<EditResponse>), AppError> {
    let field: CaseField = req.field_name.parse()?;
    let value = field.parse(&req.data)?;
    let outcome = store::edit(&state.db, req.id, field, value, Local::now().naive_local()).await?;
    if outcome.created {
        debug!("Edit of unknown case {:?} created case {}", req.id, outcome.id);
    }
    Ok((StatusCode::CREATED, Json(EditResponse { id: outcome.id })))
}

/// DELETE /api/delete/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<DeleteResponse>), AppError> {
    let front = store::delete(&state.db, id).await?;
    Ok((StatusCode::SEE_OTHER, Json(DeleteResponse { id, front })))
}

/// POST /api/sort_by/:column
/// Applies the toggle to the caller's current order and hands back the new one.
pub async fn handle_sort_by(
    Path(column): Path<String>,
    Query(current): Query<SortOrder>,
) -> Result<(StatusCode, Json<SortOrder>), AppError> {
    let column: SortColumn = column.parse()?;
    Ok((StatusCode::CREATED, Json(current.toggle(column))))
}

/// GET /api/quiz
pub async fn handle_quiz(
    State(state): State<AppState>,
    Query(params): Query<QuizQuery>,
) -> Result<Json<QuizResponse>, AppError> {
    let records = store::fetch_recent_first(&state.db).await?;
    let queue = build_quiz(
        records,
        params.due,
        params.tag.as_deref(),
        Local::now().naive_local(),
        &mut rand::thread_rng(),
    );
    let data: Vec<CaseTuple> = queue
        .iter()
        .map(|record| CaseTuple::from_record(Some(record)))
        .collect();
    Ok(Json(QuizResponse {
        total: data.len(),
        data,
    }))
}
