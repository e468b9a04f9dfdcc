use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub version: &'static str,
    pub cases: i64,
    pub image_folder: String,
}

/// GET /health
/// Confirms the database answers and reports how many cases it holds.
pub async fn health_handler(State(state): State<AppState>) -> Result<Json<HealthReport>, AppError> {
    let cases: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cases")
        .fetch_one(&state.db)
        .await?;

    Ok(Json(HealthReport {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        cases,
        image_folder: state.config.image_folder.display().to_string(),
    }))
}
