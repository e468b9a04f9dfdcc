use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use serde::Serialize;

use crate::errors::AppError;
use crate::images::naming::store_image;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ImageCreated {
    pub filename: String,
}

/// POST /api/images/create
/// Expects a multipart form with a `file` part; answers 304 when there is none.
pub async fn handle_create_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let original_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Read error: {e}")))?;

        let filename = store_image(
            &state.config.image_folder,
            &original_name,
            &bytes,
            Local::now().date_naive(),
        )
        .await?;

        return Ok((StatusCode::CREATED, Json(ImageCreated { filename })).into_response());
    }

    Ok(StatusCode::NOT_MODIFIED.into_response())
}
