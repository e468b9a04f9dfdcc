use axum::{
    extract::{Path, State},
    response::Html,
};

use crate::cases::fields::CaseTuple;
use crate::cases::store;
use crate::errors::AppError;
use crate::state::AppState;
use crate::views::html::{render_card, render_index, GridConfig};

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.config.database, &GridConfig::default()))
}

/// GET /card/:id
pub async fn handle_card(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    card_page(&state, id, false).await
}

/// GET /card/:id/show
pub async fn handle_card_show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    card_page(&state, id, true).await
}

async fn card_page(state: &AppState, id: i64, show: bool) -> Result<Html<String>, AppError> {
    let record = store::find(&state.db, id).await?;
    let card = CaseTuple::from_record(record.as_ref());
    Ok(Html(render_card(&card, show)))
}
