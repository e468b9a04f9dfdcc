pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::cases::handlers;
use crate::images::handlers::handle_create_image;
use crate::state::AppState;
use crate::views::handlers as views;

pub fn build_router(state: AppState) -> Router {
    let images = ServeDir::new(&state.config.image_folder);
    let max_upload_size = state.config.max_upload_size;

    Router::new()
        .route("/health", get(health::health_handler))
        // Cases API
        .route("/api/all/:page", get(handlers::handle_all))
        .route("/api/search/:page", post(handlers::handle_search))
        .route("/api/edit", post(handlers::handle_edit))
        .route("/api/delete/:id", delete(handlers::handle_delete))
        .route("/api/sort_by/:column", post(handlers::handle_sort_by))
        .route("/api/quiz", get(handlers::handle_quiz))
        // Images
        .route(
            "/api/images/create",
            post(handle_create_image).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        .nest_service("/images", images)
        // HTML views
        .route("/", get(views::handle_index))
        .route("/card/:id", get(views::handle_card))
        .route("/card/:id/show", get(views::handle_card_show))
        .with_state(state)
}
