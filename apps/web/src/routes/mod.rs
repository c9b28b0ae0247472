pub mod health;
pub mod page;

use axum::{http::Uri, routing::get, Router};

use crate::errors::AppError;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(page::handle_index).post(page::handle_submit))
        .route("/health", get(health::health_handler))
        .fallback(not_found)
        .with_state(state)
}
