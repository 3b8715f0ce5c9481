pub mod health;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::services::ServeDir;

use crate::analysis::handlers;
use crate::state::AppState;

/// GET /
async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "this message is from server" }))
}

pub fn build_router(state: AppState) -> Router {
    let public = ServeDir::new(&state.config.public_dir);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health::health_handler))
        .route("/resume/upload", post(handlers::handle_resume_upload))
        .fallback_service(public)
        .with_state(state)
}
