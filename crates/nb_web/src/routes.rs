use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers;
use crate::AppState;

pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/summarize", post(handlers::summarize))
        .route(
            "/api/history",
            get(handlers::list_history).delete(handlers::clear_history),
        )
        .route("/api/history/:id", get(handlers::get_history_entry))
        .route("/api/sample", get(handlers::sample_article))
}
