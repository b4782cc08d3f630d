use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use nb_core::sample::SAMPLE_ARTICLE;
use nb_core::{ErrorResponse, HistoryEntry, SummaryResult};

use crate::error::ApiError;
use crate::AppState;

const INVALID_BODY_MESSAGE: &str = "Request body must be a JSON object with a text field";

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SampleArticle {
    pub text: &'static str,
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummaryResult>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected summarize request body");
        ApiError::new(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(INVALID_BODY_MESSAGE).with_details(rejection.body_text()),
        )
    })?;

    let text = request.text.unwrap_or_default();
    let summary = state.pipeline.summarize(&text).await?;

    if let Err(e) = state.history.record(&summary).await {
        tracing::warn!(error = %e, "Failed to record summary in history");
    }

    Ok(Json(summary))
}

pub async fn list_history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    Ok(Json(state.history.list().await?))
}

pub async fn get_history_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<HistoryEntry>, ApiError> {
    state
        .history
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("History entry not found"))
}

pub async fn clear_history(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    state.history.clear().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn sample_article() -> Json<SampleArticle> {
    Json(SampleArticle {
        text: SAMPLE_ARTICLE,
    })
}
