use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use nb_core::ErrorResponse;

/// Pipeline and storage errors rendered as `{ error, details? }`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, body: ErrorResponse) -> Self {
        Self { status, body }
    }

    pub fn not_found(message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, ErrorResponse::new(message))
    }
}

impl From<nb_core::Error> for ApiError {
    fn from(err: nb_core::Error) -> Self {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, err.to_response())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
