pub mod events;
pub mod feed;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use certcal_core::CertCalError;
use serde::Serialize;

use crate::state::AppState;

/// All endpoints, with state attached
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(feed::router())
        .merge(events::router())
        .with_state(state)
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Convert anyhow errors to HTTP responses
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<CertCalError>() {
            Some(err) if err.is_validation() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
