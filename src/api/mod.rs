use crate::error::AppError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use log::debug;
use serde::Serialize;

pub mod conversations;
pub mod dashboard;
pub mod simulations;

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::ConversationNotFound(_) | AppError::JobNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Rejected(_) => StatusCode::BAD_REQUEST,
            AppError::ReplyDropped(_) => StatusCode::GONE,
        };
        debug!("request failed with {status}: {self}");

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// All endpoints. Services are resolved per request, so the caller must attach a provider.
pub fn router() -> Router {
    Router::new()
        .nest("/conversations", conversations::router())
        .nest("/uploads", simulations::uploads_router())
        .nest("/marketing", simulations::marketing_router())
        .merge(dashboard::router())
}
