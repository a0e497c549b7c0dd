use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::store::StoreError;
use crate::submission::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid request body")]
    InvalidBody(#[from] serde_json::Error),
    #[error("Request body too large")]
    BodyTooLarge(#[source] BytesRejection),
    #[error("Invalid request body")]
    UnreadableBody(#[source] BytesRejection),
    /// A contact submission could not be stored. The client only sees a
    /// generic retry message.
    #[error("Failed to send message. Please try again.")]
    SubmitFailed(#[source] StoreError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::BodyTooLarge(rejection)
        } else {
            AppError::UnreadableBody(rejection)
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidBody(_) | AppError::UnreadableBody(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::BodyTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::SubmitFailed(_) | AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::SubmitFailed(err) | AppError::Store(err) => {
                tracing::error!(error = ?err, "Store error: {err}");
            }
            AppError::Validation(err) => tracing::debug!("Rejected submission: {err:?}"),
            AppError::InvalidBody(err) => tracing::debug!("Rejected body: {err}"),
            AppError::BodyTooLarge(err) | AppError::UnreadableBody(err) => {
                tracing::debug!("Rejected body: {err}")
            }
        }

        let body = json!({ "success": false, "message": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
