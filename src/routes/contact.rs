use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::HeaderMap;
use axum::http::header::CONTENT_TYPE;
use serde_json::{Value, json};

use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::{parser, pipeline, validate};

pub async fn submit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, AppError> {
    let body = body?;
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());

    let request = parser::parse_body(content_type, &body)?;
    let draft = validate(request)?;

    let message = pipeline::run(state.store.as_ref(), state.notifier.as_ref(), draft)
        .await
        .map_err(AppError::SubmitFailed)?;

    Ok(Json(json!({
        "success": true,
        "message": "Message sent successfully!",
        "data": {
            "id": message.id,
            "name": message.name,
        },
    })))
}

pub async fn list(State(state): State<SharedState>) -> Result<Json<Value>, AppError> {
    let messages = state.store.list_all().await?;

    Ok(Json(json!({
        "success": true,
        "count": messages.len(),
        "data": messages,
    })))
}
