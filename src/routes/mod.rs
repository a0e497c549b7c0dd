pub mod contact;

use axum::Json;
use axum::Router;
use axum::routing::{get, post};
use serde_json::{Value, json};

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        .route("/api/contact", post(contact::submit))
        .route("/api/messages", get(contact::list))
}

pub fn liveness_routes() -> Router<SharedState> {
    Router::new().route("/", get(liveness))
}

async fn liveness() -> Json<Value> {
    Json(json!({ "message": "Backend is working!" }))
}
