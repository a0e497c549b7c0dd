pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod models;
pub mod notify;
pub mod routes;
pub mod state;
pub mod store;
pub mod submission;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::{Config, SmtpConfig};
use crate::email::SmtpNotifier;
use crate::notify::{DisabledNotifier, Notifier};
use crate::state::{AppState, SharedState};
use crate::store::MessageStore;

pub fn build_app(
    store: Arc<dyn MessageStore>,
    notifier: Arc<dyn Notifier>,
    config: &Config,
) -> Router {
    let state: SharedState = Arc::new(AppState { store, notifier });

    Router::new()
        .merge(routes::liveness_routes())
        .merge(routes::api_routes())
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
        .with_state(state)
}

/// An explicit origin list allows credentials. No list means any origin.
pub fn cors_layer(origins: &[HeaderValue]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins.iter().cloned()))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

/// Falls back to a disabled notifier when SMTP is missing or unusable, so
/// submissions keep being stored.
pub fn build_notifier(smtp: Option<&SmtpConfig>) -> Arc<dyn Notifier> {
    let Some(smtp) = smtp else {
        tracing::warn!("EMAIL_USER/EMAIL_PASS not set, email notifications disabled");
        return Arc::new(DisabledNotifier);
    };

    match SmtpNotifier::new(smtp) {
        Ok(notifier) => {
            tracing::info!("Email configured for {} via {}:{}", smtp.to, smtp.host, smtp.port);
            Arc::new(notifier)
        }
        Err(e) => {
            tracing::warn!("SMTP not available, email notifications disabled: {e}");
            Arc::new(DisabledNotifier)
        }
    }
}
