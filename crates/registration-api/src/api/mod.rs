//! HTTP API for event registrations.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::logging_middleware;
pub use types::*;

use crate::config::{AllowedOrigins, Config, CorsConfig};
use axum::{
    http::{HeaderValue, Method},
    middleware as axum_middleware,
    routing::get,
    Router,
};
use registration_notifier::Notifier;
use registration_store::Store;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeFile,
    trace::TraceLayer,
};
use tracing::warn;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Registration storage backend
    pub store: Arc<Store>,
    /// Operator notification delivery
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    /// Create new application state.
    pub fn new(store: Store, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store: Arc::new(store),
            notifier,
        }
    }
}

/// Create the API router.
pub fn create_router(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route(
            "/api/registrations",
            get(handlers::list_registrations).post(handlers::create_registration),
        )
        .route_service("/admin", ServeFile::new(config.admin.resolved_page_path()))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the CORS layer from the configured origins.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    match config.origins() {
        AllowedOrigins::Any => layer.allow_origin(Any),
        AllowedOrigins::List(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(%origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            layer.allow_origin(AllowOrigin::list(origins))
        }
    }
}
