//! API Routes
//!
//! Configures the Axum router with all task board endpoints.

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer,
};
use tracing::warn;

use super::handlers::{
    board_handler, create_handler, delete_handler, get_handler, health_handler, list_handler,
    stats_handler, update_handler, AppState,
};
use crate::config::Config;

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - Body limit: rejects request bodies over `config.body_limit` bytes
/// - CORS: only `config.allowed_origins`, only the methods the API uses
/// - Tracing: logs all requests
///
/// When `config.static_dir` is set, unmatched paths are served from it.
pub fn create_router(state: AppState, config: &Config) -> Router {
    let mut router = Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/stats", get(stats_handler))
        .route("/api/todos", get(list_handler).post(create_handler))
        .route("/api/todos/board", get(board_handler))
        .route(
            "/api/todos/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        );

    if let Some(dir) = &config.static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(RequestBodyLimitLayer::new(config.body_limit))
        .layer(cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
