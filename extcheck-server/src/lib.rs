//! # extcheck server
//!
//! HTTP front end of the extension blocklist. Exposes the extension REST
//! API, a WebSocket topic that mirrors every committed change, and
//! liveness/health probes.

pub mod handlers;
pub mod infra;
pub mod routes;

use axum::{Router, http::HeaderValue, routing::get};
use extcheck_contracts::routes as paths;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub use infra::app_state::AppState;

use handlers::health::{health_handler, ping_handler};

/// Builds the full router: probes, extension API and WebSocket topic.
pub fn create_app(state: AppState) -> Router {
    // Build CORS layer (permissive in dev, allow-list otherwise)
    let cors_layer = if state.config().dev_mode {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config()
            .cors
            .allowed_origins
            .iter()
            .filter(|origin| origin.trim() != "*")
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();
        let allow_origin = if state.config().cors.allows_any_origin() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route(paths::PING, get(ping_handler))
        .route(paths::HEALTH, get(health_handler))
        .merge(routes::create_api_router())
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
