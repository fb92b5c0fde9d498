use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::{debug, error};

use crate::infra::app_state::AppState;

pub async fn ping_handler() -> Json<Value> {
    debug!("Ping endpoint called");
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<Value>) {
    let mut health_status = json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    let mut is_unhealthy = false;

    match state.store.ping().await {
        Ok(()) => {
            health_status["checks"]["database"] = json!({
                "status": "healthy",
                "backend": if state.config().database.url.is_some() {
                    "postgres"
                } else {
                    "memory"
                }
            });
        }
        Err(e) => {
            error!(error = %e, "health check: store unreachable");
            health_status["checks"]["database"] = json!({
                "status": "unhealthy"
            });
            is_unhealthy = true;
        }
    }

    health_status["checks"]["websocket"] = json!({
        "status": "healthy",
        "connections": state.websocket_manager.connection_count()
    });

    if is_unhealthy {
        health_status["status"] = json!("unhealthy");
        (StatusCode::SERVICE_UNAVAILABLE, Json(health_status))
    } else {
        (StatusCode::OK, Json(health_status))
    }
}
