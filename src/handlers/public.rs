use axum::extract::State;
use axum::response::Json;
use serde_json::{json, Value};

use super::AppState;

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Nimbus Portal",
            "version": version,
            "description": "Portal gateway for the Nimbus tenant dashboard",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "sidebar": "/api/navigation/sidebar (public, items reflect the caller's view)",
                "whoami": "/api/session/whoami (public)",
                "pages": "/api/pages/*path (JSON page data, status-coded denials)",
                "portal": "any other GET path (guarded page navigation, redirect denials)",
            }
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let now = chrono::Utc::now();

    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": now,
            "routes": state.registry.routes().len(),
            "sidebar_sections": state.registry.sidebar().len()
        }
    }))
}
