// handlers/mod.rs - HTTP handlers
pub mod auth;

use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - Service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "portal-auth",
            "version": version,
            "description": "Credential sign-in and session issuance backed by ERPNext",
            "endpoints": {
                "signin": "POST /api/auth/callback/credentials",
                "session": "GET /api/auth/session",
                "signout": "POST /api/auth/signout",
                "providers": "GET /api/auth/providers",
                "register": "POST /api/auth/register (disabled)",
            }
        }
    }))
}

/// GET /health - Liveness. Does not call the identity service.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
            "environment": state.config.environment,
            "identity_backend": state.authenticator.backend_name(),
        }
    }))
}
