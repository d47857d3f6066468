use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /api/auth/providers - Sign-in providers available to the frontend
pub async fn providers_get(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "credentials": {
            "id": "credentials",
            "name": "ERPNext",
            "type": "credentials",
            "signinUrl": state.config.sign_in_page,
            "callbackUrl": "/api/auth/callback/credentials"
        }
    }))
}
