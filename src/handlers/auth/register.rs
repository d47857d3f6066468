// handlers/auth/register.rs - POST /api/auth/register handler

use axum::body::Bytes;
use serde_json::Value;

use crate::error::{ApiError, REGISTRATION_DISABLED};

/// Registration form as submitted by the frontend.
#[derive(Debug, Default)]
pub struct RegistrationRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub password_confirm: Option<String>,
    pub name: Option<String>,
    pub company: Option<String>,
}

impl RegistrationRequest {
    /// Only string members of a JSON object are taken. A member of any other
    /// type, or a body that is not an object, leaves the field unset.
    pub fn from_json(body: &Value) -> Self {
        let field = |name: &str| {
            body.as_object()
                .and_then(|object| object.get(name))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self {
            email: field("email"),
            password: field("password"),
            password_confirm: field("passwordConfirm"),
            name: field("name"),
            company: field("company"),
        }
    }

    /// All five fields present and non-empty.
    pub fn is_complete(&self) -> bool {
        [
            &self.email,
            &self.password,
            &self.password_confirm,
            &self.name,
            &self.company,
        ]
        .iter()
        .all(|field| field.as_deref().is_some_and(|v| !v.is_empty()))
    }
}

/// POST /api/auth/register - Register a new account
///
/// Expected Input:
/// ```json
/// {
///   "email": "string",
///   "password": "string",
///   "passwordConfirm": "string",
///   "name": "string",
///   "company": "string"
/// }
/// ```
///
/// Account creation is disabled until the ERPNext integration lands, so the
/// handler has no success response:
/// - 400 `{"error": "Missing required fields"}`
/// - 503 `{"error": "Registration is currently disabled pending ERPNext integration."}`
/// - 500 `{"error": "An unexpected error occurred. Please try again."}` for a body that is not JSON
pub async fn register_post(body: Bytes) -> ApiError {
    let body: Value = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(err) => {
            tracing::error!("Registration error: {}", err);
            return ApiError::unexpected();
        }
    };
    let request = RegistrationRequest::from_json(&body);

    if !request.is_complete() {
        return ApiError::missing_required_fields();
    }

    tracing::info!(
        "Registration refused for {}: registration is disabled",
        request.email.as_deref().unwrap_or_default()
    );
    ApiError::feature_disabled(REGISTRATION_DISABLED)
}
