// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::session::SessionError;

pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields";
pub const REGISTRATION_DISABLED: &str = "Registration is currently disabled pending ERPNext integration.";
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred. Please try again.";

/// Error code returned when the identity service rejects the credentials.
pub const CREDENTIALS_SIGNIN: &str = "CredentialsSignin";
/// Error code returned when the identity service could not be consulted.
pub const IDENTITY_SERVICE_UNAVAILABLE: &str = "IdentityServiceUnavailable";

/// HTTP API error with status codes and client-safe messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationError(String),

    // 401 Unauthorized (credentials not recognised)
    AuthenticationFailure { redirect: String },

    // 500 Internal Server Error (identity service failed during sign-in)
    IdentityServiceUnavailable { redirect: String },

    // 500 Internal Server Error
    UnexpectedError,

    // 503 Service Unavailable (deliberately disabled path)
    FeatureDisabled(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::AuthenticationFailure { .. } => StatusCode::UNAUTHORIZED,
            ApiError::IdentityServiceUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UnexpectedError => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::FeatureDisabled(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError(msg) => msg,
            ApiError::AuthenticationFailure { .. } => CREDENTIALS_SIGNIN,
            ApiError::IdentityServiceUnavailable { .. } => IDENTITY_SERVICE_UNAVAILABLE,
            ApiError::UnexpectedError => UNEXPECTED_ERROR,
            ApiError::FeatureDisabled(msg) => msg,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::AuthenticationFailure { redirect }
            | ApiError::IdentityServiceUnavailable { redirect } => {
                json!({
                    "error": self.message(),
                    "url": redirect
                })
            }
            _ => json!({ "error": self.message() }),
        }
    }
}

impl ApiError {
    pub fn missing_required_fields() -> Self {
        ApiError::ValidationError(MISSING_REQUIRED_FIELDS.to_string())
    }

    pub fn feature_disabled(message: impl Into<String>) -> Self {
        ApiError::FeatureDisabled(message.into())
    }

    pub fn authentication_failure(redirect: impl Into<String>) -> Self {
        ApiError::AuthenticationFailure {
            redirect: redirect.into(),
        }
    }

    pub fn identity_service_unavailable(redirect: impl Into<String>) -> Self {
        ApiError::IdentityServiceUnavailable {
            redirect: redirect.into(),
        }
    }

    /// Generic 500. The caller logs the real cause; the client only sees the
    /// generic message.
    pub fn unexpected() -> Self {
        ApiError::UnexpectedError
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        tracing::error!("Session token error: {}", err);
        ApiError::unexpected()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Request body could not be parsed: {}", err);
        ApiError::unexpected()
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
