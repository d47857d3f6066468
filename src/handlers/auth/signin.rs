// handlers/auth/signin.rs - POST /api/auth/callback/credentials handler

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Json},
};
use serde_json::Value;

use crate::auth::Credentials;
use crate::error::{ApiError, CREDENTIALS_SIGNIN, IDENTITY_SERVICE_UNAVAILABLE};
use crate::session::{encode_session, enrich_token, project_session, session_cookie, ClientSession, SessionToken};
use crate::state::AppState;

/// POST /api/auth/callback/credentials - Sign in with email and password
///
/// Expected Input, as JSON or as an `application/x-www-form-urlencoded` form:
/// ```json
/// { "email": "string", "password": "string" }
/// ```
///
/// Expected Output (Success), with the signed token in a `Set-Cookie` header:
/// ```json
/// {
///   "user": {
///     "name": "Administrator",
///     "email": "admin@example.com",
///     "id": "1",
///     "role": "admin",
///     "accessToken": "..."
///   },
///   "expires": "2025-01-31T00:00:00Z"
/// }
/// ```
///
/// Unrecognised credentials answer 401 `CredentialsSignin`; an identity
/// service failure answers 500 `IdentityServiceUnavailable`. Both carry the
/// sign-in page URL to redirect to.
pub async fn signin_credentials(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let credentials = read_credentials(&headers, &body)?;
    let config = &state.config;

    let identity = match state.authenticator.authorize(&credentials).await {
        Ok(Some(identity)) => identity,
        Ok(None) => {
            return Err(ApiError::authentication_failure(
                config.sign_in_url_with_error(CREDENTIALS_SIGNIN),
            ))
        }
        Err(_) => {
            return Err(ApiError::identity_service_unavailable(
                config.sign_in_url_with_error(IDENTITY_SERVICE_UNAVAILABLE),
            ))
        }
    };

    let token = enrich_token(SessionToken::new(config.session.max_age), Some(&identity));
    let signed = encode_session(&token, &config.session.secret)?;
    let session = project_session(ClientSession::new(token.expires_at()), &token);

    Ok((
        [(
            header::SET_COOKIE,
            session_cookie(&signed, config.session.max_age, config.session.secure_cookie),
        )],
        Json(session),
    ))
}

fn read_credentials(headers: &HeaderMap, body: &[u8]) -> Result<Credentials, ApiError> {
    let is_form = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

    if is_form {
        return Ok(Credentials::from_form(body));
    }

    let body: Value = serde_json::from_slice(body)?;
    Ok(Credentials::from_json(&body))
}
