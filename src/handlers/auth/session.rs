// handlers/auth/session.rs - session read and sign-out handlers

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde_json::json;

use crate::error::ApiError;
use crate::session::{
    clear_session_cookie, encode_session, enrich_token, project_session, session_cookie, ClientSession, SessionToken,
};
use crate::state::AppState;

/// GET /api/auth/session - Current client session
///
/// The token is loaded by the `load_session` middleware. Each read reissues
/// the token with a fresh expiry. Without a valid token the response is `{}`.
pub async fn session_get(
    State(state): State<AppState>,
    token: Option<Extension<SessionToken>>,
) -> Result<Response, ApiError> {
    let Some(Extension(token)) = token else {
        return Ok(Json(json!({})).into_response());
    };
    let config = &state.config;

    let token = enrich_token(token, None).reissued(config.session.max_age);
    let signed = encode_session(&token, &config.session.secret)?;
    let session = project_session(ClientSession::new(token.expires_at()), &token);

    Ok((
        [(
            header::SET_COOKIE,
            session_cookie(&signed, config.session.max_age, config.session.secure_cookie),
        )],
        Json(session),
    )
        .into_response())
}

/// POST /api/auth/signout - Drop the session cookie
///
/// Expected Output:
/// ```json
/// { "url": "/auth/login" }
/// ```
pub async fn signout_post(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, clear_session_cookie(state.config.session.secure_cookie))],
        Json(json!({ "url": state.config.sign_in_page })),
    )
}
