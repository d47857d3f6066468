use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::session::{decode_session, extract_session_token, SessionToken};
use crate::state::AppState;

/// Session loading middleware. Verifies the session token when one is sent
/// and injects the `SessionToken` into request extensions. Never rejects:
/// a missing, tampered or expired token simply leaves no session.
pub async fn load_session(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    if let Some(raw) = extract_session_token(request.headers()) {
        match decode_session(&raw, &state.config.session.secret) {
            Ok(token) => {
                request.extensions_mut().insert::<SessionToken>(token);
            }
            Err(err) => {
                tracing::debug!("Ignoring session token: {}", err);
            }
        }
    }

    next.run(request).await
}
