use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::middleware::load_session;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Sign-in, session and registration
        .merge(auth_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes(state: AppState) -> Router<AppState> {
    use handlers::auth;

    let session_routes = Router::new()
        .route("/api/auth/session", get(auth::session_get))
        .route_layer(middleware::from_fn_with_state(state, load_session));

    Router::new()
        .route("/api/auth/callback/credentials", post(auth::signin_credentials))
        .route("/api/auth/signout", post(auth::signout_post))
        .route("/api/auth/providers", get(auth::providers_get))
        .route("/api/auth/register", post(auth::register_post))
        .merge(session_routes)
}
