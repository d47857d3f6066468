#![allow(dead_code)]

use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use url::Url;

use portal_auth::config::{AuthConfig, IdentityBackend};
use portal_auth::routes;
use portal_auth::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const ADMIN_EMAIL: &str = "admin@alsakronline.com";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Development config with a fixed secret and the mock identity backend.
pub fn test_config() -> AuthConfig {
    let mut config = AuthConfig::development();
    config.session.secret = TEST_SECRET.to_string();
    config
}

/// Config pointing the ERPNext backend at `base_url`.
pub fn erpnext_config(base_url: &str, timeout: Duration) -> Result<AuthConfig> {
    let mut config = test_config();
    config.identity.backend = IdentityBackend::ErpNext;
    config.identity.base_url = Url::parse(base_url)?;
    config.identity.timeout = timeout;
    Ok(config)
}

/// Serve `router` on a free local port for the lifetime of the test runtime.
pub async fn serve(router: Router) -> Result<TestServer> {
    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });

    Ok(TestServer {
        port,
        base_url: format!("http://127.0.0.1:{}", port),
    })
}

pub async fn spawn_app(config: AuthConfig) -> Result<TestServer> {
    let state = AppState::from_config(config)?;
    serve(routes::app(state)).await
}

/// Value of the session cookie from a response's `Set-Cookie` headers.
pub fn session_cookie_value(res: &reqwest::Response) -> Option<String> {
    res.headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|c| c.split(';').next())
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == portal_auth::session::SESSION_COOKIE_NAME)
        .map(|(_, value)| value.to_string())
}
