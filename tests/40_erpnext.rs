mod common;

use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    http::{header::SET_COOKIE, StatusCode},
    response::{AppendHeaders, IntoResponse, Json, Response},
    routing::post,
    Router,
};
use serde_json::{json, Value};
use url::Url;

use portal_auth::auth::{Credentials, ErpNextIdentityService, IdentityError, IdentityService, Role};

/// Minimal stand-in for the ERPNext `login` method.
async fn fake_login(Json(body): Json<Value>) -> Response {
    match (body["usr"].as_str(), body["pwd"].as_str()) {
        (Some("admin@example.com"), Some("secret")) => (
            AppendHeaders([
                (SET_COOKIE, "full_name=Administrator; Path=/"),
                (SET_COOKIE, "sid=3f1c9a; Path=/; HttpOnly"),
            ]),
            Json(json!({ "message": "Logged In", "home_page": "/app", "full_name": "Administrator" })),
        )
            .into_response(),
        (Some("customer@example.com"), Some("secret")) => (
            [(SET_COOKIE, "sid=77aa01; Path=/; HttpOnly")],
            Json(json!({ "message": "Logged In", "home_page": "/me", "full_name": "" })),
        )
            .into_response(),
        (Some("nosid@example.com"), _) => {
            Json(json!({ "message": "Logged In", "home_page": "/app" })).into_response()
        }
        (Some("twofactor@example.com"), _) => {
            Json(json!({ "verification": { "method": "Email" }, "tmp_id": "abc" })).into_response()
        }
        (Some("broken@example.com"), _) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Traceback (most recent call last)").into_response()
        }
        (Some("garbled@example.com"), _) => (StatusCode::OK, "<html>not json</html>").into_response(),
        (Some("slow@example.com"), _) => {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({ "message": "Logged In" })).into_response()
        }
        _ => (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Invalid Login. Try again." }))).into_response(),
    }
}

async fn erpnext_service(timeout: Duration) -> Result<ErpNextIdentityService> {
    let server = common::serve(Router::new().route("/api/method/login", post(fake_login))).await?;
    let base = Url::parse(&server.base_url)?;
    Ok(ErpNextIdentityService::new(&base, timeout)?)
}

#[tokio::test]
async fn desk_user_login_maps_to_admin_identity() -> Result<()> {
    let service = erpnext_service(Duration::from_secs(5)).await?;

    let identity = service
        .login(&Credentials::new("admin@example.com", "secret"))
        .await?
        .context("identity")?;

    assert_eq!(identity.id(), "admin@example.com");
    assert_eq!(identity.name(), "Administrator");
    assert_eq!(identity.role(), Role::Admin);
    assert_eq!(identity.access_token(), "3f1c9a");
    Ok(())
}

#[tokio::test]
async fn website_user_login_maps_to_user_role() -> Result<()> {
    let service = erpnext_service(Duration::from_secs(5)).await?;

    let identity = service
        .login(&Credentials::new("customer@example.com", "secret"))
        .await?
        .context("identity")?;

    assert_eq!(identity.role(), Role::User);
    // Empty full name falls back to the email
    assert_eq!(identity.name(), "customer@example.com");
    Ok(())
}

#[tokio::test]
async fn bad_credentials_are_no_match() -> Result<()> {
    let service = erpnext_service(Duration::from_secs(5)).await?;

    let result = service.login(&Credentials::new("admin@example.com", "wrong")).await?;
    assert!(result.is_none());
    Ok(())
}

#[tokio::test]
async fn incomplete_login_is_no_match() -> Result<()> {
    let service = erpnext_service(Duration::from_secs(5)).await?;

    let result = service.login(&Credentials::new("twofactor@example.com", "pw")).await?;
    assert!(result.is_none());
    Ok(())
}

#[tokio::test]
async fn server_error_is_surfaced() -> Result<()> {
    let service = erpnext_service(Duration::from_secs(5)).await?;

    let err = service
        .login(&Credentials::new("broken@example.com", "pw"))
        .await
        .expect_err("server error");
    assert!(matches!(err, IdentityError::Rejected { status: 500 }));
    Ok(())
}

#[tokio::test]
async fn malformed_responses_are_surfaced() -> Result<()> {
    let service = erpnext_service(Duration::from_secs(5)).await?;

    for email in ["nosid@example.com", "garbled@example.com"] {
        let err = service
            .login(&Credentials::new(email, "pw"))
            .await
            .expect_err("malformed response");
        assert!(matches!(err, IdentityError::MalformedResponse(_)), "{}: {:?}", email, err);
    }
    Ok(())
}

#[tokio::test]
async fn slow_service_times_out() -> Result<()> {
    let service = erpnext_service(Duration::from_millis(200)).await?;

    let err = service
        .login(&Credentials::new("slow@example.com", "pw"))
        .await
        .expect_err("timeout");
    assert!(matches!(err, IdentityError::Timeout(_)), "{:?}", err);
    Ok(())
}

#[tokio::test]
async fn unreachable_service_is_unavailable() -> Result<()> {
    let dead_port = portpicker::pick_unused_port().context("free port")?;
    let base = Url::parse(&format!("http://127.0.0.1:{}", dead_port))?;
    let service = ErpNextIdentityService::new(&base, Duration::from_secs(2))?;

    let err = service
        .login(&Credentials::new("admin@example.com", "secret"))
        .await
        .expect_err("connection refused");
    assert!(matches!(err, IdentityError::Unavailable(_)), "{:?}", err);
    Ok(())
}

#[tokio::test]
async fn sign_in_through_erpnext_sets_session() -> Result<()> {
    let fake = common::serve(Router::new().route("/api/method/login", post(fake_login))).await?;
    let server = common::spawn_app(common::erpnext_config(&fake.base_url, Duration::from_secs(5))?).await?;

    let res = reqwest::Client::new()
        .post(server.url("/api/auth/callback/credentials"))
        .json(&json!({ "email": "admin@example.com", "password": "secret" }))
        .send()
        .await?;

    assert_eq!(res.status(), reqwest::StatusCode::OK);
    assert!(common::session_cookie_value(&res).is_some());
    let body = res.json::<Value>().await?;
    assert_eq!(body["user"]["accessToken"], "3f1c9a");
    assert_eq!(body["user"]["role"], "admin");
    Ok(())
}
