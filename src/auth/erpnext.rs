use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::SET_COOKIE, Client, Response};
use serde::{Deserialize, Serialize};
use url::Url;

use super::identity::{Credentials, Identity, Role};
use super::identity_service::{IdentityError, IdentityService};

const LOGIN_METHOD_PATH: &str = "/api/method/login";
const LOGGED_IN_MESSAGE: &str = "Logged In";
const DESK_HOME_PAGE: &str = "/app";
const SESSION_COOKIE: &str = "sid";

/// Delegates credential checks to the ERPNext `login` method.
///
/// Request:
/// ```json
/// { "usr": "user@example.com", "pwd": "secret" }
/// ```
///
/// Successful response (the session id arrives as a `sid` cookie):
/// ```json
/// { "message": "Logged In", "home_page": "/app", "full_name": "Administrator" }
/// ```
#[derive(Debug, Clone)]
pub struct ErpNextIdentityService {
    client: Client,
    login_url: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    usr: &'a str,
    pwd: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginEnvelope {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    home_page: Option<String>,
}

impl ErpNextIdentityService {
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, IdentityError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IdentityError::Unavailable(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            login_url: format!("{}{}", base_url.as_str().trim_end_matches('/'), LOGIN_METHOD_PATH),
            timeout,
        })
    }

    fn transport_error(&self, err: reqwest::Error) -> IdentityError {
        if err.is_timeout() {
            IdentityError::Timeout(self.timeout)
        } else if err.is_decode() {
            IdentityError::MalformedResponse(err.to_string())
        } else {
            IdentityError::Unavailable(err.to_string())
        }
    }

    async fn read_identity(&self, email: &str, response: Response) -> Result<Option<Identity>, IdentityError> {
        let sid = session_id(&response);
        let envelope: LoginEnvelope = response.json().await.map_err(|e| self.transport_error(e))?;

        if envelope.message.as_deref() != Some(LOGGED_IN_MESSAGE) {
            tracing::warn!(
                "ERPNext login for {} did not complete: {:?}",
                email,
                envelope.message
            );
            return Ok(None);
        }

        let access_token = sid.ok_or_else(|| {
            IdentityError::MalformedResponse("login succeeded without a session cookie".to_string())
        })?;

        let role = if envelope.home_page.as_deref() == Some(DESK_HOME_PAGE) {
            Role::Admin
        } else {
            Role::User
        };
        let name = envelope
            .full_name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| email.to_string());

        Ok(Some(Identity::new(email, email, name, role, access_token)))
    }
}

#[async_trait]
impl IdentityService for ErpNextIdentityService {
    fn name(&self) -> &'static str {
        "erpnext"
    }

    async fn login(&self, credentials: &Credentials) -> Result<Option<Identity>, IdentityError> {
        let response = self
            .client
            .post(&self.login_url)
            .json(&LoginRequest {
                usr: &credentials.email,
                pwd: &credentials.password,
            })
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status.is_success() {
            return self.read_identity(&credentials.email, response).await;
        }
        if status.is_client_error() {
            tracing::debug!("ERPNext rejected login for {} with {}", credentials.email, status);
            return Ok(None);
        }

        Err(IdentityError::Rejected {
            status: status.as_u16(),
        })
    }
}

/// Value of the `sid` cookie set by the login response. ERPNext sets `Guest`
/// for anonymous sessions, which is not a usable token.
fn session_id(response: &Response) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|cookie| cookie.split(';').next())
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty() && value != "Guest")
}
