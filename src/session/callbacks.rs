use chrono::{DateTime, Utc};
use serde::Serialize;

use super::token::SessionToken;
use crate::auth::{Identity, Role};

/// User record of the client-visible session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// Session object returned to the frontend. Rebuilt from the token on every
/// read and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientSession {
    pub user: SessionUser,
    pub expires: DateTime<Utc>,
}

impl ClientSession {
    pub fn new(expires: DateTime<Utc>) -> Self {
        Self {
            user: SessionUser::default(),
            expires,
        }
    }
}

/// Token callback. Runs on first issuance with the new identity and on every
/// refresh without one; only the first call writes identity fields.
pub fn enrich_token(mut token: SessionToken, identity: Option<&Identity>) -> SessionToken {
    let Some(identity) = identity else {
        return token;
    };

    token.name = Some(identity.name().to_string());
    token.email = Some(identity.email().to_string());
    token.sub = Some(identity.id().to_string());
    token.id = Some(identity.id().to_string());
    token.role = Some(identity.role());
    token.access_token = Some(identity.access_token().to_string());
    token
}

/// Session callback. Copies the identity claims present on the token onto the
/// session's user; absent claims leave the user field untouched.
pub fn project_session(mut session: ClientSession, token: &SessionToken) -> ClientSession {
    if let Some(name) = &token.name {
        session.user.name = Some(name.clone());
    }
    if let Some(email) = &token.email {
        session.user.email = Some(email.clone());
    }
    if let Some(id) = &token.id {
        session.user.id = Some(id.clone());
    }
    if let Some(role) = token.role {
        session.user.role = Some(role);
    }
    if let Some(access_token) = &token.access_token {
        session.user.access_token = Some(access_token.clone());
    }
    session
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Credentials, IdentityService, MockIdentityService};
    use std::time::Duration;

    async fn admin_identity() -> Identity {
        MockIdentityService::new("admin@alsakronline.com")
            .login(&Credentials::new("admin@alsakronline.com", "pw"))
            .await
            .unwrap()
            .expect("identity")
    }

    #[tokio::test]
    async fn test_enrichment_copies_identity_fields() {
        let identity = admin_identity().await;
        let token = enrich_token(SessionToken::new(Duration::from_secs(60)), Some(&identity));

        assert_eq!(token.id.as_deref(), Some("1"));
        assert_eq!(token.role, Some(Role::Admin));
        assert_eq!(token.access_token.as_deref(), Some("mock-token"));
        assert_eq!(token.email.as_deref(), Some("admin@alsakronline.com"));
    }

    #[tokio::test]
    async fn test_enrichment_is_write_once() {
        let identity = admin_identity().await;
        let enriched = enrich_token(SessionToken::new(Duration::from_secs(60)), Some(&identity));

        let refreshed = enrich_token(enriched.clone(), None);
        assert_eq!(refreshed, enriched);
    }

    #[test]
    fn test_enrichment_without_identity_leaves_blank_token() {
        let token = SessionToken::new(Duration::from_secs(60));
        assert_eq!(enrich_token(token.clone(), None), token);
    }

    #[tokio::test]
    async fn test_projection_is_idempotent() {
        let identity = admin_identity().await;
        let token = enrich_token(SessionToken::new(Duration::from_secs(60)), Some(&identity));

        let once = project_session(ClientSession::new(token.expires_at()), &token);
        let twice = project_session(once.clone(), &token);
        assert_eq!(once, twice);
        assert_eq!(once.user.role, Some(Role::Admin));
        assert_eq!(once.user.access_token.as_deref(), Some("mock-token"));
    }

    #[test]
    fn test_projection_tolerates_missing_claims() {
        let token = SessionToken::new(Duration::from_secs(60));
        let session = project_session(ClientSession::new(token.expires_at()), &token);
        assert_eq!(session.user, SessionUser::default());
    }

    #[tokio::test]
    async fn test_client_session_shape() {
        let identity = admin_identity().await;
        let token = enrich_token(SessionToken::new(Duration::from_secs(60)), Some(&identity));
        let session = project_session(ClientSession::new(token.expires_at()), &token);

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["user"]["id"], "1");
        assert_eq!(value["user"]["role"], "admin");
        assert_eq!(value["user"]["accessToken"], "mock-token");
        assert!(value["expires"].is_string());
        assert!(value["user"].get("password").is_none());
    }
}
