use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::Role;

/// Server-held session claims, signed as an HS256 JWT with the session secret.
///
/// The identity fields stay empty until `enrich_token` runs with a freshly
/// authenticated `Identity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionToken {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(rename = "accessToken", default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl SessionToken {
    pub fn new(max_age: Duration) -> Self {
        let now = Utc::now();
        let expiry = chrono::Duration::from_std(max_age).unwrap_or_else(|_| chrono::Duration::days(30));

        Self {
            name: None,
            email: None,
            sub: None,
            id: None,
            role: None,
            access_token: None,
            iat: now.timestamp(),
            exp: (now + expiry).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Same claims with a fresh issue time and expiry.
    pub fn reissued(mut self, max_age: Duration) -> Self {
        let fresh = Self::new(max_age);
        self.iat = fresh.iat;
        self.exp = fresh.exp;
        self
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0).single().unwrap_or_else(Utc::now)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session secret is not configured")]
    MissingSecret,

    #[error("failed to sign session token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("invalid session token: {0}")]
    Decode(#[source] jsonwebtoken::errors::Error),
}

pub fn encode_session(token: &SessionToken, secret: &str) -> Result<String, SessionError> {
    if secret.is_empty() {
        return Err(SessionError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::new(Algorithm::HS256), token, &encoding_key).map_err(SessionError::Encode)
}

/// Verify signature and expiry, then return the claims.
pub fn decode_session(raw: &str, secret: &str) -> Result<SessionToken, SessionError> {
    if secret.is_empty() {
        return Err(SessionError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    decode::<SessionToken>(raw, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(SessionError::Decode)
}
