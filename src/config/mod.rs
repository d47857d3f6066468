use std::env;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const DEFAULT_IDENTITY_SERVICE_URL: &str = "http://erpnext-backend:8000";
pub const DEFAULT_SESSION_SECRET: &str = "CHANGE_ME";
pub const DEFAULT_SIGN_IN_PAGE: &str = "/auth/login";
pub const DEFAULT_MOCK_ADMIN_EMAIL: &str = "admin@alsakronline.com";

/// Authentication configuration, resolved once at startup and shared read-only
/// through the router state.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub environment: Environment,
    pub identity: IdentityConfig,
    pub session: SessionConfig,
    pub sign_in_page: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityBackend {
    /// Fixed single-account policy used until the ERPNext login is wired up.
    Mock,
    ErpNext,
}

#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub backend: IdentityBackend,
    pub base_url: Url,
    pub timeout: Duration,
    pub mock_admin_email: String,
}

#[derive(Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub max_age: Duration,
    pub secure_cookie: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },

    #[error("session secret must be set in production")]
    DefaultSecretInProduction,

    #[error("mock identity backend cannot be used in production")]
    MockBackendInProduction,
}

impl AuthConfig {
    /// Build the configuration from environment defaults and per-variable overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()?;

        config.validate()?;
        Ok(config)
    }

    fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Identity service overrides
        if let Some(v) = first_var(&["ERPNEXT_URL", "NEXT_PUBLIC_ERP_URL"]) {
            self.identity.base_url = Url::parse(&v).map_err(|e| ConfigError::InvalidValue {
                var: "ERPNEXT_URL",
                reason: e.to_string(),
            })?;
        }
        if let Ok(v) = env::var("IDENTITY_BACKEND") {
            self.identity.backend = match v.to_ascii_lowercase().as_str() {
                "mock" => IdentityBackend::Mock,
                "erpnext" => IdentityBackend::ErpNext,
                other => {
                    return Err(ConfigError::InvalidValue {
                        var: "IDENTITY_BACKEND",
                        reason: format!("expected 'mock' or 'erpnext', got '{}'", other),
                    })
                }
            };
        }
        if let Ok(v) = env::var("IDENTITY_TIMEOUT_SECS") {
            let secs = v.parse().unwrap_or(self.identity.timeout.as_secs());
            self.identity.timeout = Duration::from_secs(secs);
        }
        if let Ok(v) = env::var("MOCK_ADMIN_EMAIL") {
            self.identity.mock_admin_email = v;
        }

        // Session overrides
        if let Some(v) = first_var(&["SESSION_SECRET", "NEXTAUTH_SECRET"]) {
            self.session.secret = v;
        }
        if let Ok(v) = env::var("SESSION_MAX_AGE_SECS") {
            let secs = v.parse().unwrap_or(self.session.max_age.as_secs());
            self.session.max_age = Duration::from_secs(secs);
        }
        if let Ok(v) = env::var("SESSION_SECURE_COOKIE") {
            self.session.secure_cookie = v.parse().unwrap_or(self.session.secure_cookie);
        }

        if let Ok(v) = env::var("AUTH_SIGN_IN_PAGE") {
            self.sign_in_page = v;
        }

        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.session.secret.is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "SESSION_SECRET",
                reason: "must not be empty".to_string(),
            });
        }
        if self.identity.timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                var: "IDENTITY_TIMEOUT_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.session.max_age.is_zero() {
            return Err(ConfigError::InvalidValue {
                var: "SESSION_MAX_AGE_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }
        if !self.sign_in_page.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                var: "AUTH_SIGN_IN_PAGE",
                reason: "must be an absolute path".to_string(),
            });
        }

        if self.environment == Environment::Production {
            if self.session.secret == DEFAULT_SESSION_SECRET {
                return Err(ConfigError::DefaultSecretInProduction);
            }
            if self.identity.backend == IdentityBackend::Mock {
                return Err(ConfigError::MockBackendInProduction);
            }
        }

        Ok(())
    }

    /// Path of the sign-in page with an `error` query parameter appended.
    pub fn sign_in_url_with_error(&self, code: &str) -> String {
        format!("{}?error={}", self.sign_in_page, code)
    }

    pub fn uses_default_secret(&self) -> bool {
        self.session.secret == DEFAULT_SESSION_SECRET
    }

    fn base(environment: Environment, backend: IdentityBackend, secure_cookie: bool) -> Self {
        Self {
            environment,
            identity: IdentityConfig {
                backend,
                base_url: default_identity_url(),
                timeout: Duration::from_secs(10),
                mock_admin_email: DEFAULT_MOCK_ADMIN_EMAIL.to_string(),
            },
            session: SessionConfig {
                secret: DEFAULT_SESSION_SECRET.to_string(),
                max_age: Duration::from_secs(30 * 24 * 60 * 60), // 30 days
                secure_cookie,
            },
            sign_in_page: DEFAULT_SIGN_IN_PAGE.to_string(),
        }
    }

    pub fn development() -> Self {
        Self::base(Environment::Development, IdentityBackend::Mock, false)
    }

    pub fn staging() -> Self {
        Self::base(Environment::Staging, IdentityBackend::ErpNext, true)
    }

    pub fn production() -> Self {
        let mut config = Self::base(Environment::Production, IdentityBackend::ErpNext, true);
        config.identity.timeout = Duration::from_secs(5);
        config
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"[redacted]")
            .field("max_age", &self.max_age)
            .field("secure_cookie", &self.secure_cookie)
            .finish()
    }
}

fn default_identity_url() -> Url {
    Url::parse(DEFAULT_IDENTITY_SERVICE_URL).expect("default identity service URL is valid")
}

fn first_var(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|v| !v.is_empty())
}
