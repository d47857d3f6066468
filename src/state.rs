use std::sync::Arc;

use crate::auth::{CredentialAuthenticator, IdentityError};
use crate::config::AuthConfig;

/// Read-only state shared by every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AuthConfig>,
    pub authenticator: CredentialAuthenticator,
}

impl AppState {
    pub fn new(config: AuthConfig, authenticator: CredentialAuthenticator) -> Self {
        Self {
            config: Arc::new(config),
            authenticator,
        }
    }

    /// Wire the authenticator for the configured identity backend.
    pub fn from_config(config: AuthConfig) -> Result<Self, IdentityError> {
        let authenticator = CredentialAuthenticator::from_config(&config)?;
        Ok(Self::new(config, authenticator))
    }
}
