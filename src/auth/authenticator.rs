use std::sync::Arc;

use super::erpnext::ErpNextIdentityService;
use super::identity::{Credentials, Identity};
use super::identity_service::{IdentityError, IdentityService};
use super::mock::MockIdentityService;
use crate::config::{AuthConfig, IdentityBackend};

/// Credential Authenticator: presence check, then a single delegated login.
///
/// Returns `Ok(Some(identity))` on success, `Ok(None)` when the credentials
/// are incomplete or not recognised, and `Err` only when the identity service
/// itself failed. Failed calls are never retried.
#[derive(Clone)]
pub struct CredentialAuthenticator {
    service: Arc<dyn IdentityService>,
}

impl CredentialAuthenticator {
    pub fn new(service: Arc<dyn IdentityService>) -> Self {
        Self { service }
    }

    /// Build the authenticator for the backend selected in the configuration.
    pub fn from_config(config: &AuthConfig) -> Result<Self, IdentityError> {
        let service: Arc<dyn IdentityService> = match config.identity.backend {
            IdentityBackend::Mock => {
                tracing::warn!(
                    "Mock identity backend active: {} signs in as admin with any password",
                    config.identity.mock_admin_email
                );
                Arc::new(MockIdentityService::new(config.identity.mock_admin_email.clone()))
            }
            IdentityBackend::ErpNext => Arc::new(ErpNextIdentityService::new(
                &config.identity.base_url,
                config.identity.timeout,
            )?),
        };

        Ok(Self::new(service))
    }

    pub fn backend_name(&self) -> &'static str {
        self.service.name()
    }

    pub async fn authorize(&self, credentials: &Credentials) -> Result<Option<Identity>, IdentityError> {
        if !credentials.is_complete() {
            tracing::debug!("Sign-in rejected: email or password missing");
            return Ok(None);
        }

        match self.service.login(credentials).await {
            Ok(Some(identity)) => {
                tracing::info!(
                    "Sign-in accepted for {} via {} (role {:?})",
                    identity.email(),
                    self.service.name(),
                    identity.role()
                );
                Ok(Some(identity))
            }
            Ok(None) => {
                tracing::info!("Sign-in rejected for {}: credentials not recognised", credentials.email);
                Ok(None)
            }
            Err(err) => {
                tracing::error!(
                    "Sign-in failed for {}: {} backend error: {}",
                    credentials.email,
                    self.service.name(),
                    err
                );
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for CredentialAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialAuthenticator")
            .field("backend", &self.service.name())
            .finish()
    }
}
