use async_trait::async_trait;

use super::identity::{Credentials, Identity, Role};
use super::identity_service::{IdentityError, IdentityService};

/// Placeholder policy used until the ERPNext login is configured: one known
/// email signs in as administrator with any non-empty password.
///
/// This accepts any password for that account. It is refused in production
/// by `AuthConfig::from_env` and logged as a warning at startup.
#[derive(Debug, Clone)]
pub struct MockIdentityService {
    admin_email: String,
}

impl MockIdentityService {
    pub fn new(admin_email: impl Into<String>) -> Self {
        Self {
            admin_email: admin_email.into(),
        }
    }
}

#[async_trait]
impl IdentityService for MockIdentityService {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn login(&self, credentials: &Credentials) -> Result<Option<Identity>, IdentityError> {
        if credentials.email != self.admin_email {
            return Ok(None);
        }

        Ok(Some(Identity::new(
            "1",
            credentials.email.clone(),
            "Administrator",
            Role::Admin,
            "mock-token",
        )))
    }
}
