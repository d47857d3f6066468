use async_trait::async_trait;
use thiserror::Error;

use super::identity::{Credentials, Identity};

/// Failures reaching or understanding the identity service. Bad credentials
/// are not an error; they come back as `Ok(None)`.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity service did not respond within {0:?}")]
    Timeout(std::time::Duration),

    #[error("identity service unavailable: {0}")]
    Unavailable(String),

    #[error("identity service rejected the login request with status {status}")]
    Rejected { status: u16 },

    #[error("identity service returned a malformed response: {0}")]
    MalformedResponse(String),
}

/// System of record that verifies credentials.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    /// Verify complete credentials. `Ok(None)` means the service did not
    /// recognise them.
    async fn login(&self, credentials: &Credentials) -> Result<Option<Identity>, IdentityError>;
}
