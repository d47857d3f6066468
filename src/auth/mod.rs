// auth/mod.rs - Credential authentication
//
// Credentials come in from the sign-in callback, are checked for presence and
// handed to one identity service backend. Only this module can mint an
// `Identity`.

pub mod authenticator;
pub mod erpnext;
pub mod identity;
pub mod identity_service;
pub mod mock;

pub use authenticator::CredentialAuthenticator;
pub use erpnext::ErpNextIdentityService;
pub use identity::{Credentials, Identity, Role};
pub use identity_service::{IdentityError, IdentityService};
pub use mock::MockIdentityService;
