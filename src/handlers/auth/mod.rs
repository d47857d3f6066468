// handlers/auth/mod.rs - Authentication handlers
//
// Routes under /api/auth. None of them require an existing session; the
// session route reads one if present.

pub mod providers; // GET  /api/auth/providers
pub mod register; // POST /api/auth/register
pub mod session; // GET  /api/auth/session, POST /api/auth/signout
pub mod signin; // POST /api/auth/callback/credentials

pub use providers::providers_get;
pub use register::register_post;
pub use session::{session_get, signout_post};
pub use signin::signin_credentials;

/*
SIGN-IN FLOW:

1. **Callback**: POST /api/auth/callback/credentials
   - Credentials are checked for presence, then sent once to the identity
     service (mock or ERPNext)
   - Token enrichment copies id, role and access token onto a new session token
   - The token is signed with the session secret and set as an HttpOnly cookie

2. **Session read**: GET /api/auth/session
   - Middleware verifies the cookie (or Bearer header) and loads the token
   - Enrichment runs without an identity, so the claims are left as issued
   - The client session is projected from the token and the cookie reissued

3. **Sign-out**: POST /api/auth/signout
   - Clears the cookie and points the client at the sign-in page

ERROR RESPONSES:
- 400 Missing required fields (register)
- 401 CredentialsSignin: identity service did not recognise the credentials
- 500 IdentityServiceUnavailable: identity service timed out or failed
- 500 generic message: unparseable body or token signing failure
- 503 Registration disabled
*/
