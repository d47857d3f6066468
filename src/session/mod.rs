// session/mod.rs - Session issuance
//
// Token enrichment and session projection callbacks, plus signing and cookie
// transport of the session token.

pub mod callbacks;
pub mod cookie;
pub mod token;

pub use callbacks::{enrich_token, project_session, ClientSession, SessionUser};
pub use cookie::{clear_session_cookie, extract_session_token, session_cookie, SESSION_COOKIE_NAME};
pub use token::{decode_session, encode_session, SessionError, SessionToken};
