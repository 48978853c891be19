pub mod base;
pub mod local_verifier;
pub mod remote_verifier;
pub mod token_session;
pub mod verifier;

// Re-export the primary session items so code outside can do
// "use crate::session::{SessionStore, TokenSession};"
pub use base::{SessionError, SessionStore};
pub use token_session::TokenSession;
pub use verifier::{create_verifier, TokenVerifier};
