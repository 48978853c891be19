//! Navigation guards: the auth gate, the logout handler, and validation of
//! post-login redirect targets.

pub mod auth_gate;
pub mod logout;
pub mod redirect;

pub use auth_gate::{AuthGate, GateError};
pub use logout::LogoutHandler;
pub use redirect::RedirectSanitizer;
