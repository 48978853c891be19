// This module re-exports important pieces for convenience,
// so we can "use crate::config::*" easily.
pub mod config;
pub mod gate;
pub mod logging;
pub mod session;

pub use config::*;
pub use gate::*;
pub use logging::*;
pub use session::*;
