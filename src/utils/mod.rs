pub mod http_helpers;
pub mod log_throttle;
pub mod logger;
pub mod shell;
