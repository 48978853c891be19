pub mod account;
pub mod navigation;

pub use account::{LoginToken, NewAccount, Profile};
pub use navigation::{GateDecision, NavigationIntent, Redirect};
