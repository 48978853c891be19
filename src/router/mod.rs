//! The client route table and the client-side navigator built on it.

pub mod navigator;
pub mod table;

pub use navigator::{NavigationOutcome, Navigator};
pub use table::{Guard, Resolution, Route, RouteAction, RouteTable, View};
