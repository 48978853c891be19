//! Library exports for rentals-web, shared between the binary and tests.

pub mod api;
pub mod config;
pub mod gate;
pub mod metrics;
pub mod models;
pub mod router;
pub mod routes;
pub mod session;
pub mod startup;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;
