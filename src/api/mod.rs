//! Client for the rentals backend HTTP API.

mod client;

pub use client::{ApiClient, ApiError, LOGIN_ENDPOINT, NEW_CLIENT_ENDPOINT, PROFILE_ENDPOINT};
