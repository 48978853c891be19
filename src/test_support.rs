//! Session doubles shared by unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::session::{SessionError, SessionStore};

/// An in-memory session that counts how it is used.
pub struct FakeSession {
    logged_in: AtomicBool,
    failing: bool,
    checks: AtomicUsize,
    logouts: AtomicUsize,
}

impl FakeSession {
    fn with(logged_in: bool, failing: bool) -> Self {
        Self {
            logged_in: AtomicBool::new(logged_in),
            failing,
            checks: AtomicUsize::new(0),
            logouts: AtomicUsize::new(0),
        }
    }

    pub fn logged_in() -> Self {
        Self::with(true, false)
    }

    pub fn logged_out() -> Self {
        Self::with(false, false)
    }

    /// Every call fails with `SessionError::Unavailable`.
    pub fn failing() -> Self {
        Self::with(true, true)
    }

    pub fn check_calls(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }

    pub fn logout_calls(&self) -> usize {
        self.logouts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionStore for FakeSession {
    async fn is_logged_in(&self) -> Result<bool, SessionError> {
        self.checks.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(SessionError::Unavailable("fake outage".to_string()));
        }
        Ok(self.logged_in.load(Ordering::SeqCst))
    }

    async fn logout(&self) -> Result<(), SessionError> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(SessionError::Unavailable("fake outage".to_string()));
        }
        self.logged_in.store(false, Ordering::SeqCst);
        Ok(())
    }
}
