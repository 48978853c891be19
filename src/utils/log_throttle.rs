use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Window {
    started_at: Instant,
    suppressed: u64,
}

/// Per-key rate limiter for noisy log lines.
///
/// The first event for a key in each `interval` is emitted and reports how many
/// were swallowed since the previous emission.
#[derive(Debug)]
pub struct LogThrottle {
    interval: Duration,
    windows: Mutex<HashMap<&'static str, Window>>,
}

impl LogThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// `Some(suppressed_count)` when the event for `key` should be logged now.
    pub fn should_emit(&self, key: &'static str) -> Option<u64> {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();

        let Some(window) = windows.get_mut(key) else {
            windows.insert(
                key,
                Window {
                    started_at: now,
                    suppressed: 0,
                },
            );
            return Some(0);
        };

        if now.duration_since(window.started_at) < self.interval {
            window.suppressed += 1;
            return None;
        }

        let suppressed = std::mem::take(&mut window.suppressed);
        window.started_at = now;
        Some(suppressed)
    }
}

#[cfg(test)]
mod tests {
    use super::LogThrottle;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn emits_then_suppresses_then_reports_count() {
        let throttle = LogThrottle::new(Duration::from_millis(20));

        assert_eq!(throttle.should_emit("verify"), Some(0));
        assert_eq!(throttle.should_emit("verify"), None);
        assert_eq!(throttle.should_emit("verify"), None);

        sleep(Duration::from_millis(30));
        assert_eq!(throttle.should_emit("verify"), Some(2));
    }

    #[test]
    fn keys_are_independent() {
        let throttle = LogThrottle::new(Duration::from_secs(60));
        assert_eq!(throttle.should_emit("a"), Some(0));
        assert_eq!(throttle.should_emit("b"), Some(0));
        assert_eq!(throttle.should_emit("a"), None);
    }
}
