//! Bounded busy-polling

use std::thread;
use std::time::{Duration, Instant};

/// Calls `check` until it yields a value or `timeout` has elapsed, sleeping
/// `interval` between attempts. The check always runs at least once.
pub fn poll_until<T>(
    timeout: Duration,
    interval: Duration,
    mut check: impl FnMut() -> Option<T>,
) -> Option<T> {
    let start = Instant::now();
    loop {
        if let Some(found) = check() {
            return Some(found);
        }
        if start.elapsed() >= timeout {
            return None;
        }
        thread::sleep(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_immediately_when_check_succeeds() {
        let mut calls = 0;
        let found = poll_until(Duration::from_secs(5), Duration::from_secs(1), || {
            calls += 1;
            Some("ready")
        });
        assert_eq!(found, Some("ready"));
        assert_eq!(calls, 1);
    }

    #[test]
    fn retries_until_check_succeeds() {
        let mut calls = 0;
        let found = poll_until(Duration::from_secs(5), Duration::from_millis(1), || {
            calls += 1;
            (calls == 3).then_some(calls)
        });
        assert_eq!(found, Some(3));
    }

    #[test]
    fn zero_timeout_checks_once() {
        let mut calls = 0;
        let found: Option<()> = poll_until(Duration::ZERO, Duration::from_millis(1), || {
            calls += 1;
            None
        });
        assert!(found.is_none());
        assert_eq!(calls, 1);
    }

    #[test]
    fn gives_up_after_timeout() {
        let start = Instant::now();
        let found: Option<()> =
            poll_until(Duration::from_millis(50), Duration::from_millis(10), || None);
        assert!(found.is_none());
        assert!(start.elapsed() >= Duration::from_millis(50));
    }
}
