//! Sliding-window rate limiting
//!
//! Admission control for admin operations: at most `max_requests`
//! acceptances within any trailing window. Timestamps are evicted lazily
//! on each check, so an idle limiter costs nothing. The window is
//! counted, not smoothed; bursts straddling a window boundary are
//! accepted by design of the original scheme.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Default operation budget per window
pub const DEFAULT_MAX_REQUESTS: usize = 200;

/// Default window length in seconds
pub const DEFAULT_WINDOW_SECS: u64 = 60;

/// In-memory sliding-window counter.
///
/// Construct one per process (or per tenant, in tests) and share it via
/// `Arc`. The interior mutex keeps concurrent checks from both observing
/// the same count and overrunning the limit.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    accepted: Mutex<VecDeque<Instant>>,
}

impl RateLimiter {
    /// Create a limiter admitting `max_requests` per `window`
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            accepted: Mutex::new(VecDeque::new()),
        }
    }

    /// Check whether one more operation may run now.
    ///
    /// Accepting records the current timestamp; denial records nothing.
    pub fn allowed(&self) -> bool {
        self.check_at(Instant::now())
    }

    fn check_at(&self, now: Instant) -> bool {
        let mut accepted = match self.accepted.lock() {
            Ok(guard) => guard,
            // A poisoned lock means a panic elsewhere; failing closed
            // here would wedge every subsequent admin action.
            Err(poisoned) => poisoned.into_inner(),
        };

        while let Some(&oldest) = accepted.front() {
            if now.duration_since(oldest) >= self.window {
                accepted.pop_front();
            } else {
                break;
            }
        }

        if accepted.len() >= self.max_requests {
            return false;
        }

        accepted.push_back(now);
        true
    }

    /// Number of acceptances currently inside the window
    pub fn current_load(&self) -> usize {
        match self.accepted.lock() {
            Ok(guard) => guard.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(
            DEFAULT_MAX_REQUESTS,
            Duration::from_secs(DEFAULT_WINDOW_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_denies_at_capacity() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let start = Instant::now();

        assert!(limiter.check_at(start));
        assert!(limiter.check_at(start + Duration::from_millis(1)));
        assert!(limiter.check_at(start + Duration::from_millis(2)));
        assert!(!limiter.check_at(start + Duration::from_millis(3)));
    }

    #[test]
    fn test_window_expiry_frees_capacity() {
        let limiter = RateLimiter::new(3, Duration::from_secs(60));
        let start = Instant::now();

        for offset in 0..3 {
            assert!(limiter.check_at(start + Duration::from_millis(offset)));
        }
        assert!(!limiter.check_at(start + Duration::from_secs(1)));

        // Past the window, the old acceptances are evicted.
        assert!(limiter.check_at(start + Duration::from_secs(61)));
    }

    #[test]
    fn test_denial_records_nothing() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let start = Instant::now();

        assert!(limiter.check_at(start));
        assert!(!limiter.check_at(start + Duration::from_millis(1)));
        assert_eq!(limiter.current_load(), 1);
    }

    #[test]
    fn test_concurrent_checks_never_overrun() {
        let limiter = Arc::new(RateLimiter::new(50, Duration::from_secs(60)));
        let mut handles = Vec::new();

        for _ in 0..8 {
            let limiter = Arc::clone(&limiter);
            handles.push(std::thread::spawn(move || {
                let mut granted = 0;
                for _ in 0..25 {
                    if limiter.allowed() {
                        granted += 1;
                    }
                }
                granted
            }));
        }

        let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(total, 50);
    }

    #[test]
    fn test_default_limits() {
        let limiter = RateLimiter::default();
        assert!(limiter.allowed());
        assert_eq!(limiter.current_load(), 1);
    }
}
