//! Fixed-window rate limiting keyed by client.
//!
//! Each client gets `permit_limit` permits per window. A window starts with
//! the client's first request and is not sliding: once it expires the next
//! request opens a fresh window with a full allowance.

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Default write permits per window.
pub const DEFAULT_WRITE_PERMITS: u32 = 10;

/// Default window length in seconds.
pub const DEFAULT_WINDOW_SECS: u64 = 60;

/// Tracked clients above which expired windows are pruned on insert.
const PRUNE_THRESHOLD: usize = 1024;

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    used: u32,
}

/// Outcome of a permit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The request may proceed; `remaining` permits are left in this window.
    Allowed { remaining: u32 },
    /// The window is exhausted; retry after the given delay.
    Rejected { retry_after: Duration },
}

/// Per-client fixed-window counter.
///
/// Not synchronized; callers share it behind a mutex.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    permit_limit: u32,
    window: Duration,
    clients: HashMap<String, Window>,
}

impl FixedWindowLimiter {
    pub fn new(permit_limit: u32, window: Duration) -> Self {
        Self {
            permit_limit,
            window,
            clients: HashMap::new(),
        }
    }

    /// Try to take one permit for `client` at time `now`.
    pub fn try_acquire(&mut self, client: &str, now: Instant) -> Decision {
        if self.clients.len() >= PRUNE_THRESHOLD && !self.clients.contains_key(client) {
            self.prune(now);
        }

        let window = self.window;
        let entry = self.clients.entry(client.to_string()).or_insert(Window {
            started_at: now,
            used: 0,
        });

        if now.saturating_duration_since(entry.started_at) >= window {
            entry.started_at = now;
            entry.used = 0;
        }

        if entry.used < self.permit_limit {
            entry.used += 1;
            Decision::Allowed {
                remaining: self.permit_limit - entry.used,
            }
        } else {
            let elapsed = now.saturating_duration_since(entry.started_at);
            Decision::Rejected {
                retry_after: window.saturating_sub(elapsed),
            }
        }
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }

    /// Drop clients whose window has expired.
    pub fn prune(&mut self, now: Instant) {
        let window = self.window;
        self.clients
            .retain(|_, w| now.saturating_duration_since(w.started_at) < window);
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn limiter(permits: u32) -> FixedWindowLimiter {
        FixedWindowLimiter::new(permits, Duration::from_secs(60))
    }

    #[test]
    fn allows_up_to_limit_then_rejects() {
        let mut limiter = limiter(3);
        let now = Instant::now();

        assert_eq!(limiter.try_acquire("10.0.0.1", now), Decision::Allowed { remaining: 2 });
        assert_eq!(limiter.try_acquire("10.0.0.1", now), Decision::Allowed { remaining: 1 });
        assert_eq!(limiter.try_acquire("10.0.0.1", now), Decision::Allowed { remaining: 0 });
        assert_matches!(limiter.try_acquire("10.0.0.1", now), Decision::Rejected { .. });
    }

    #[test]
    fn clients_are_counted_separately() {
        let mut limiter = limiter(1);
        let now = Instant::now();

        assert_matches!(limiter.try_acquire("a", now), Decision::Allowed { .. });
        assert_matches!(limiter.try_acquire("b", now), Decision::Allowed { .. });
        assert_matches!(limiter.try_acquire("a", now), Decision::Rejected { .. });
    }

    #[test]
    fn new_window_restores_allowance() {
        let mut limiter = limiter(1);
        let start = Instant::now();

        assert_matches!(limiter.try_acquire("a", start), Decision::Allowed { .. });
        assert_matches!(
            limiter.try_acquire("a", start + Duration::from_secs(59)),
            Decision::Rejected { .. }
        );
        assert_matches!(
            limiter.try_acquire("a", start + Duration::from_secs(60)),
            Decision::Allowed { .. }
        );
    }

    #[test]
    fn retry_after_counts_down_to_window_end() {
        let mut limiter = limiter(1);
        let start = Instant::now();
        limiter.try_acquire("a", start);

        let decision = limiter.try_acquire("a", start + Duration::from_secs(45));
        assert_eq!(
            decision,
            Decision::Rejected {
                retry_after: Duration::from_secs(15)
            }
        );
    }

    #[test]
    fn prune_drops_expired_windows() {
        let mut limiter = limiter(5);
        let start = Instant::now();
        limiter.try_acquire("a", start);
        limiter.try_acquire("b", start + Duration::from_secs(30));

        limiter.prune(start + Duration::from_secs(61));
        assert_eq!(limiter.tracked_clients(), 1);
    }
}
