//! Fixed-window admission control keyed by client identity.
//!
//! Each client gets a [`RateWindow`] that counts admitted requests since the
//! window started. Windows reset lazily: the first request arriving at or
//! after `start + interval` opens a fresh window. Nothing runs in the
//! background unless the owner calls [`FixedWindowLimiter::purge_expired`].

use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::error::{CoreError, CoreResult};

/// Counter for one client's current window.
#[derive(Debug, Clone, Copy)]
struct RateWindow {
    start: Instant,
    count: u32,
}

/// Result of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The request was counted; `remaining` slots are left in this window.
    Admitted { remaining: u32 },
    /// The window is full until `retry_after` has passed.
    Rejected { retry_after: Duration },
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted { .. })
    }
}

pub struct FixedWindowLimiter {
    windows: DashMap<String, RateWindow>,
    limit: u32,
    interval: Duration,
}

impl FixedWindowLimiter {
    pub fn new(limit: u32, interval: Duration) -> Self {
        Self {
            windows: DashMap::new(),
            limit,
            interval,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Decides admission for `client` at the current instant.
    pub fn check(&self, client: &str) -> Admission {
        self.check_at(client, Instant::now())
    }

    /// Decides admission for `client` at `now`.
    ///
    /// The map entry stays locked for the whole reset, compare and increment
    /// sequence, so concurrent callers on one client never over-admit.
    pub fn check_at(&self, client: &str, now: Instant) -> Admission {
        let mut window = self
            .windows
            .entry(client.to_string())
            .or_insert(RateWindow {
                start: now,
                count: 0,
            });

        if now.saturating_duration_since(window.start) >= self.interval {
            tracing::debug!("Window reset: client={client}");
            *window = RateWindow {
                start: now,
                count: 0,
            };
        }

        if window.count < self.limit {
            window.count += 1;
            Admission::Admitted {
                remaining: self.limit - window.count,
            }
        } else {
            let retry_after = self
                .interval
                .saturating_sub(now.saturating_duration_since(window.start));
            tracing::debug!(
                "Window full: client={client}, limit={}, retry_after={retry_after:?}",
                self.limit
            );
            Admission::Rejected { retry_after }
        }
    }

    /// Like [`check`](Self::check), but as a [`CoreResult`].
    ///
    /// # Errors
    ///
    /// [`CoreError::RateLimitExceeded`] when `client`'s window is full.
    pub fn try_acquire(&self, client: &str) -> CoreResult<()> {
        match self.check(client) {
            Admission::Admitted { .. } => Ok(()),
            Admission::Rejected { retry_after } => {
                Err(CoreError::RateLimitExceeded { retry_after })
            }
        }
    }

    /// Drops every window whose interval has elapsed by `now`.
    ///
    /// A dropped window behaves exactly like one that would have been reset
    /// on the client's next request.
    pub fn purge_expired(&self, now: Instant) -> usize {
        let before = self.windows.len();
        let interval = self.interval;
        self.windows
            .retain(|_, w| now.saturating_duration_since(w.start) < interval);
        let purged = before.saturating_sub(self.windows.len());
        if purged > 0 {
            tracing::debug!("Purged {purged} expired rate windows");
        }
        purged
    }

    /// Number of clients with a window in memory.
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }
}
