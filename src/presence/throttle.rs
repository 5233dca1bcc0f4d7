//! Minimum spacing between presence updates.

use std::time::{Duration, Instant};

/// Tracks the last accepted publish and the fixed interval between publishes.
#[derive(Debug, Clone)]
pub struct PublishThrottle {
    interval: Duration,
    last_publish: Option<Instant>,
}

impl PublishThrottle {
    /// A throttle whose first check is always due.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_publish: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn last_publish(&self) -> Option<Instant> {
        self.last_publish
    }

    /// Whether at least `interval` has elapsed since the last publish.
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last_publish {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    /// Record a publish at `now`, restarting the interval.
    pub fn mark(&mut self, now: Instant) {
        self.last_publish = Some(now);
    }
}
