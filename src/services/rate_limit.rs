use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use uuid::Uuid;

/// Sliding-window limiter keyed by user id.
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    hits: Mutex<HashMap<Uuid, VecDeque<Instant>>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Records a hit for `key` and reports whether it fits in the window.
    /// Rejected hits are not recorded.
    pub fn check(&self, key: Uuid) -> bool {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: Uuid, now: Instant) -> bool {
        let mut hits = self.hits.lock();
        let log = hits.entry(key).or_default();
        while let Some(&oldest) = log.front() {
            if now.saturating_duration_since(oldest) >= self.window {
                log.pop_front();
            } else {
                break;
            }
        }
        if log.len() >= self.max_requests {
            return false;
        }
        log.push_back(now);
        true
    }
}
