use std::sync::Mutex;

use chrono::{DateTime, FixedOffset, TimeDelta};

use crate::fingerprint::Clock;

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct MutableClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl MutableClock {
    /// Creates a clock stopped at `now`.
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: DateTime<FixedOffset>) {
        *self.now.lock().unwrap() = now;
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().unwrap();
        *now += delta;
    }
}

impl Clock for MutableClock {
    fn now(&self) -> DateTime<FixedOffset> {
        *self.now.lock().unwrap()
    }
}
