//! Time source abstraction so cache freshness can be driven by tests

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Wall-clock source used for cache timestamps and ages
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Real system time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl SystemClock {
    pub fn shared() -> Arc<dyn Clock> {
        Arc::new(SystemClock)
    }
}

/// Manually advanced clock for tests
#[cfg(test)]
#[derive(Debug)]
pub struct ManualClock {
    now: std::sync::Mutex<DateTime<Utc>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            now: std::sync::Mutex::new(Utc::now()),
        })
    }

    pub fn advance(&self, by: std::time::Duration) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::from_std(by).unwrap();
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Seconds elapsed since `since`, clamped at zero
pub fn age_seconds(clock: &dyn Clock, since: DateTime<Utc>) -> f64 {
    let elapsed = clock.now().signed_duration_since(since);
    (elapsed.num_milliseconds().max(0) as f64) / 1000.0
}
