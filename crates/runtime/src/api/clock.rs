//! Wall-clock sources for event timestamps.
//!
//! The engine never reads time itself; the service asks a [`Clock`] once per
//! mutation attempt and the event log keeps timestamps strictly increasing.
use std::sync::atomic::{AtomicI64, Ordering};

use cup_core::Timestamp;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// UTC wall clock in milliseconds.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp(chrono::Utc::now().timestamp_millis())
    }
}

/// Deterministic clock that advances by a fixed step on every read.
///
/// Used for scenario replays and tests so stored logs are reproducible.
#[derive(Debug)]
pub struct StepClock {
    next: AtomicI64,
    step: i64,
}

impl StepClock {
    pub fn new(start: Timestamp, step: i64) -> Self {
        Self {
            next: AtomicI64::new(start.0),
            step: step.max(1),
        }
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::new(Timestamp(1), 1_000)
    }
}

impl Clock for StepClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.next.fetch_add(self.step, Ordering::Relaxed))
    }
}
