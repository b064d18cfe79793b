//! Testability port for injecting time.
//!
//! Tests drive time with `clock::ManualClock` rather than a mock.

use chrono::{DateTime, Utc};

pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
