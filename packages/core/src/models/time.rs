//! Time Provider Abstraction
//!
//! The tree builder compares media expiry timestamps against "now". Reading the
//! clock through a trait keeps that comparison deterministic under test.
//!
//! # Examples
//!
//! ```rust
//! use notion_render_core::models::time::{FixedTimeProvider, TimeProvider};
//! use chrono::{TimeZone, Utc};
//!
//! let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
//! let provider = FixedTimeProvider::new(at);
//! assert_eq!(provider.now(), at);
//! ```

use chrono::{DateTime, Utc};

/// Trait for providing current time
pub trait TimeProvider: Send + Sync {
    /// Get the current UTC time
    fn now(&self) -> DateTime<Utc>;
}

/// System time provider using actual system clock
///
/// This is the default implementation for production use.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Time provider pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeProvider {
    current_time: DateTime<Utc>,
}

impl FixedTimeProvider {
    pub fn new(time: DateTime<Utc>) -> Self {
        Self { current_time: time }
    }

    /// Return a provider moved forward (or back) by `duration`
    pub fn advanced(self, duration: chrono::Duration) -> Self {
        Self {
            current_time: self.current_time + duration,
        }
    }
}

impl TimeProvider for FixedTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        self.current_time
    }
}
