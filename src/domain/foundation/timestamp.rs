//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from milliseconds since the Unix epoch.
    ///
    /// Returns `None` when the value is outside chrono's representable range.
    pub fn from_unix_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_millis_opt(millis).single().map(Self)
    }

    /// Returns milliseconds since the Unix epoch.
    pub fn as_unix_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Whole milliseconds elapsed from `earlier` to this timestamp.
    ///
    /// Negative when `earlier` is actually later than `self`.
    pub fn millis_since(&self, earlier: &Timestamp) -> i64 {
        self.0.signed_duration_since(earlier.0).num_milliseconds()
    }

    /// Creates a new timestamp the given number of milliseconds earlier.
    pub fn minus_millis(&self, millis: i64) -> Self {
        Self(self.0 - Duration::milliseconds(millis))
    }

    /// Creates a new timestamp the given number of days earlier.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}
