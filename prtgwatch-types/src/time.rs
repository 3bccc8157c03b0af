//! Time range for history queries.

use serde::{Deserialize, Serialize};

/// A `{from, to}` pair of dashboard-native timestamps (epoch milliseconds).
///
/// Supplied once per request batch; only time-series history queries
/// consume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Inclusive start, epoch milliseconds.
    pub from: i64,

    /// Inclusive end, epoch milliseconds.
    pub to: i64,
}

impl TimeRange {
    /// Create a time range.
    pub const fn new(from: i64, to: i64) -> Self {
        Self { from, to }
    }

    /// Span of the range in milliseconds.
    pub fn duration_ms(&self) -> i64 {
        self.to - self.from
    }

    /// Check if a timestamp falls within the range.
    pub fn contains(&self, timestamp_ms: i64) -> bool {
        timestamp_ms >= self.from && timestamp_ms <= self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_and_containment() {
        let r = TimeRange::new(1_000, 6_000);
        assert_eq!(r.duration_ms(), 5_000);
        assert!(r.contains(1_000));
        assert!(r.contains(6_000));
        assert!(!r.contains(999));
        assert!(!r.contains(6_001));
    }
}
