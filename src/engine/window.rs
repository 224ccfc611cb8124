//! Time window normalization.

use crate::domain::TimeMs;

/// Wall-clock abstraction so "now" defaults are injectable in tests.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now_ms(&self) -> TimeMs;
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> TimeMs {
        TimeMs::new(chrono::Utc::now().timestamp_millis())
    }
}

/// Fixed clock for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub TimeMs);

impl Clock for FixedClock {
    fn now_ms(&self) -> TimeMs {
        self.0
    }
}

/// A concrete fetch window, both bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: TimeMs,
    pub end: TimeMs,
}

impl TimeWindow {
    /// Resolve optional bounds: start defaults to epoch, end defaults to now.
    pub fn resolve(from_ms: Option<TimeMs>, to_ms: Option<TimeMs>, clock: &dyn Clock) -> Self {
        TimeWindow {
            start: from_ms.unwrap_or(TimeMs::EPOCH),
            end: to_ms.unwrap_or_else(|| clock.now_ms()),
        }
    }

    /// True when an explicit (non-epoch) start was requested.
    pub fn has_explicit_start(&self) -> bool {
        self.start > TimeMs::EPOCH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let clock = FixedClock(TimeMs::new(5000));
        let window = TimeWindow::resolve(None, None, &clock);
        assert_eq!(window.start, TimeMs::EPOCH);
        assert_eq!(window.end, TimeMs::new(5000));
        assert!(!window.has_explicit_start());
    }

    #[test]
    fn test_resolve_explicit_bounds() {
        let clock = FixedClock(TimeMs::new(5000));
        let window = TimeWindow::resolve(Some(TimeMs::new(100)), Some(TimeMs::new(200)), &clock);
        assert_eq!(window.start, TimeMs::new(100));
        assert_eq!(window.end, TimeMs::new(200));
        assert!(window.has_explicit_start());
    }
}
