//! Debounced text input.
//!
//! Keystrokes arriving within the quiet period of each other coalesce: only
//! the latest value is released, once no further input has arrived for the
//! whole quiet period. Nothing is cancelled; superseded values are simply
//! never released. The caller drives time by passing `now` to
//! [`Debouncer::push`] and [`Debouncer::poll`], typically from its event
//! loop's idle tick.

use std::time::{Duration, Instant};

/// Default quiet period for search-box input.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    quiet_period: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl<T> Debouncer<T> {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            pending: None,
        }
    }

    /// Record a new input value, replacing any pending one and restarting
    /// the quiet period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Release the pending value if the quiet period has elapsed since the
    /// last push.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.quiet_period);
        if ready {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// Release the pending value immediately (e.g. on Enter).
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(300);

    #[test]
    fn releases_after_quiet_period() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(QUIET);
        d.push("mc", t0);
        assert_eq!(d.poll(t0 + Duration::from_millis(299)), None);
        assert_eq!(d.poll(t0 + QUIET), Some("mc"));
        assert!(!d.is_pending());
        assert_eq!(d.poll(t0 + Duration::from_secs(5)), None);
    }

    #[test]
    fn rapid_input_coalesces_to_last_value() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(QUIET);
        d.push("m", t0);
        d.push("mc", t0 + Duration::from_millis(100));
        d.push("mcp", t0 + Duration::from_millis(200));
        // 300ms after the first push, but only 100ms after the last.
        assert_eq!(d.poll(t0 + Duration::from_millis(300)), None);
        assert_eq!(d.poll(t0 + Duration::from_millis(500)), Some("mcp"));
    }

    #[test]
    fn flush_releases_immediately() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(QUIET);
        d.push(1, t0);
        assert_eq!(d.flush(), Some(1));
        assert_eq!(d.flush(), None);
    }
}
