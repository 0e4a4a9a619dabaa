//! Trailing-edge debouncing.
//!
//! Coalesces a burst of events into a single action that fires once the burst
//! has been quiet for `delay`. Every new event cancels the pending one and
//! restarts the window; only the latest value survives.
//!
//! The caller supplies the clock: `trigger` and `poll` take an [`Instant`], so
//! the same primitive drives a real event loop and deterministic tests.
//!
//! ```text
//! trigger(t=0, 800)   pending 800, due t=120
//! trigger(t=50, 820)  pending 820, due t=170
//! poll(t=160)         None
//! poll(t=170)         Some(820)
//! ```

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record an event, replacing any pending one and restarting the window.
    pub fn trigger(&mut self, now: Instant, value: T) {
        self.pending = Some((now, value));
    }

    /// Take the pending value if the window has elapsed since the last trigger.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = match &self.pending {
            Some((at, _)) => now.saturating_duration_since(*at) >= self.delay,
            None => false,
        };
        if due {
            self.pending.take().map(|(_, value)| value)
        } else {
            None
        }
    }

    /// Time remaining until the pending value fires, if any.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(at, _)| self.delay.saturating_sub(now.saturating_duration_since(*at)))
    }

    /// Drop the pending value without firing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fires_after_quiet_window() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(120));
        d.trigger(t0, 800);

        assert_eq!(d.poll(t0 + ms(119)), None);
        assert_eq!(d.poll(t0 + ms(120)), Some(800));
        assert!(!d.is_pending());
    }

    #[test]
    fn new_trigger_restarts_window_and_keeps_latest() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(120));
        d.trigger(t0, 800);
        d.trigger(t0 + ms(50), 820);

        assert_eq!(d.poll(t0 + ms(160)), None);
        assert_eq!(d.poll(t0 + ms(170)), Some(820));
    }

    #[test]
    fn burst_fires_once() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(120));
        for i in 0..10u64 {
            d.trigger(t0 + ms(i * 16), i);
        }
        let fired: Vec<u64> = (0..40u64)
            .filter_map(|i| d.poll(t0 + ms(i * 10)))
            .collect();
        assert_eq!(fired, vec![9]);
    }

    #[test]
    fn poll_without_trigger_is_none() {
        let mut d: Debouncer<()> = Debouncer::new(ms(120));
        assert_eq!(d.poll(Instant::now()), None);
        assert_eq!(d.time_until_due(Instant::now()), None);
    }

    #[test]
    fn cancel_drops_pending() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(120));
        d.trigger(t0, "resize");
        assert_eq!(d.cancel(), Some("resize"));
        assert_eq!(d.poll(t0 + ms(500)), None);
    }

    #[test]
    fn time_until_due_counts_down() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(ms(120));
        d.trigger(t0, 1);
        assert_eq!(d.time_until_due(t0 + ms(20)), Some(ms(100)));
        assert_eq!(d.time_until_due(t0 + ms(300)), Some(Duration::ZERO));
    }
}
