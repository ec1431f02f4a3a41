//! The single cancellable 1-second progress schedule.

use std::time::{Duration, Instant};

/// Period between progress ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Holds at most one scheduled tick.
///
/// Arming always replaces (cancels) whatever was pending, so there is never
/// more than one outstanding tick.
#[derive(Debug, Default)]
pub struct Ticker {
    pending: Option<Instant>,
}

impl Ticker {
    /// Schedule the next tick one period after `from`.
    ///
    /// Pass the deadline of the tick that just fired to keep a steady
    /// cadence, or the current time to start a new one.
    pub fn arm(&mut self, from: Instant) {
        self.cancel();
        self.pending = Some(from + TICK_PERIOD);
    }

    /// Drop the pending tick. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// Consume the pending tick if it is due at `now`, returning its deadline.
    pub fn take_due(&mut self, now: Instant) -> Option<Instant> {
        let due = self.pending.filter(|due| *due <= now)?;
        self.pending = None;
        Some(due)
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending
    }

    /// Number of scheduled ticks (0 or 1).
    #[cfg(test)]
    pub fn outstanding(&self) -> usize {
        usize::from(self.pending.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arm_replaces_pending_tick() {
        let now = Instant::now();
        let mut t = Ticker::default();
        t.arm(now);
        t.arm(now + TICK_PERIOD);
        assert_eq!(t.outstanding(), 1);
        assert_eq!(t.deadline(), Some(now + TICK_PERIOD * 2));
    }

    #[test]
    fn take_due_only_fires_once_and_not_early() {
        let now = Instant::now();
        let mut t = Ticker::default();
        t.arm(now);
        assert_eq!(t.take_due(now), None);
        assert_eq!(t.take_due(now + TICK_PERIOD), Some(now + TICK_PERIOD));
        assert_eq!(t.take_due(now + TICK_PERIOD * 2), None);
        assert_eq!(t.outstanding(), 0);
    }

    #[test]
    fn rearming_from_fired_deadline_does_not_drift() {
        let start = Instant::now();
        let mut t = Ticker::default();
        t.arm(start);

        // Every tick is handled 300ms late.
        for n in 1..=5u32 {
            let late = start + TICK_PERIOD * n + Duration::from_millis(300);
            let due = t.take_due(late).unwrap();
            assert_eq!(due, start + TICK_PERIOD * n);
            t.arm(due);
        }
        assert_eq!(t.deadline(), Some(start + TICK_PERIOD * 6));
    }

    #[test]
    fn cancel_reports_whether_anything_was_pending() {
        let mut t = Ticker::default();
        assert!(!t.cancel());
        t.arm(Instant::now());
        assert!(t.cancel());
        assert!(!t.cancel());
        assert!(t.deadline().is_none());
    }
}
