//! Virtual-time timer queue
//!
//! Every timed piece of the launcher owns one of these. The app advances all
//! of them by the same frame delta, tests advance them explicitly. Timers are
//! addressed by handle so pending work can always be cancelled.

use std::time::Duration;

/// Handle to a scheduled timer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug)]
struct Timer<E> {
    id: u64,
    deadline: Duration,
    period: Option<Duration>,
    event: E,
}

/// Deterministic timer queue over a virtual clock
#[derive(Debug)]
pub struct Scheduler<E> {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer<E>>,
}

impl<E: Clone> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            timers: Vec::new(),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule a one-shot timer `delay` from now
    pub fn after(&mut self, delay: Duration, event: E) -> TimerHandle {
        self.insert(delay, None, event)
    }

    /// Schedule a recurring timer, first fire one `period` from now
    pub fn every(&mut self, period: Duration, event: E) -> TimerHandle {
        // A zero period would re-arm at the same instant forever
        let period = period.max(Duration::from_millis(1));
        self.insert(period, Some(period), event)
    }

    fn insert(&mut self, delay: Duration, period: Option<Duration>, event: E) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            deadline: self.now + delay,
            period,
            event,
        });
        TimerHandle(id)
    }

    /// Cancel a pending timer. Returns false if it already fired or is unknown.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != handle.0);
        self.timers.len() != before
    }

    /// Number of queued timers
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Drop every pending timer
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Pop the earliest timer due at or before `until`.
    ///
    /// The clock jumps to that timer's deadline, so anything the caller
    /// schedules while handling the event is measured from the fire time.
    /// Equal deadlines fire in the order they were scheduled.
    pub fn next_due(&mut self, until: Duration) -> Option<E> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= until)
            .min_by_key(|(_, t)| (t.deadline, t.id))
            .map(|(i, _)| i)?;

        let deadline = self.timers[idx].deadline;
        self.now = self.now.max(deadline);

        match self.timers[idx].period {
            Some(period) => {
                let timer = &mut self.timers[idx];
                timer.deadline += period;
                Some(timer.event.clone())
            }
            None => Some(self.timers.remove(idx).event),
        }
    }

    /// Move the clock forward to `until` once every due timer has been drained
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }

    /// Drain every timer due within `delta` from now, in firing order
    pub fn advance(&mut self, delta: Duration) -> Vec<E> {
        let target = self.now + delta;
        let mut fired = Vec::new();
        while let Some(event) = self.next_due(target) {
            fired.push(event);
        }
        self.settle(target);
        fired
    }
}

impl<E: Clone> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_one_shot_fires_once_at_deadline() {
        let mut s = Scheduler::new();
        s.after(ms(1500), "login");

        assert!(s.advance(ms(1499)).is_empty());
        assert_eq!(s.advance(ms(1)), vec!["login"]);
        assert!(s.advance(ms(10_000)).is_empty());
        assert_eq!(s.now(), ms(11_500));
    }

    #[test]
    fn test_ties_fire_in_schedule_order() {
        let mut s = Scheduler::new();
        s.after(ms(100), 1);
        s.after(ms(50), 0);
        s.after(ms(100), 2);

        assert_eq!(s.advance(ms(100)), vec![0, 1, 2]);
    }

    #[test]
    fn test_cancelled_timer_never_fires() {
        let mut s = Scheduler::new();
        let handle = s.after(ms(100), "stale");
        assert_eq!(s.pending(), 1);
        assert!(s.cancel(handle));
        assert_eq!(s.pending(), 0);
        assert!(!s.cancel(handle));

        assert!(s.advance(ms(1000)).is_empty());
    }

    #[test]
    fn test_recurring_timer_rearms() {
        let mut s = Scheduler::new();
        let handle = s.every(ms(3000), "tick");

        assert_eq!(s.advance(ms(9000)).len(), 3);
        assert!(s.cancel(handle));
        assert!(s.advance(ms(9000)).is_empty());
    }

    #[test]
    fn test_next_due_moves_clock_to_deadline() {
        let mut s = Scheduler::new();
        s.after(ms(2000), "first");

        assert_eq!(s.next_due(ms(5000)), Some("first"));
        assert_eq!(s.now(), ms(2000));

        // Scheduled from the fire time, not from the end of the frame
        s.after(ms(1000), "second");
        assert_eq!(s.next_due(ms(5000)), Some("second"));
        assert_eq!(s.now(), ms(3000));

        assert_eq!(s.next_due(ms(5000)), None);
        s.settle(ms(5000));
        assert_eq!(s.now(), ms(5000));
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut s = Scheduler::new();
        s.after(ms(10), 'a');
        s.every(ms(10), 'b');
        assert_eq!(s.pending(), 2);

        s.clear();
        assert_eq!(s.pending(), 0);
        assert!(s.advance(ms(100)).is_empty());
    }
}
