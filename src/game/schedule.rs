//! Deferred session events on a virtual clock
//!
//! Timers never touch wall-clock time. The owner advances the clock
//! explicitly and drains the events that fell due, so the countdown and the
//! reveal delays are testable without sleeping. Dropping or clearing the
//! scheduler cancels everything still pending.

/// An event together with the virtual time it falls due
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduled<E> {
    pub due_ms: u64,
    pub event: E,
}

/// Single-owner event queue ordered by due time, then by scheduling order
#[derive(Debug, Clone)]
pub struct Scheduler<E> {
    now_ms: u64,
    // Sorted by due_ms; equal due times stay in insertion order
    pending: Vec<Scheduled<E>>,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            pending: Vec::new(),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Schedule `event` to fire `delay_ms` after the current virtual time
    ///
    /// Due times saturate at `u64::MAX`.
    pub fn schedule(&mut self, delay_ms: u64, event: E) {
        let due_ms = self.now_ms.saturating_add(delay_ms);
        let index = self.pending.partition_point(|s| s.due_ms <= due_ms);
        self.pending.insert(index, Scheduled { due_ms, event });
    }

    /// Cancel every pending event
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Remove the earliest event due at or before `until`, moving the clock to it
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Scheduled<E>> {
        match self.pending.first() {
            Some(first) if first.due_ms <= until_ms => {
                let next = self.pending.remove(0);
                self.now_ms = self.now_ms.max(next.due_ms);
                Some(next)
            }
            _ => None,
        }
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    pub fn pending(&self) -> impl Iterator<Item = &Scheduled<E>> {
        self.pending.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_fire_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1000, "tick");
        scheduler.schedule(500, "reveal");

        let first = scheduler.pop_due(2000).unwrap();
        assert_eq!(first.event, "reveal");
        assert_eq!(scheduler.now(), 500);

        let second = scheduler.pop_due(2000).unwrap();
        assert_eq!(second.event, "tick");
        assert_eq!(scheduler.now(), 1000);
        assert!(scheduler.pop_due(2000).is_none());
    }

    #[test]
    fn test_same_due_time_keeps_scheduling_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1000, 1);
        scheduler.schedule(1000, 2);
        assert_eq!(scheduler.pop_due(1000).unwrap().event, 1);
        assert_eq!(scheduler.pop_due(1000).unwrap().event, 2);
    }

    #[test]
    fn test_not_due_yet() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(1000, ());
        assert!(scheduler.pop_due(999).is_none());
        scheduler.advance_to(999);
        assert_eq!(scheduler.now(), 999);
        assert!(scheduler.pop_due(1000).is_some());
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(250);
        scheduler.schedule(100, ());
        assert_eq!(scheduler.pending().next().unwrap().due_ms, 350);
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(10, "a");
        scheduler.schedule(20, "b");
        assert!(!scheduler.is_empty());
        scheduler.cancel_all();
        assert!(scheduler.is_empty());
        assert!(scheduler.pop_due(u64::MAX).is_none());
    }

    #[test]
    fn test_due_time_saturates() {
        let mut scheduler = Scheduler::new();
        scheduler.advance_to(u64::MAX - 5);
        scheduler.schedule(1000, "late");
        scheduler.schedule(1, "soon");

        assert_eq!(scheduler.pop_due(u64::MAX).unwrap().event, "soon");
        let late = scheduler.pop_due(u64::MAX).unwrap();
        assert_eq!(late.due_ms, u64::MAX);
        assert_eq!(scheduler.now(), u64::MAX);
    }
}
