//! Animation scheduler
//!
//! A timer queue played against a virtual millisecond clock. Timers fire in
//! order of fire time, ties broken by insertion order. The host drains due
//! timers with [`AnimationScheduler::pop_due`] and then settles the clock with
//! [`AnimationScheduler::advance_to`].

use slotmap::{new_key_type, SlotMap};
use std::collections::BTreeSet;

new_key_type! {
    pub struct TimerId;
}

struct Timer<T> {
    fire_at: u64,
    /// Repeat period for interval timers
    period: Option<u64>,
    seq: u64,
    payload: T,
}

/// A timer that came due
#[derive(Clone, Debug, PartialEq)]
pub struct Fired<T> {
    pub id: TimerId,
    /// Virtual time the timer was due at
    pub at: u64,
    pub payload: T,
}

/// The scheduler that owns all pending timers
pub struct AnimationScheduler<T> {
    timers: SlotMap<TimerId, Timer<T>>,
    queue: BTreeSet<(u64, u64, TimerId)>,
    now: u64,
    next_seq: u64,
}

impl<T: Clone> AnimationScheduler<T> {
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BTreeSet::new(),
            now: 0,
            next_seq: 0,
        }
    }

    /// Current virtual time in milliseconds
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Run `payload` once, `delay_ms` from now
    pub fn set_timeout(&mut self, delay_ms: u64, payload: T) -> TimerId {
        self.insert(self.now + delay_ms, None, payload)
    }

    /// Run `payload` every `period_ms` (at least 1ms) until cleared
    pub fn set_interval(&mut self, period_ms: u64, payload: T) -> TimerId {
        let period = period_ms.max(1);
        self.insert(self.now + period, Some(period), payload)
    }

    /// Cancel a timer. Returns false if it already fired or was cleared.
    pub fn clear(&mut self, id: TimerId) -> bool {
        match self.timers.remove(id) {
            Some(timer) => {
                self.queue.remove(&(timer.fire_at, timer.seq, id));
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// Fire time of the earliest pending timer
    pub fn next_due(&self) -> Option<u64> {
        self.queue.first().map(|(at, _, _)| *at)
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its fire time. Interval timers are re-armed one period later.
    pub fn pop_due(&mut self, until: u64) -> Option<Fired<T>> {
        let &(at, seq, id) = self.queue.first()?;
        if at > until {
            return None;
        }
        self.queue.remove(&(at, seq, id));
        self.now = self.now.max(at);

        let period = self.timers.get(id)?.period;
        let payload = match period {
            Some(period) => {
                let seq = self.bump_seq();
                let timer = self.timers.get_mut(id)?;
                timer.fire_at = at + period;
                timer.seq = seq;
                self.queue.insert((at + period, seq, id));
                timer.payload.clone()
            }
            None => self.timers.remove(id)?.payload,
        };

        tracing::trace!(?id, at, "timer fired");
        Some(Fired { id, at, payload })
    }

    /// Move the clock forward without firing anything.
    ///
    /// Callers drain [`pop_due`](Self::pop_due) first; time never runs backwards.
    pub fn advance_to(&mut self, until: u64) {
        self.now = self.now.max(until);
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    fn insert(&mut self, fire_at: u64, period: Option<u64>, payload: T) -> TimerId {
        let seq = self.bump_seq();
        let id = self.timers.insert(Timer {
            fire_at,
            period,
            seq,
            payload,
        });
        self.queue.insert((fire_at, seq, id));
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

impl<T: Clone> Default for AnimationScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T: Clone>(scheduler: &mut AnimationScheduler<T>, until: u64) -> Vec<(u64, T)> {
        let mut fired = Vec::new();
        while let Some(f) = scheduler.pop_due(until) {
            fired.push((f.at, f.payload));
        }
        scheduler.advance_to(until);
        fired
    }

    #[test]
    fn test_timeouts_fire_in_time_order() {
        let mut scheduler = AnimationScheduler::new();
        scheduler.set_timeout(300, "c");
        scheduler.set_timeout(100, "a");
        scheduler.set_timeout(200, "b");

        assert_eq!(drain(&mut scheduler, 250), vec![(100, "a"), (200, "b")]);
        assert_eq!(scheduler.now(), 250);
        assert_eq!(drain(&mut scheduler, 1000), vec![(300, "c")]);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_ties_fire_in_insertion_order() {
        let mut scheduler = AnimationScheduler::new();
        for label in ["first", "second", "third"] {
            scheduler.set_timeout(50, label);
        }
        let order: Vec<_> = drain(&mut scheduler, 50).into_iter().map(|(_, l)| l).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_interval_rearms_until_cleared() {
        let mut scheduler = AnimationScheduler::new();
        let id = scheduler.set_interval(40, ());

        assert_eq!(drain(&mut scheduler, 120).len(), 3);
        assert!(scheduler.is_pending(id));
        assert_eq!(scheduler.next_due(), Some(160));

        assert!(scheduler.clear(id));
        assert!(!scheduler.clear(id));
        assert!(drain(&mut scheduler, 1000).is_empty());
    }

    #[test]
    fn test_delays_are_relative_to_current_time() {
        let mut scheduler = AnimationScheduler::new();
        scheduler.advance_to(1000);
        scheduler.set_timeout(10, ());
        assert_eq!(scheduler.next_due(), Some(1010));
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut scheduler: AnimationScheduler<()> = AnimationScheduler::new();
        scheduler.advance_to(500);
        scheduler.advance_to(100);
        assert_eq!(scheduler.now(), 500);
    }
}
