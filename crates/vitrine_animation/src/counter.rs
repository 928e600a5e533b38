//! Numeric counter animation
//!
//! Counts a displayed integer from 0 up to a target in [`COUNTER_STEPS`] ticks
//! of [`COUNTER_TICK_MS`], so every counter takes about two seconds regardless
//! of magnitude.

/// Interval between counter ticks
pub const COUNTER_TICK_MS: u64 = 40;

/// Number of increments of `target / COUNTER_STEPS` needed to reach the target
pub const COUNTER_STEPS: u64 = 50;

/// Output of a single counter tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterFrame {
    /// Value to display
    pub value: u64,
    /// The counter reached its target; its timer should be cleared
    pub finished: bool,
}

/// A counter animating from 0 to `target`
#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: u64,
    ticks: u64,
    accumulator: f64,
    finished: bool,
}

impl CounterAnimation {
    pub fn new(target: u64) -> Self {
        Self {
            target,
            ticks: 0,
            accumulator: 0.0,
            finished: false,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Currently displayed value
    pub fn value(&self) -> u64 {
        self.accumulator.floor() as u64
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Advance one tick.
    ///
    /// The accumulator is derived from the tick count rather than summed, so
    /// it lands exactly on the target on tick [`COUNTER_STEPS`].
    pub fn tick(&mut self) -> CounterFrame {
        if !self.finished {
            self.ticks += 1;
            self.accumulator =
                self.target as f64 * self.ticks as f64 / COUNTER_STEPS as f64;
            if self.accumulator >= self.target as f64 {
                self.accumulator = self.target as f64;
                self.finished = true;
            }
        }
        CounterFrame {
            value: self.value(),
            finished: self.finished,
        }
    }

    /// Milliseconds elapsed since the counter started
    pub fn elapsed_ms(&self) -> u64 {
        self.ticks * COUNTER_TICK_MS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(target: u64) -> (Vec<u64>, CounterAnimation) {
        let mut counter = CounterAnimation::new(target);
        let mut values = Vec::new();
        loop {
            let frame = counter.tick();
            values.push(frame.value);
            if frame.finished {
                break;
            }
            assert!(values.len() < 1000, "counter never finished");
        }
        (values, counter)
    }

    #[test]
    fn test_ends_exactly_at_target() {
        for target in [1, 7, 49, 50, 51, 120, 999, 1_000_000] {
            let (values, counter) = run(target);
            assert_eq!(values.last(), Some(&target));
            assert!(values.windows(2).all(|w| w[0] <= w[1]), "target {target}");
            assert!((1960..=2040).contains(&counter.elapsed_ms()));
        }
    }

    #[test]
    fn test_target_120_never_overshoots() {
        let (values, _) = run(120);
        assert!(values.iter().all(|v| *v <= 120));
        assert_eq!(values[0], 2);
        assert_eq!(values.len(), 50);
    }

    #[test]
    fn test_zero_target_finishes_on_first_tick() {
        let (values, counter) = run(0);
        assert_eq!(values, vec![0]);
        assert_eq!(counter.elapsed_ms(), COUNTER_TICK_MS);
    }

    #[test]
    fn test_tick_after_finish_is_stable() {
        let mut counter = CounterAnimation::new(3);
        while !counter.tick().finished {}
        assert_eq!(counter.tick(), CounterFrame { value: 3, finished: true });
    }
}
