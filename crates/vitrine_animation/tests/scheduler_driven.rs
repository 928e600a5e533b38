//! Counters and typing driven through the scheduler, the way a page runs them

use vitrine_animation::{
    AnimationScheduler, CounterAnimation, TypingCycler, TypingPhase, TypingTimings,
    COUNTER_STEPS, COUNTER_TICK_MS,
};

#[derive(Clone, Debug, PartialEq)]
enum Job {
    Count,
    Type,
}

#[test]
fn interval_counter_finishes_in_two_seconds() {
    let mut timers = AnimationScheduler::new();
    let mut counter = CounterAnimation::new(150);
    let interval = timers.set_interval(COUNTER_TICK_MS, Job::Count);

    let mut shown = Vec::new();
    while let Some(fired) = timers.pop_due(10_000) {
        assert_eq!(fired.payload, Job::Count);
        let frame = counter.tick();
        shown.push(frame.value);
        if frame.finished {
            timers.clear(interval);
        }
    }

    assert_eq!(shown.len() as u64, COUNTER_STEPS);
    assert_eq!(shown.last(), Some(&150));
    assert!(shown.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(timers.now(), COUNTER_STEPS * COUNTER_TICK_MS);
    assert!(timers.is_empty());
}

#[test]
fn typing_cycle_reschedules_itself() {
    let timings = TypingTimings::default();
    let mut timers = AnimationScheduler::new();
    let mut cycler = TypingCycler::new(vec!["Go".to_string(), "Rust".to_string()], timings).unwrap();
    timers.set_timeout(timings.start_delay_ms, Job::Type);

    let mut frames = Vec::new();
    while let Some(fired) = timers.pop_due(6_000) {
        let step = cycler.step();
        frames.push((fired.at, step.text.clone()));
        timers.set_timeout(step.delay_ms, fired.payload);
    }

    // "G" at 1000, "Go" at 1100, hold 2000, delete at 3100 and 3150
    assert_eq!(frames[0], (1000, "G".to_string()));
    assert_eq!(frames[1], (1100, "Go".to_string()));
    assert_eq!(frames[2], (3100, "G".to_string()));
    assert_eq!(frames[3], (3150, String::new()));
    // then the next string after the empty pause
    assert_eq!(frames[4], (3650, "R".to_string()));
    assert_eq!(cycler.current_text(), "Rust");
    assert_ne!(cycler.phase(), TypingPhase::PausingAtEmpty);
}

#[test]
fn cleared_timers_never_fire_and_ties_keep_insertion_order() {
    let mut timers = AnimationScheduler::new();
    let first = timers.set_timeout(100, "a");
    timers.set_timeout(100, "b");
    timers.set_timeout(50, "c");
    let cleared = timers.set_timeout(75, "d");
    assert!(timers.clear(cleared));
    assert!(!timers.clear(cleared));

    let mut order = Vec::new();
    while let Some(fired) = timers.pop_due(100) {
        order.push(fired.payload);
    }
    assert_eq!(order, ["c", "a", "b"]);
    assert!(!timers.is_pending(first));

    timers.advance_to(40);
    assert_eq!(timers.now(), 100);
}
