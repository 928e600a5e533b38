//! Vitrine Animation System
//!
//! Timer scheduling, staggered timelines, and the small animated widgets of a
//! portfolio page.
//!
//! # Features
//!
//! - **Scheduler**: one-shot and repeating timers ordered against a virtual clock
//! - **Timelines**: sorted `(offset, action)` lists for staggered mutations
//! - **Transitions**: eased style values for enter/exit animations
//! - **Counters**: 0 to target over a fixed two seconds
//! - **Typing**: an endless type/delete cycle over a list of strings

pub mod counter;
pub mod easing;
pub mod scheduler;
pub mod timeline;
pub mod transition;
pub mod typing;

pub use counter::{CounterAnimation, CounterFrame, COUNTER_STEPS, COUNTER_TICK_MS};
pub use easing::Easing;
pub use scheduler::{AnimationScheduler, Fired, TimerId};
pub use timeline::{Timeline, TimelineEntryId};
pub use transition::StyleTransition;
pub use typing::{TypingCycler, TypingPhase, TypingStep, TypingTimings};
