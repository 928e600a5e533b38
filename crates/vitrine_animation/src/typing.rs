//! Typing-text cycler
//!
//! Types each string of a fixed list one character at a time, holds it, deletes
//! it, then moves on to the next string, forever.
//!
//! ```text
//!   Typing --Filled--> PausingAtFull --HoldElapsed--> Deleting
//!     ^                                                  |
//!     +------HoldElapsed------ PausingAtEmpty <--Emptied-+
//! ```
//!
//! Each call to [`TypingCycler::step`] changes the displayed text by exactly
//! one character and returns the delay until the next call. Pauses are not
//! steps of their own: they are the delay returned by the step that entered
//! them.

use vitrine_core::fsm::{StateMachine, Transition};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypingPhase {
    Typing,
    PausingAtFull,
    Deleting,
    PausingAtEmpty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TypingEvent {
    Filled,
    HoldElapsed,
    Emptied,
}

/// Delays driving the cycle, in milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTimings {
    pub start_delay_ms: u64,
    pub type_ms: u64,
    pub delete_ms: u64,
    pub hold_full_ms: u64,
    pub hold_empty_ms: u64,
}

impl Default for TypingTimings {
    fn default() -> Self {
        Self {
            start_delay_ms: 1000,
            type_ms: 100,
            delete_ms: 50,
            hold_full_ms: 2000,
            hold_empty_ms: 500,
        }
    }
}

/// Output of one typing step
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypingStep {
    /// Text to display
    pub text: String,
    /// Delay before the next step
    pub delay_ms: u64,
    /// Phase after this step
    pub phase: TypingPhase,
}

/// The typing state machine
#[derive(Clone, Debug)]
pub struct TypingCycler {
    texts: Vec<String>,
    text_index: usize,
    /// Characters of the current string currently shown
    char_index: usize,
    timings: TypingTimings,
    fsm: StateMachine<TypingPhase, TypingEvent>,
}

impl TypingCycler {
    /// Create a cycler. Returns `None` for an empty list.
    pub fn new(texts: Vec<String>, timings: TypingTimings) -> Option<Self> {
        if texts.is_empty() {
            return None;
        }
        let fsm = StateMachine::new(
            TypingPhase::Typing,
            [
                Transition::new(TypingPhase::Typing, TypingEvent::Filled, TypingPhase::PausingAtFull),
                Transition::new(
                    TypingPhase::PausingAtFull,
                    TypingEvent::HoldElapsed,
                    TypingPhase::Deleting,
                ),
                Transition::new(TypingPhase::Deleting, TypingEvent::Emptied, TypingPhase::PausingAtEmpty),
                Transition::new(
                    TypingPhase::PausingAtEmpty,
                    TypingEvent::HoldElapsed,
                    TypingPhase::Typing,
                ),
            ],
        );
        Some(Self {
            texts,
            text_index: 0,
            char_index: 0,
            timings,
            fsm,
        })
    }

    pub fn timings(&self) -> TypingTimings {
        self.timings
    }

    pub fn phase(&self) -> TypingPhase {
        self.fsm.current_state()
    }

    pub fn text_index(&self) -> usize {
        self.text_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    /// The string currently being typed or deleted
    pub fn current_text(&self) -> &str {
        &self.texts[self.text_index]
    }

    /// The visible prefix of the current string
    pub fn displayed(&self) -> &str {
        prefix(self.current_text(), self.char_index)
    }

    /// Perform one step
    pub fn step(&mut self) -> TypingStep {
        // A step taken at the end of a pause first leaves the pause
        if matches!(
            self.phase(),
            TypingPhase::PausingAtFull | TypingPhase::PausingAtEmpty
        ) {
            self.fsm.send(TypingEvent::HoldElapsed);
        }

        let len = self.current_text().chars().count();
        let delay_ms = match self.phase() {
            TypingPhase::Deleting => {
                self.char_index = self.char_index.saturating_sub(1);
                if self.char_index == 0 {
                    self.fsm.send(TypingEvent::Emptied);
                    self.timings.hold_empty_ms
                } else {
                    self.timings.delete_ms
                }
            }
            _ => {
                self.char_index = (self.char_index + 1).min(len);
                if self.char_index == len {
                    self.fsm.send(TypingEvent::Filled);
                    self.timings.hold_full_ms
                } else {
                    self.timings.type_ms
                }
            }
        };

        let step = TypingStep {
            text: self.displayed().to_string(),
            delay_ms,
            phase: self.phase(),
        };

        // The next string starts once the empty pause is entered
        if self.phase() == TypingPhase::PausingAtEmpty {
            self.text_index = (self.text_index + 1) % self.texts.len();
        }
        step
    }
}

/// First `chars` characters of `text`
fn prefix(text: &str, chars: usize) -> &str {
    match text.char_indices().nth(chars) {
        Some((byte, _)) => &text[..byte],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycler(texts: &[&str]) -> TypingCycler {
        TypingCycler::new(
            texts.iter().map(|t| t.to_string()).collect(),
            TypingTimings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_types_then_holds_then_deletes() {
        let mut typing = cycler(&["ab", "xyz"]);

        let s = typing.step();
        assert_eq!((s.text.as_str(), s.delay_ms), ("a", 100));
        let s = typing.step();
        assert_eq!((s.text.as_str(), s.delay_ms), ("ab", 2000));
        assert_eq!(s.phase, TypingPhase::PausingAtFull);

        let s = typing.step();
        assert_eq!((s.text.as_str(), s.delay_ms), ("a", 50));
        assert_eq!(s.phase, TypingPhase::Deleting);
        let s = typing.step();
        assert_eq!((s.text.as_str(), s.delay_ms), ("", 500));
        assert_eq!(s.phase, TypingPhase::PausingAtEmpty);
        assert_eq!(typing.text_index(), 1);

        let s = typing.step();
        assert_eq!((s.text.as_str(), s.delay_ms), ("x", 100));
    }

    #[test]
    fn test_display_is_prefix_and_moves_one_char() {
        let texts = ["Azure DevOps Engineer", "Cloud", "CI/CD"];
        let mut typing = cycler(&texts);
        let mut previous = 0usize;

        for _ in 0..500 {
            let index_before = typing.text_index();
            let s = typing.step();
            let current = texts[index_before];
            assert!(current.starts_with(&s.text));
            let len = s.text.chars().count();
            assert_eq!(len.abs_diff(previous), 1);
            previous = len;
        }
    }

    #[test]
    fn test_cycles_all_strings_in_order() {
        let texts = ["one", "two", "three"];
        let mut typing = cycler(&texts);
        let mut completed = Vec::new();

        while completed.len() < 6 {
            let s = typing.step();
            if s.phase == TypingPhase::PausingAtFull {
                completed.push(s.text);
            }
        }
        assert_eq!(completed, vec!["one", "two", "three", "one", "two", "three"]);

        while typing.step().phase != TypingPhase::PausingAtEmpty {}
        assert_eq!(typing.text_index(), 0);
    }

    #[test]
    fn test_multibyte_characters() {
        let mut typing = cycler(&["héllo 🚀"]);
        let mut last = typing.step().text;
        for _ in 1..7 {
            last = typing.step().text;
        }
        assert_eq!(last, "héllo 🚀");
        assert_eq!(typing.char_index(), 7);
    }

    #[test]
    fn test_empty_string_does_not_stall() {
        let mut typing = cycler(&["", "a"]);
        let s = typing.step();
        assert_eq!(s.phase, TypingPhase::PausingAtFull);
        let s = typing.step();
        assert_eq!(s.phase, TypingPhase::PausingAtEmpty);
        assert_eq!(typing.text_index(), 1);
        assert_eq!(typing.step().text, "a");
    }

    #[test]
    fn test_empty_list_is_rejected() {
        assert!(TypingCycler::new(Vec::new(), TypingTimings::default()).is_none());
    }
}
