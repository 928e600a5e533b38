//! State Machine Runtime
//!
//! Flat, typed state machines for animated widgets. States and events are
//! small `Copy` enums; transitions are looked up in declaration order.

use smallvec::SmallVec;
use std::fmt::Debug;

/// A transition in the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition<S, E> {
    pub from_state: S,
    pub event: E,
    pub to_state: S,
}

impl<S, E> Transition<S, E> {
    pub fn new(from: S, event: E, to: S) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine<S, E> {
    current_state: S,
    transitions: SmallVec<[Transition<S, E>; 8]>,
}

impl<S, E> StateMachine<S, E>
where
    S: Copy + PartialEq + Debug,
    E: Copy + PartialEq + Debug,
{
    /// Create a new state machine with an initial state and transitions
    pub fn new(initial_state: S, transitions: impl IntoIterator<Item = Transition<S, E>>) -> Self {
        Self {
            current_state: initial_state,
            transitions: transitions.into_iter().collect(),
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Send an event, returning the (possibly unchanged) current state
    pub fn send(&mut self, event: E) -> S {
        let current = self.current_state;
        let Some(to_state) = self.find(event) else {
            tracing::trace!(?current, ?event, "event ignored");
            return current;
        };

        self.current_state = to_state;
        tracing::trace!(?current, ?event, ?to_state, "transition");
        to_state
    }

    fn find(&self, event: E) -> Option<S> {
        self.transitions
            .iter()
            .find(|t| t.from_state == self.current_state && t.event == event)
            .map(|t| t.to_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Phase {
        Idle,
        Hovered,
        Pressed,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    enum Input {
        Enter,
        Leave,
        Down,
        Up,
    }

    fn button() -> StateMachine<Phase, Input> {
        StateMachine::new(
            Phase::Idle,
            [
                Transition::new(Phase::Idle, Input::Enter, Phase::Hovered),
                Transition::new(Phase::Hovered, Input::Leave, Phase::Idle),
                Transition::new(Phase::Hovered, Input::Down, Phase::Pressed),
                Transition::new(Phase::Pressed, Input::Up, Phase::Hovered),
            ],
        )
    }

    #[test]
    fn test_simple_transitions() {
        let mut fsm = button();
        assert_eq!(fsm.current_state(), Phase::Idle);

        fsm.send(Input::Enter);
        assert_eq!(fsm.current_state(), Phase::Hovered);

        assert_eq!(fsm.send(Input::Down), Phase::Pressed);

        fsm.send(Input::Up);
        fsm.send(Input::Leave);
        assert_eq!(fsm.current_state(), Phase::Idle);
    }

    #[test]
    fn test_invalid_event_no_transition() {
        let mut fsm = button();
        assert_eq!(fsm.send(Input::Down), Phase::Idle);
        assert_eq!(fsm.send(Input::Up), Phase::Idle);
        assert_eq!(fsm.send(Input::Enter), Phase::Hovered);
    }
}
