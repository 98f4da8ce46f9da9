//! State transition history tracking.
//!
//! Every signal keeps an ordered log of the light states it has moved
//! through, together with the dwell limit each new state was given. Only the
//! most recent transitions are retained; a running total counts all of them.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Record of a single state transition.
///
/// # Example
///
/// ```rust
/// use crossing::core::StateTransition;
/// use crossing::signal::{LightState, SignalColor};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: LightState::steady(SignalColor::Red),
///     to: LightState::steady(SignalColor::Green),
///     timestamp: Utc::now(),
///     dwell: 15,
/// };
/// assert_eq!(transition.dwell, 15);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
    /// Ticks the new state must persist before it may change again
    pub dwell: u32,
}

/// Bounded, ordered history of state transitions.
///
/// Holds at most `capacity` transitions; pushing past that drops the oldest.
///
/// # Example
///
/// ```rust
/// use crossing::core::{StateHistory, StateTransition};
/// use crossing::signal::{LightState, SignalColor};
/// use chrono::Utc;
///
/// let mut history = StateHistory::new(8);
/// history.push(StateTransition {
///     from: LightState::steady(SignalColor::Red),
///     to: LightState::steady(SignalColor::Green),
///     timestamp: Utc::now(),
///     dwell: 10,
/// });
/// history.push(StateTransition {
///     from: LightState::steady(SignalColor::Green),
///     to: LightState::blinking(SignalColor::Yellow),
///     timestamp: Utc::now(),
///     dwell: 2,
/// });
///
/// assert_eq!(history.get_path().len(), 3);
/// assert_eq!(history.recorded(), 2);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: VecDeque<StateTransition<S>>,
    capacity: usize,
    recorded: u64,
}

impl<S: State> StateHistory<S> {
    /// Create an empty history retaining at most `capacity` transitions.
    pub fn new(capacity: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(capacity),
            capacity,
            recorded: 0,
        }
    }

    /// Append a transition, evicting the oldest once full.
    pub fn push(&mut self, transition: StateTransition<S>) {
        self.recorded += 1;
        if self.capacity == 0 {
            return;
        }
        if self.transitions.len() == self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of retained states.
    ///
    /// The first element is the `from` state of the oldest retained
    /// transition, followed by the `to` state of every retained transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.front() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Retained transitions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &StateTransition<S>> + '_ {
        self.transitions.iter()
    }

    pub fn last(&self) -> Option<&StateTransition<S>> {
        self.transitions.back()
    }

    /// Number of retained transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Transitions pushed over the whole lifetime, including evicted ones.
    pub fn recorded(&self) -> u64 {
        self.recorded
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
