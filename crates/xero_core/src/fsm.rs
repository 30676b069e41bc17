//! State Machine Runtime
//!
//! Flat state machines for widget interaction states. A state type
//! describes its own transitions by implementing [`StateTransitions`];
//! [`StateMachine`] holds the current state, applies events and keeps a
//! bounded history for debugging.

use std::collections::VecDeque;
use std::fmt::Debug;
use std::hash::Hash;

use crate::events::EventId;

/// Number of transitions kept in a machine's history
pub const HISTORY_CAPACITY: usize = 32;

/// Trait for state types that can handle event transitions
///
/// # Example
///
/// ```rust
/// use xero_core::fsm::{StateMachine, StateTransitions};
/// use xero_core::events::event_types::*;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// enum Pan {
///     #[default]
///     Idle,
///     Tracking,
/// }
///
/// impl StateTransitions for Pan {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         match (self, event) {
///             (Pan::Idle, DRAG_BEGIN) => Some(Pan::Tracking),
///             (Pan::Tracking, DRAG_END) => Some(Pan::Idle),
///             _ => None,
///         }
///     }
/// }
///
/// let mut fsm = StateMachine::new(Pan::Idle);
/// assert_eq!(fsm.send(DRAG_BEGIN), Some(Pan::Tracking));
/// assert_eq!(fsm.send(DRAG_BEGIN), None);
/// ```
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventId) -> Option<Self>;
}

/// A state machine instance
#[derive(Debug, Clone)]
pub struct StateMachine<S: StateTransitions> {
    current_state: S,
    /// Most recent transitions, oldest first
    history: VecDeque<(S, EventId, S)>,
}

impl<S: StateTransitions> StateMachine<S> {
    pub fn new(initial_state: S) -> Self {
        Self {
            current_state: initial_state,
            history: VecDeque::new(),
        }
    }

    /// Get the current state
    pub fn current_state(&self) -> S {
        self.current_state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current_state == state
    }

    /// Check if an event can trigger a transition from the current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.current_state.on_event(event).is_some()
    }

    /// Send an event, returning the new state if a transition happened
    pub fn send(&mut self, event: EventId) -> Option<S> {
        let from = self.current_state;
        let to = from.on_event(event)?;

        self.current_state = to;
        if self.history.len() == HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back((from, event, to));

        tracing::debug!("fsm transition {:?} --{}--> {:?}", from, event, to);
        Some(to)
    }

    /// Get transition history, oldest first
    pub fn history(&self) -> impl Iterator<Item = &(S, EventId, S)> {
        self.history.iter()
    }

    /// Clear transition history
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl<S: StateTransitions + Default> Default for StateMachine<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
