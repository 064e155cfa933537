//! Typed state machines for widget phases
//!
//! Widgets define their own state enum and map events to transitions with
//! pattern matching; the runner adds entry callbacks and a transition
//! history on top. States are plain `Copy` enums, so a machine is a single
//! word of current state plus its callback table.
//!
//! ```rust
//! use countup_core::events::event_types::*;
//! use countup_core::fsm::{Fsm, StateTransitions};
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Phase {
//!     Idle,
//!     Counting,
//!     Settled,
//! }
//!
//! impl StateTransitions for Phase {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Phase::Idle, ENTER_VIEW) => Some(Phase::Counting),
//!             (Phase::Counting, DRIVER_SETTLED) => Some(Phase::Settled),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut fsm = Fsm::new(Phase::Idle);
//! assert_eq!(fsm.send(ENTER_VIEW), Phase::Counting);
//! assert_eq!(fsm.send(ENTER_VIEW), Phase::Counting); // no-op
//! ```

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::hash::Hash;

use crate::events::EventType;

/// An action executed when a state is entered
pub type Action = Box<dyn FnMut() + Send>;

/// Trait for user-defined state types that handle event transitions
///
/// Implement this on a state enum to define how events cause transitions.
/// Returning `None` means the event does not apply in the current state.
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// A state machine over a user-defined state enum
pub struct Fsm<S: StateTransitions> {
    current: S,
    entry_callbacks: FxHashMap<S, SmallVec<[Action; 2]>>,
    /// History of state transitions (for debugging)
    history: Vec<(S, EventType, S)>,
}

impl<S: StateTransitions> Fsm<S> {
    /// Create a state machine starting in the given state
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            entry_callbacks: FxHashMap::default(),
            history: Vec::new(),
        }
    }

    /// Get the current state
    pub fn current(&self) -> S {
        self.current
    }

    /// Check if the machine is in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Get the transition history
    pub fn history(&self) -> &[(S, EventType, S)] {
        &self.history
    }

    /// Check if an event would trigger a transition from the current state
    pub fn can_send(&self, event: EventType) -> bool {
        self.current.on_event(event).is_some()
    }

    /// Register an entry callback for a state
    pub fn on_enter<F: FnMut() + Send + 'static>(&mut self, state: S, callback: F) {
        self.entry_callbacks
            .entry(state)
            .or_default()
            .push(Box::new(callback));
    }

    /// Send an event, potentially triggering a transition.
    ///
    /// Entry callbacks run only when a transition actually occurs; unmatched
    /// events leave state and history untouched.
    pub fn send(&mut self, event: EventType) -> S {
        let Some(next) = self.current.on_event(event) else {
            return self.current;
        };

        let previous = self.current;
        self.current = next;
        self.history.push((previous, event, next));

        tracing::trace!("fsm transition {:?} --{}--> {:?}", previous, event, next);

        if let Some(callbacks) = self.entry_callbacks.get_mut(&next) {
            for callback in callbacks.iter_mut() {
                callback();
            }
        }

        next
    }
}
