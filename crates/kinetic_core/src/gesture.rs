//! Gesture state machine
//!
//! Tracks whether a list decorator is in the middle of handling an
//! overscroll gesture. Two states, two transitions:
//!
//! - `Idle -> Handling` on the first qualifying overscroll notification
//! - `Handling -> Idle` on any scroll-state change while an item is tilted
//!
//! Every other (state, event) pair is ignored.

use std::hash::Hash;

use crate::events::{event_types, EventType};

/// Trait for states that react to notification events
///
/// ```rust
/// use kinetic_core::events::event_types;
/// use kinetic_core::gesture::StateTransitions;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// enum Pull {
///     Resting,
///     Stretched,
/// }
///
/// impl StateTransitions for Pull {
///     fn on_event(&self, event: u32) -> Option<Self> {
///         match (self, event) {
///             (Pull::Resting, event_types::OVERSCROLL) => Some(Pull::Stretched),
///             (Pull::Stretched, event_types::SCROLL_STATE_CHANGED) => Some(Pull::Resting),
///             _ => None,
///         }
///     }
/// }
///
/// assert_eq!(Pull::Resting.on_event(event_types::OVERSCROLL), Some(Pull::Stretched));
/// ```
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// Whether an overscroll gesture is currently being handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureState {
    #[default]
    Idle,
    Handling,
}

impl GestureState {
    /// Returns true while an overscroll gesture is in progress
    pub fn is_handling(&self) -> bool {
        matches!(self, GestureState::Handling)
    }
}

impl StateTransitions for GestureState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        match (self, event) {
            (GestureState::Idle, event_types::OVERSCROLL) => Some(GestureState::Handling),
            (GestureState::Handling, event_types::SCROLL_STATE_CHANGED) => {
                Some(GestureState::Idle)
            }
            _ => None,
        }
    }
}
