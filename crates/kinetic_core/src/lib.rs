//! Kinetic Core
//!
//! Host-independent primitives shared by the kinetic list decorators:
//!
//! - **Scroll Notifications**: overscroll requests and scroll-state phases
//!   as delivered by a host list toolkit
//! - **Gesture State**: the Idle/Handling machine that gates edge tilting
//! - **Deferred Actions**: a single-threaded, virtual-clock queue for
//!   fire-and-forget callbacks posted against views
//!
//! # Example
//!
//! ```rust
//! use kinetic_core::events::event_types;
//! use kinetic_core::gesture::{GestureState, StateTransitions};
//!
//! let state = GestureState::default();
//! assert_eq!(state.on_event(event_types::OVERSCROLL), Some(GestureState::Handling));
//! ```

pub mod events;
pub mod gesture;
pub mod timer;

pub use events::{EventType, OverscrollRequest, ScrollPhase};
pub use gesture::{GestureState, StateTransitions};
pub use timer::{DeferredQueue, TimerId};
