//! Scroll notification vocabulary
//!
//! The notifications a host list toolkit delivers to a list decorator.

use serde::{Deserialize, Serialize};

/// Notification type identifier
pub type EventType = u32;

/// Notification types understood by gesture state machines
pub mod event_types {
    use super::EventType;

    /// The host asked the list to scroll past its content bounds
    pub const OVERSCROLL: EventType = 1;
    /// The host reported a scroll-state transition (any phase)
    pub const SCROLL_STATE_CHANGED: EventType = 2;
    /// Per-frame scroll position update
    pub const SCROLL: EventType = 3;
}

/// Scroll phase reported by the host on every state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollPhase {
    /// Not scrolling
    #[default]
    Idle,
    /// User is dragging the list with a finger
    TouchScroll,
    /// List is coasting after the finger was lifted
    Fling,
}

impl ScrollPhase {
    /// Map the raw integer phase used by mobile list toolkits (0, 1, 2)
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(ScrollPhase::Idle),
            1 => Some(ScrollPhase::TouchScroll),
            2 => Some(ScrollPhase::Fling),
            _ => None,
        }
    }

    /// Raw integer phase
    pub fn as_raw(&self) -> i32 {
        match self {
            ScrollPhase::Idle => 0,
            ScrollPhase::TouchScroll => 1,
            ScrollPhase::Fling => 2,
        }
    }
}

/// Arguments of a single overscroll notification.
///
/// Mirrors the host toolkit's `overScrollBy` contract: deltas, the current
/// scroll position, the scrollable range and the proposed maximum overscroll
/// on each axis, plus whether the request originated from a touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OverscrollRequest {
    pub delta_x: i32,
    pub delta_y: i32,
    pub scroll_x: i32,
    pub scroll_y: i32,
    pub scroll_range_x: i32,
    pub scroll_range_y: i32,
    pub max_overscroll_x: i32,
    pub max_overscroll_y: i32,
    pub is_touch_event: bool,
}

impl OverscrollRequest {
    /// Vertical-only touch overscroll with no proposed overscroll allowance
    pub fn vertical(delta_y: i32, is_touch_event: bool) -> Self {
        Self {
            delta_y,
            is_touch_event,
            ..Default::default()
        }
    }

    /// Copy of this request with a substituted vertical overscroll allowance
    pub fn with_max_overscroll_y(mut self, max_overscroll_y: i32) -> Self {
        self.max_overscroll_y = max_overscroll_y;
        self
    }

    /// Copy of this request with a different scroll position and range
    pub fn with_scroll_y(mut self, scroll_y: i32, scroll_range_y: i32) -> Self {
        self.scroll_y = scroll_y;
        self.scroll_range_y = scroll_range_y;
        self
    }

    /// True when the list is being pulled toward its bottom edge
    pub fn is_toward_bottom(&self) -> bool {
        self.delta_y > 0
    }
}
