//! Host list seam
//!
//! The decorator never owns views. It talks to the host toolkit's list
//! through [`ListHost`], which exposes the standard list-view contract:
//! visible positions, child enumeration, per-view rotation, a delayed
//! message queue and the toolkit's own overscroll handling.

use std::fmt;
use std::time::Duration;

use kinetic_core::OverscrollRequest;

/// Work posted against a view for later execution on the UI thread
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewAction {
    /// Set the view's rotation about its horizontal axis, in degrees
    SetRotationX(f32),
}

/// A scrollable list owned by the host toolkit.
///
/// `View` is a handle, not an owner. Hosts that recycle views must make a
/// stale handle resolve to nothing: [`ListHost::rotation_x`] returns `None`
/// and setters and posted actions become no-ops.
pub trait ListHost {
    /// Handle to a laid-out child view
    type View: Copy + Eq + fmt::Debug;

    /// Display density factor, read once when a decorator is created
    fn display_density(&self) -> f32;

    /// Adapter position of the first laid-out child
    fn first_visible_position(&self) -> i32;

    /// Adapter position of the last laid-out child
    fn last_visible_position(&self) -> i32;

    /// Number of laid-out children
    fn child_count(&self) -> i32;

    /// Child at a layout index, `None` when out of range
    fn child_at(&self, index: i32) -> Option<Self::View>;

    /// Current rotation of a view, `None` when the handle is stale
    fn rotation_x(&self, view: Self::View) -> Option<f32>;

    /// Set the rotation of a view
    fn set_rotation_x(&mut self, view: Self::View, degrees: f32);

    /// Post a one-shot action against a view after `delay`
    fn post_delayed(&mut self, view: Self::View, delay: Duration, action: ViewAction);

    /// The toolkit's own overscroll handling; returns true when the scroll
    /// was clamped at a bound
    fn base_over_scroll_by(&mut self, request: &OverscrollRequest) -> bool;
}
