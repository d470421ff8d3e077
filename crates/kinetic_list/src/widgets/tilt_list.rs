//! Tilt/bounce list decorator
//!
//! Wraps a host list and adds two cosmetic behaviors to its scrolling:
//!
//! - **Bounce**: overscroll travel is clamped to a density-scaled maximum
//!   (200 density-independent units) regardless of what the toolkit proposes
//! - **Kinetic tilt**: while the user drags past an edge, the items nearest
//!   that edge are rotated about their horizontal axis, then put back to
//!   neutral after a delay once scrolling changes state
//!
//! # Example
//!
//! ```rust
//! use kinetic_core::{OverscrollRequest, ScrollPhase};
//! use kinetic_list::prelude::*;
//!
//! let mut host = HeadlessList::with_density(2.0);
//! let mut list = TiltBounceListView::with_config(KineticConfig::kinetic(), &host);
//!
//! // Pull down past the top edge
//! assert!(list.over_scroll_by(&mut host, OverscrollRequest::vertical(-8, true)));
//! assert_eq!(host.child_rotation(0), Some(30.0));
//!
//! // Finger lifted: tilted items return to neutral after the reset delay
//! list.on_scroll_state_changed(&mut host, ScrollPhase::Idle);
//! host.advance_ms(200);
//! assert_eq!(host.child_rotation(0), Some(0.0));
//! ```
//!
//! # Gesture gating
//!
//! Tilting only starts on the notification that opens a gesture
//! (`GestureState::Idle -> Handling`). The gesture closes on any
//! scroll-state change that finds a tilted child, including a drag turning
//! into a fling.

use kinetic_core::events::{event_types, EventType};
use kinetic_core::{GestureState, OverscrollRequest, ScrollPhase, StateTransitions};
use smallvec::SmallVec;

use crate::config::KineticConfig;
use crate::host::{ListHost, ViewAction};

/// Overscroll allowance in density-independent units
pub const MAX_Y_OVERSCROLL_DISTANCE: i32 = 200;

/// Rotation of an item that is not tilted
pub const NEUTRAL_ROTATION: f32 = 0.0;

/// Which edge of the list is being pulled past
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverscrollEdge {
    Top,
    Bottom,
}

/// Layout indices of the tilt window, in visiting order.
///
/// The top window runs upward from `anchor` to `anchor + items`; the bottom
/// window runs downward from `anchor` to `anchor - items`. Both ends are
/// inclusive and indices outside `0..child_count` are dropped.
pub fn tilt_window(
    edge: OverscrollEdge,
    anchor: i32,
    items: i32,
    child_count: i32,
) -> SmallVec<[i32; 8]> {
    let (lo, hi) = match edge {
        OverscrollEdge::Top => (anchor, anchor.saturating_add(items)),
        OverscrollEdge::Bottom => (anchor.saturating_sub(items), anchor),
    };
    let lo = lo.max(0);
    let hi = hi.min(child_count.saturating_sub(1));
    if lo > hi {
        return SmallVec::new();
    }

    match edge {
        OverscrollEdge::Top => (lo..=hi).collect(),
        OverscrollEdge::Bottom => (lo..=hi).rev().collect(),
    }
}

/// Whether an overscroll notification opens a new tilt gesture.
///
/// Touch and programmatic overscroll share one gate: neither reopens a
/// gesture that is already being handled.
#[allow(clippy::nonminimal_bool)]
fn opens_gesture(is_touch_event: bool, handling: bool) -> bool {
    (is_touch_event && !handling) || (!is_touch_event && !handling)
}

/// List decorator adding bounce clamping and edge-item tilt
#[derive(Debug, Clone)]
pub struct TiltBounceListView {
    config: KineticConfig,
    /// Density-scaled overscroll allowance, fixed at construction
    max_y_overscroll: i32,
    gesture: GestureState,
}

impl TiltBounceListView {
    /// Create a decorator with default settings for a host list
    pub fn new<H: ListHost>(host: &H) -> Self {
        Self::with_config(KineticConfig::default(), host)
    }

    /// Create a decorator with the given settings for a host list
    pub fn with_config<H: ListHost>(config: KineticConfig, host: &H) -> Self {
        Self::with_density(config, host.display_density())
    }

    /// Create a decorator for an explicit display density
    pub fn with_density(config: KineticConfig, display_density: f32) -> Self {
        let max_y_overscroll = (display_density * MAX_Y_OVERSCROLL_DISTANCE as f32) as i32;
        tracing::debug!(
            "tilt list created: density={} max_y_overscroll={}",
            display_density,
            max_y_overscroll
        );
        Self {
            config,
            max_y_overscroll,
            gesture: GestureState::Idle,
        }
    }

    // =========================================================================
    // Host notifications
    // =========================================================================

    /// Handle an overscroll notification.
    ///
    /// With bounce enabled the request is forwarded to the host's own
    /// handling with the vertical allowance replaced, and its result is
    /// returned. With bounce disabled the scroll is reported as consumed and
    /// the host is never consulted.
    pub fn over_scroll_by<H: ListHost>(
        &mut self,
        host: &mut H,
        request: OverscrollRequest,
    ) -> bool {
        if self.config.kinetic
            && !self.config.bouncing
            && opens_gesture(request.is_touch_event, self.gesture.is_handling())
        {
            self.send(event_types::OVERSCROLL);

            let first = host.first_visible_position();
            let last = host.last_visible_position();

            if request.is_toward_bottom() {
                self.tilt_edge(host, OverscrollEdge::Bottom, last.saturating_sub(first));
            } else {
                self.tilt_edge(host, OverscrollEdge::Top, first);
            }
        }

        if self.config.bouncing {
            let request = request.with_max_overscroll_y(self.max_y_overscroll);
            tracing::trace!(
                "bounce: delta_y={} max_overscroll_y={}",
                request.delta_y,
                request.max_overscroll_y
            );
            host.base_over_scroll_by(&request)
        } else {
            true
        }
    }

    /// Handle a scroll-state change (any phase).
    ///
    /// Every tilted child gets a deferred reset and the gesture closes.
    pub fn on_scroll_state_changed<H: ListHost>(&mut self, host: &mut H, phase: ScrollPhase) {
        tracing::trace!("scroll state -> {:?}", phase);

        for index in 0..host.child_count() {
            let Some(view) = host.child_at(index) else {
                continue;
            };
            match host.rotation_x(view) {
                Some(rotation) if rotation != NEUTRAL_ROTATION => {
                    self.post_reset(host, view);
                    self.send(event_types::SCROLL_STATE_CHANGED);
                }
                _ => {}
            }
        }
    }

    /// Per-frame scroll position update. Not used.
    pub fn on_scroll(&mut self, _first_visible: i32, _visible_count: i32, _total_count: i32) {}

    // =========================================================================
    // Tilt
    // =========================================================================

    fn tilt_edge<H: ListHost>(&self, host: &mut H, edge: OverscrollEdge, anchor: i32) {
        let window = tilt_window(edge, anchor, self.config.tilt_items, host.child_count());
        tracing::trace!("tilt {:?} edge: anchor={} window={:?}", edge, anchor, window);

        for index in window {
            if let Some(view) = host.child_at(index) {
                self.tilt(host, view);
            }
        }
    }

    /// Tilt a neutral view; tilted views are left as they are
    fn tilt<H: ListHost>(&self, host: &mut H, view: H::View) {
        if host.rotation_x(view) != Some(NEUTRAL_ROTATION) {
            return;
        }

        host.set_rotation_x(view, self.config.tilt_degrees);

        if !self.gesture.is_handling() {
            self.post_reset(host, view);
        }
    }

    fn post_reset<H: ListHost>(&self, host: &mut H, view: H::View) {
        tracing::trace!(
            "reset {:?} in {}ms",
            view,
            self.config.reset_delay_ms.max(0)
        );
        host.post_delayed(
            view,
            self.config.reset_delay(),
            ViewAction::SetRotationX(NEUTRAL_ROTATION),
        );
    }

    fn send(&mut self, event: EventType) {
        if let Some(next) = self.gesture.on_event(event) {
            tracing::debug!("gesture {:?} -> {:?}", self.gesture, next);
            self.gesture = next;
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    pub fn config(&self) -> &KineticConfig {
        &self.config
    }

    /// Replace all settings; takes effect on the next notification
    pub fn set_config(&mut self, config: KineticConfig) {
        self.config = config;
    }

    pub fn tilt_degrees(&self) -> f32 {
        self.config.tilt_degrees
    }

    pub fn set_tilt_degrees(&mut self, degrees: f32) {
        self.config.tilt_degrees = degrees;
    }

    pub fn reset_delay_ms(&self) -> i32 {
        self.config.reset_delay_ms
    }

    pub fn set_reset_delay_ms(&mut self, delay_ms: i32) {
        self.config.reset_delay_ms = delay_ms;
    }

    pub fn tilt_items(&self) -> i32 {
        self.config.tilt_items
    }

    pub fn set_tilt_items(&mut self, items: i32) {
        self.config.tilt_items = items;
    }

    pub fn is_kinetic(&self) -> bool {
        self.config.kinetic
    }

    pub fn set_kinetic(&mut self, kinetic: bool) {
        self.config.kinetic = kinetic;
    }

    pub fn is_bouncing(&self) -> bool {
        self.config.bouncing
    }

    pub fn set_bouncing(&mut self, bouncing: bool) {
        self.config.bouncing = bouncing;
    }

    /// Density-scaled overscroll allowance passed down in bounce mode
    pub fn max_y_overscroll_distance(&self) -> i32 {
        self.max_y_overscroll
    }

    pub fn gesture_state(&self) -> GestureState {
        self.gesture
    }

    /// True while an overscroll gesture is being handled
    pub fn is_handling_gesture(&self) -> bool {
        self.gesture.is_handling()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HostConfig;
    use crate::headless::HeadlessList;

    fn host(item_count: i32, visible_items: i32, density: f32) -> HeadlessList {
        HeadlessList::new(HostConfig {
            display_density: density,
            item_count,
            visible_items,
        })
    }

    fn down(delta: i32) -> OverscrollRequest {
        OverscrollRequest::vertical(delta, true)
    }

    #[test]
    fn test_max_overscroll_scales_with_density() {
        let list = TiltBounceListView::new(&host(10, 4, 2.0));
        assert_eq!(list.max_y_overscroll_distance(), 400);

        let list = TiltBounceListView::new(&host(10, 4, 1.5));
        assert_eq!(list.max_y_overscroll_distance(), 300);

        // truncated, not rounded
        let list = TiltBounceListView::with_density(KineticConfig::default(), 0.756);
        assert_eq!(list.max_y_overscroll_distance(), 151);
    }

    #[test]
    fn test_tilt_window_top() {
        assert_eq!(tilt_window(OverscrollEdge::Top, 0, 3, 8).as_slice(), &[0, 1, 2, 3]);
        assert_eq!(tilt_window(OverscrollEdge::Top, 6, 3, 8).as_slice(), &[6, 7]);
        assert!(tilt_window(OverscrollEdge::Top, 10, 3, 8).is_empty());
        assert!(tilt_window(OverscrollEdge::Top, 0, -1, 8).is_empty());
    }

    #[test]
    fn test_tilt_window_bottom() {
        assert_eq!(
            tilt_window(OverscrollEdge::Bottom, 5, 3, 8).as_slice(),
            &[5, 4, 3, 2]
        );
        assert_eq!(tilt_window(OverscrollEdge::Bottom, 1, 3, 8).as_slice(), &[1, 0]);
        assert!(tilt_window(OverscrollEdge::Bottom, 0, 3, 0).is_empty());
    }

    #[test]
    fn test_tilt_window_extremes_do_not_overflow() {
        assert_eq!(
            tilt_window(OverscrollEdge::Top, 2, i32::MAX, 5).as_slice(),
            &[2, 3, 4]
        );
        assert_eq!(
            tilt_window(OverscrollEdge::Bottom, 2, i32::MAX, 5).as_slice(),
            &[2, 1, 0]
        );
        assert!(tilt_window(OverscrollEdge::Bottom, i32::MIN, 1, 5).is_empty());
    }

    #[test]
    fn test_tilt_window_negative_and_zero_items() {
        for edge in [OverscrollEdge::Top, OverscrollEdge::Bottom] {
            assert!(tilt_window(edge, 3, -1, 8).is_empty());
            assert!(tilt_window(edge, 3, -5, 8).is_empty());
            assert_eq!(tilt_window(edge, 3, 0, 8).as_slice(), &[3]);
            assert!(tilt_window(edge, 9, 0, 8).is_empty());
        }
    }

    #[test]
    fn test_gate_ignores_touch_flag() {
        assert!(opens_gesture(true, false));
        assert!(opens_gesture(false, false));
        assert!(!opens_gesture(true, true));
        assert!(!opens_gesture(false, true));
    }

    #[test]
    fn test_bounce_off_consumes_without_delegating() {
        let mut host = host(20, 8, 2.0);
        let mut list = TiltBounceListView::new(&host);

        assert!(list.over_scroll_by(&mut host, down(25)));
        assert!(list.over_scroll_by(&mut host, down(-25)));
        assert!(host.base_requests().is_empty());
    }

    #[test]
    fn test_bounce_on_substitutes_allowance() {
        let mut host = host(20, 8, 2.0);
        let mut list = TiltBounceListView::with_config(KineticConfig::bouncing(), &host);

        let request = down(-30).with_max_overscroll_y(0);
        let clamped = list.over_scroll_by(&mut host, request);

        assert!(!clamped);
        assert_eq!(host.base_requests().len(), 1);
        assert_eq!(host.base_requests()[0].max_overscroll_y, 400);
        assert_eq!(host.base_requests()[0].delta_y, -30);
    }

    #[test]
    fn test_bounce_returns_host_result() {
        let mut host = host(20, 8, 1.0);
        let mut list = TiltBounceListView::with_config(KineticConfig::bouncing(), &host);

        // Past the 200 unit allowance
        assert!(list.over_scroll_by(&mut host, down(-250)));
        assert_eq!(host.scroll_y(), -200);
    }

    #[test]
    fn test_kinetic_off_never_rotates() {
        let mut host = host(20, 8, 1.0);
        let mut list = TiltBounceListView::new(&host);

        list.over_scroll_by(&mut host, down(-10));
        list.over_scroll_by(&mut host, down(10));
        assert!(host.tilted_children().is_empty());
        assert_eq!(list.gesture_state(), GestureState::Idle);
    }

    #[test]
    fn test_bouncing_suppresses_tilt() {
        let mut host = host(20, 8, 1.0);
        let config = KineticConfig {
            kinetic: true,
            bouncing: true,
            ..Default::default()
        };
        let mut list = TiltBounceListView::with_config(config, &host);

        list.over_scroll_by(&mut host, down(-10));
        assert!(host.tilted_children().is_empty());
        assert_eq!(host.base_requests().len(), 1);
    }

    #[test]
    fn test_top_overscroll_tilts_top_window() {
        let mut host = host(20, 8, 1.0);
        let mut list = TiltBounceListView::with_config(KineticConfig::kinetic(), &host);

        assert!(list.over_scroll_by(&mut host, down(-10)));
        assert_eq!(host.tilted_children(), vec![0, 1, 2, 3]);
        assert_eq!(host.child_rotation(0), Some(30.0));
        assert!(list.is_handling_gesture());
        // gesture is open, so no reset was posted at tilt time
        assert_eq!(host.pending_actions(), 0);
    }

    #[test]
    fn test_bottom_overscroll_tilts_bottom_window() {
        let mut host = host(40, 6, 2.0);
        host.scroll_to(10);
        assert_eq!(host.last_visible_position(), 15);

        let mut list = TiltBounceListView::with_config(KineticConfig::kinetic(), &host);
        list.over_scroll_by(&mut host, down(12));

        assert_eq!(host.tilted_children(), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_top_window_is_anchored_at_first_position() {
        // first visible position 2 used as a layout index
        let mut host = host(40, 6, 1.0);
        host.scroll_to(2);
        let mut list = TiltBounceListView::with_config(KineticConfig::kinetic(), &host);

        list.over_scroll_by(&mut host, down(-4));
        assert_eq!(host.tilted_children(), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_out_of_range_window_is_skipped() {
        let mut host = host(40, 6, 1.0);
        host.scroll_to(20);
        let mut list = TiltBounceListView::with_config(KineticConfig::kinetic(), &host);

        assert!(list.over_scroll_by(&mut host, down(-4)));
        assert!(host.tilted_children().is_empty());
        assert!(list.is_handling_gesture());
    }

    #[test]
    fn test_only_first_notification_tilts() {
        let mut host = host(20, 8, 1.0);
        let mut list = TiltBounceListView::with_config(KineticConfig::kinetic(), &host);

        list.over_scroll_by(&mut host, down(-10));
        list.set_tilt_items(7);
        list.over_scroll_by(&mut host, down(-10));
        list.over_scroll_by(&mut host, OverscrollRequest::vertical(-10, false));

        assert_eq!(host.tilted_children(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_state_change_schedules_reset_and_closes_gesture() {
        let mut host = host(20, 8, 1.0);
        let mut list = TiltBounceListView::with_config(KineticConfig::kinetic(), &host);

        list.over_scroll_by(&mut host, down(-10));
        list.on_scroll_state_changed(&mut host, ScrollPhase::Idle);

        assert_eq!(list.gesture_state(), GestureState::Idle);
        assert_eq!(host.pending_actions(), 4);

        host.advance_ms(199);
        assert_eq!(host.tilted_children().len(), 4);
        host.advance_ms(1);
        assert!(host.tilted_children().is_empty());
    }

    #[test]
    fn test_state_change_without_tilt_keeps_gesture() {
        let mut host = host(40, 6, 1.0);
        host.scroll_to(20);
        let mut list = TiltBounceListView::with_config(KineticConfig::kinetic(), &host);

        // gesture opens but nothing was tilted
        list.over_scroll_by(&mut host, down(-4));
        list.on_scroll_state_changed(&mut host, ScrollPhase::Idle);

        assert!(list.is_handling_gesture());
        assert_eq!(host.pending_actions(), 0);
    }

    #[test]
    fn test_drag_to_fling_closes_gesture() {
        let mut host = host(20, 8, 1.0);
        let mut list = TiltBounceListView::with_config(KineticConfig::kinetic(), &host);

        list.on_scroll_state_changed(&mut host, ScrollPhase::TouchScroll);
        list.over_scroll_by(&mut host, down(-10));
        list.on_scroll_state_changed(&mut host, ScrollPhase::Fling);

        assert!(!list.is_handling_gesture());

        // The next overscroll opens a fresh gesture, but tilted items stay put
        list.over_scroll_by(&mut host, down(-10));
        assert!(list.is_handling_gesture());
        assert_eq!(host.tilted_children(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_tilt_is_not_cumulative() {
        let mut host = host(20, 8, 1.0);
        let mut list = TiltBounceListView::with_config(KineticConfig::kinetic(), &host);

        list.over_scroll_by(&mut host, down(-10));
        list.on_scroll_state_changed(&mut host, ScrollPhase::Fling);
        list.over_scroll_by(&mut host, down(-10));

        assert_eq!(host.child_rotation(0), Some(30.0));
        assert_eq!(host.pending_actions(), 4);
    }

    #[test]
    fn test_repeated_state_changes_post_independent_resets() {
        let mut host = host(20, 8, 1.0);
        let mut list = TiltBounceListView::with_config(KineticConfig::kinetic(), &host);

        list.over_scroll_by(&mut host, down(-10));
        list.on_scroll_state_changed(&mut host, ScrollPhase::Fling);
        host.advance_ms(100);
        list.on_scroll_state_changed(&mut host, ScrollPhase::Idle);
        assert_eq!(host.pending_actions(), 8);

        assert_eq!(host.advance_ms(100), 4);
        assert!(host.tilted_children().is_empty());
        // second batch resets already-neutral views
        assert_eq!(host.advance_ms(100), 4);
        assert!(host.tilted_children().is_empty());
    }

    #[test]
    fn test_reset_tolerates_recycled_views() {
        let mut host = host(40, 6, 1.0);
        let mut list = TiltBounceListView::with_config(KineticConfig::kinetic(), &host);

        list.over_scroll_by(&mut host, down(-10));
        list.on_scroll_state_changed(&mut host, ScrollPhase::Idle);
        host.scroll_to(30);

        assert_eq!(host.advance_ms(200), 0);
        assert!(host.tilted_children().is_empty());
    }

    #[test]
    fn test_settings_take_effect_on_next_gesture() {
        let mut host = host(20, 8, 1.0);
        let mut list = TiltBounceListView::with_config(KineticConfig::kinetic(), &host);
        list.set_tilt_degrees(12.5);
        list.set_tilt_items(1);
        list.set_reset_delay_ms(50);

        list.over_scroll_by(&mut host, down(-10));
        assert_eq!(host.child_rotations()[..3], [12.5, 12.5, 0.0]);

        list.on_scroll_state_changed(&mut host, ScrollPhase::Idle);
        host.advance_ms(50);
        assert!(host.tilted_children().is_empty());

        list.set_kinetic(false);
        list.over_scroll_by(&mut host, down(-10));
        assert!(host.tilted_children().is_empty());
    }

    #[test]
    fn test_accessors() {
        let host = host(20, 8, 1.0);
        let mut list = TiltBounceListView::new(&host);
        assert_eq!(list.tilt_degrees(), 30.0);
        assert_eq!(list.reset_delay_ms(), 200);
        assert_eq!(list.tilt_items(), 3);
        assert!(!list.is_kinetic());
        assert!(!list.is_bouncing());

        list.set_bouncing(true);
        list.set_kinetic(true);
        assert!(list.is_bouncing());
        assert!(list.is_kinetic());

        list.set_config(KineticConfig::default());
        assert_eq!(list.config(), &KineticConfig::default());
    }
}
