//! In-memory list host
//!
//! [`HeadlessList`] implements [`ListHost`] without a toolkit: a fixed number
//! of adapter items, a window of laid-out child views, view recycling when
//! the window moves, and a virtual-clock UI queue for posted actions. Used
//! by tests and by scripted scenario runs.

use std::time::Duration;

use kinetic_core::{DeferredQueue, OverscrollRequest};
use slotmap::{new_key_type, SlotMap};

use crate::config::{HostConfig, MAX_VISIBLE_ITEMS};
use crate::host::{ListHost, ViewAction};
use crate::widgets::NEUTRAL_ROTATION;

new_key_type! {
    /// Generational handle to a laid-out item view
    pub struct ItemViewId;
}

/// A laid-out item view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemView {
    /// Adapter position this view is bound to
    pub position: i32,
    /// Rotation about the horizontal axis, in degrees
    pub rotation_x: f32,
}

/// Headless list host with view recycling and a virtual UI queue
pub struct HeadlessList {
    config: HostConfig,
    first_visible: i32,
    views: SlotMap<ItemViewId, ItemView>,
    /// Laid-out children in layout order
    children: Vec<ItemViewId>,
    queue: DeferredQueue<(ItemViewId, ViewAction)>,
    scroll_x: i32,
    scroll_y: i32,
    base_requests: Vec<OverscrollRequest>,
}

impl HeadlessList {
    pub fn new(config: HostConfig) -> Self {
        let mut list = Self {
            config,
            first_visible: 0,
            views: SlotMap::with_key(),
            children: Vec::new(),
            queue: DeferredQueue::new(),
            scroll_x: 0,
            scroll_y: 0,
            base_requests: Vec::new(),
        };
        list.layout();
        list
    }

    /// Host with the given density and default geometry
    pub fn with_density(display_density: f32) -> Self {
        Self::new(HostConfig {
            display_density,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Scroll so that `first` is the first laid-out position.
    ///
    /// Views whose positions leave the window are recycled; their handles
    /// go stale.
    pub fn scroll_to(&mut self, first: i32) {
        let max_first = (self.config.item_count - self.window_len()).max(0);
        self.first_visible = first.clamp(0, max_first);
        self.layout();
    }

    fn window_len(&self) -> i32 {
        self.config
            .visible_items
            .clamp(0, MAX_VISIBLE_ITEMS)
            .min(self.config.item_count.max(0))
    }

    fn layout(&mut self) {
        let first = self.first_visible;
        let last = first + self.window_len();

        let views = &mut self.views;
        self.children.retain(|&id| {
            let keep = views
                .get(id)
                .is_some_and(|v| v.position >= first && v.position < last);
            if !keep {
                views.remove(id);
            }
            keep
        });

        // Retained children stay in ascending position order, so one pass
        // merges them with the new window.
        let mut retained = std::mem::take(&mut self.children).into_iter().peekable();
        let mut laid_out = Vec::new();
        for position in first..last {
            let existing =
                retained.next_if(|&id| self.views.get(id).is_some_and(|v| v.position == position));
            let id = match existing {
                Some(id) => id,
                None => self.views.insert(ItemView {
                    position,
                    rotation_x: NEUTRAL_ROTATION,
                }),
            };
            laid_out.push(id);
        }
        self.children = laid_out;

        tracing::trace!(
            "headless layout: positions {}..{} ({} views)",
            first,
            last,
            self.children.len()
        );
    }

    /// Advance the virtual clock and run every action now due.
    ///
    /// Returns the number of actions that reached a live view.
    pub fn advance(&mut self, by: Duration) -> usize {
        let fired = self.queue.advance(by);
        let mut applied = 0;
        for (id, action) in fired {
            let Some(view) = self.views.get_mut(id) else {
                tracing::warn!("dropping {:?} for recycled view {:?}", action, id);
                continue;
            };
            match action {
                ViewAction::SetRotationX(degrees) => view.rotation_x = degrees,
            }
            applied += 1;
        }
        applied
    }

    /// Advance the virtual clock by whole milliseconds
    pub fn advance_ms(&mut self, ms: u64) -> usize {
        self.advance(Duration::from_millis(ms))
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.queue.now()
    }

    /// Number of posted actions that have not fired
    pub fn pending_actions(&self) -> usize {
        self.queue.len()
    }

    pub fn view(&self, id: ItemViewId) -> Option<&ItemView> {
        self.views.get(id)
    }

    /// Rotation of the child at a layout index
    pub fn child_rotation(&self, index: i32) -> Option<f32> {
        self.child_at(index).and_then(|id| self.rotation_x(id))
    }

    /// Rotations of all laid-out children, in layout order
    pub fn child_rotations(&self) -> Vec<f32> {
        self.children
            .iter()
            .filter_map(|&id| self.views.get(id).map(|v| v.rotation_x))
            .collect()
    }

    /// Layout indices of children whose rotation is not neutral
    pub fn tilted_children(&self) -> Vec<i32> {
        self.child_rotations()
            .iter()
            .enumerate()
            .filter(|(_, r)| **r != NEUTRAL_ROTATION)
            .map(|(i, _)| i as i32)
            .collect()
    }

    /// Every request forwarded to the base overscroll handling
    pub fn base_requests(&self) -> &[OverscrollRequest] {
        &self.base_requests
    }

    pub fn scroll_y(&self) -> i32 {
        self.scroll_y
    }
}

/// Clamp one axis the way list toolkits do; returns the new position and
/// whether it hit a bound
fn clamp_axis(scroll: i32, delta: i32, range: i32, max_overscroll: i32) -> (i32, bool) {
    let proposed = scroll.saturating_add(delta);
    let top = max_overscroll.saturating_neg();
    let bottom = range.saturating_add(max_overscroll);
    if proposed > bottom {
        (bottom, true)
    } else if proposed < top {
        (top, true)
    } else {
        (proposed, false)
    }
}

impl ListHost for HeadlessList {
    type View = ItemViewId;

    fn display_density(&self) -> f32 {
        self.config.display_density
    }

    fn first_visible_position(&self) -> i32 {
        self.first_visible
    }

    fn last_visible_position(&self) -> i32 {
        self.first_visible + self.children.len() as i32 - 1
    }

    fn child_count(&self) -> i32 {
        self.children.len() as i32
    }

    fn child_at(&self, index: i32) -> Option<ItemViewId> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.children.get(i).copied())
    }

    fn rotation_x(&self, view: ItemViewId) -> Option<f32> {
        self.views.get(view).map(|v| v.rotation_x)
    }

    fn set_rotation_x(&mut self, view: ItemViewId, degrees: f32) {
        if let Some(v) = self.views.get_mut(view) {
            v.rotation_x = degrees;
        }
    }

    fn post_delayed(&mut self, view: ItemViewId, delay: Duration, action: ViewAction) {
        self.queue.post(delay, (view, action));
    }

    fn base_over_scroll_by(&mut self, request: &OverscrollRequest) -> bool {
        self.base_requests.push(*request);

        let (x, clamped_x) = clamp_axis(
            request.scroll_x,
            request.delta_x,
            request.scroll_range_x,
            request.max_overscroll_x,
        );
        let (y, clamped_y) = clamp_axis(
            request.scroll_y,
            request.delta_y,
            request.scroll_range_y,
            request.max_overscroll_y,
        );
        self.scroll_x = x;
        self.scroll_y = y;
        clamped_x || clamped_y
    }
}
