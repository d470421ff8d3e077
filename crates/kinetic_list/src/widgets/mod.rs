//! List widgets

pub mod tilt_list;

pub use tilt_list::{
    tilt_window, OverscrollEdge, TiltBounceListView, MAX_Y_OVERSCROLL_DISTANCE, NEUTRAL_ROTATION,
};
