//! Kinetic List
//!
//! A list decorator for mobile UI toolkits that adds a rubber-band bounce
//! with a density-scaled maximum travel, and a "kinetic" tilt of the items
//! nearest an edge while the user drags past it.
//!
//! The decorator never owns views. Hosts implement [`ListHost`] and forward
//! their overscroll and scroll-state notifications to
//! [`TiltBounceListView`]. [`HeadlessList`] is an in-memory host for tests
//! and scripted runs.

pub mod config;
pub mod error;
pub mod headless;
pub mod host;
pub mod widgets;

pub use config::{HostConfig, KineticConfig, KineticFile};
pub use error::{ConfigError, Result};
pub use headless::{HeadlessList, ItemView, ItemViewId};
pub use host::{ListHost, ViewAction};
pub use widgets::{tilt_window, OverscrollEdge, TiltBounceListView};

/// Commonly used types
pub mod prelude {
    pub use crate::config::{HostConfig, KineticConfig, KineticFile};
    pub use crate::headless::HeadlessList;
    pub use crate::host::{ListHost, ViewAction};
    pub use crate::widgets::{OverscrollEdge, TiltBounceListView};
}
