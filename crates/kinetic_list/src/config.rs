//! List configuration and `kinetic.toml` handling
//!
//! ```toml
//! [list]
//! tilt_degrees = 30.0
//! reset_delay_ms = 200
//! tilt_items = 3
//! kinetic = true
//! bouncing = false
//!
//! [host]
//! display_density = 2.0
//! item_count = 50
//! visible_items = 8
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default item rotation while tilted, in degrees
pub const DEFAULT_TILT_DEGREES: f32 = 30.0;
/// Default delay before a tilted item returns to neutral, in milliseconds
pub const DEFAULT_RESET_DELAY_MS: i32 = 200;
/// Default number of items past the edge item that get tilted
pub const DEFAULT_TILT_ITEMS: i32 = 3;
/// Upper bound on child views the headless host lays out at once
pub const MAX_VISIBLE_ITEMS: i32 = 1024;

/// Behavior settings for a tilt/bounce list.
///
/// Any value is accepted. A negative reset delay fires on the next queue
/// drain; a negative item count empties the tilt window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KineticConfig {
    /// Rotation about the horizontal axis applied to edge items
    #[serde(default = "default_tilt_degrees")]
    pub tilt_degrees: f32,
    /// Delay before a tilted item is put back to neutral
    #[serde(default = "default_reset_delay_ms")]
    pub reset_delay_ms: i32,
    /// Items beyond the edge item included in the tilt window
    #[serde(default = "default_tilt_items")]
    pub tilt_items: i32,
    /// Tilt edge items while overscrolling
    #[serde(default)]
    pub kinetic: bool,
    /// Clamp overscroll travel to the density-scaled maximum
    #[serde(default)]
    pub bouncing: bool,
}

fn default_tilt_degrees() -> f32 {
    DEFAULT_TILT_DEGREES
}

fn default_reset_delay_ms() -> i32 {
    DEFAULT_RESET_DELAY_MS
}

fn default_tilt_items() -> i32 {
    DEFAULT_TILT_ITEMS
}

impl Default for KineticConfig {
    fn default() -> Self {
        Self {
            tilt_degrees: DEFAULT_TILT_DEGREES,
            reset_delay_ms: DEFAULT_RESET_DELAY_MS,
            tilt_items: DEFAULT_TILT_ITEMS,
            kinetic: false,
            bouncing: false,
        }
    }
}

impl KineticConfig {
    /// Config with edge tilt enabled
    pub fn kinetic() -> Self {
        Self {
            kinetic: true,
            ..Default::default()
        }
    }

    /// Config with bounce clamping enabled
    pub fn bouncing() -> Self {
        Self {
            bouncing: true,
            ..Default::default()
        }
    }

    /// Reset delay as a duration (negative delays collapse to zero)
    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms.max(0) as u64)
    }
}

/// Geometry of the in-memory host used by headless runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Display density factor (pixels per density-independent unit)
    #[serde(default = "default_display_density")]
    pub display_density: f32,
    /// Number of items in the adapter
    #[serde(default = "default_item_count")]
    pub item_count: i32,
    /// Number of child views laid out at once
    #[serde(default = "default_visible_items")]
    pub visible_items: i32,
}

fn default_display_density() -> f32 {
    1.0
}

fn default_item_count() -> i32 {
    50
}

fn default_visible_items() -> i32 {
    8
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            display_density: default_display_density(),
            item_count: default_item_count(),
            visible_items: default_visible_items(),
        }
    }
}

impl HostConfig {
    /// Check the geometry is something a headless host can lay out
    pub fn validate(&self) -> Result<()> {
        if !self.display_density.is_finite() || self.display_density <= 0.0 {
            return Err(ConfigError::InvalidHost {
                field: "display_density",
                value: self.display_density.to_string(),
                expected: "a finite value above 0",
            });
        }
        if self.item_count < 0 {
            return Err(ConfigError::InvalidHost {
                field: "item_count",
                value: self.item_count.to_string(),
                expected: "0 or more",
            });
        }
        if !(0..=MAX_VISIBLE_ITEMS).contains(&self.visible_items) {
            return Err(ConfigError::InvalidHost {
                field: "visible_items",
                value: self.visible_items.to_string(),
                expected: "0..=1024",
            });
        }
        Ok(())
    }
}

/// Top-level configuration file (kinetic.toml)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KineticFile {
    #[serde(default)]
    pub list: KineticConfig,
    #[serde(default)]
    pub host: HostConfig,
}

impl KineticFile {
    /// Parse configuration from TOML text
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let file: Self = toml::from_str(input)?;
        file.validate()?;
        Ok(file)
    }

    /// Validate the parts of the file that are not accepted as-is
    pub fn validate(&self) -> Result<()> {
        self.host.validate()
    }

    /// Load configuration from a file, or from `kinetic.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join("kinetic.toml")
        } else {
            path.to_path_buf()
        };

        let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
            path: config_path.clone(),
            source,
        })?;

        let file = Self::from_toml_str(&content)?;
        tracing::debug!("loaded list config from {}", config_path.display());
        Ok(file)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
