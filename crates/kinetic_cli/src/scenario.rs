//! Gesture scenario definition

use std::path::Path;

use anyhow::{Context, Result};
use kinetic_core::ScrollPhase;
use kinetic_list::KineticFile;
use serde::Deserialize;

/// Sequence of scripted host notifications and checks
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// List and host settings the scenario was written for
    #[serde(default)]
    pub config: Option<KineticFile>,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Load a scenario from JSON text
    pub fn from_json(input: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(input)?;
        if let Some(config) = &scenario.config {
            config.validate().context("Invalid scenario config")?;
        }
        Ok(scenario)
    }

    /// Load a scenario from file
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Deliver an overscroll notification
    Overscroll {
        delta_y: i32,
        #[serde(default)]
        delta_x: i32,
        #[serde(default = "default_true")]
        touch: bool,
        #[serde(default)]
        scroll_y: i32,
        #[serde(default)]
        scroll_range_y: i32,
        #[serde(default)]
        max_overscroll_y: i32,
    },
    /// Deliver a scroll-state change
    ScrollState { state: ScrollPhase },
    /// Move the laid-out window so `first` is the first visible position
    ScrollTo { first: i32 },
    /// Advance the UI clock
    Wait { ms: u64 },
    AssertRotation { child: i32, degrees: f32 },
    /// Every laid-out child is at neutral rotation
    AssertNeutral,
    /// Exactly these layout indices are tilted
    AssertTilted { children: Vec<i32> },
    /// Result of the most recent overscroll notification
    AssertOverscrollResult { consumed: bool },
    /// Calls forwarded to base overscroll handling so far
    AssertBaseCalls {
        count: usize,
        #[serde(default)]
        max_overscroll_y: Option<i32>,
    },
}
