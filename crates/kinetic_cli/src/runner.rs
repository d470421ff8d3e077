//! Scenario runner
//!
//! Drives a [`TiltBounceListView`] over a [`HeadlessList`] step by step and
//! stops at the first failed assertion.

use kinetic_core::OverscrollRequest;
use kinetic_list::{HeadlessList, KineticFile, TiltBounceListView};

use crate::checks::{
    evaluate_base_calls, evaluate_neutral, evaluate_overscroll_result, evaluate_rotation,
    evaluate_tilted, AssertionResult,
};
use crate::report::ScenarioReport;
use crate::scenario::{Scenario, ScenarioStep};

/// Run a loaded scenario against a fresh headless list built from `file`
pub fn run_scenario(file: &KineticFile, scenario: &Scenario) -> ScenarioReport {
    let mut host = HeadlessList::new(file.host);
    let mut list = TiltBounceListView::with_config(file.list, &host);
    let mut last_result: Option<bool> = None;

    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!("step {}: {:?}", step_index, step);

        let (assertion, result) = match step {
            ScenarioStep::Overscroll {
                delta_y,
                delta_x,
                touch,
                scroll_y,
                scroll_range_y,
                max_overscroll_y,
            } => {
                let request = OverscrollRequest {
                    delta_x: *delta_x,
                    delta_y: *delta_y,
                    scroll_y: *scroll_y,
                    scroll_range_y: *scroll_range_y,
                    max_overscroll_y: *max_overscroll_y,
                    is_touch_event: *touch,
                    ..Default::default()
                };
                last_result = Some(list.over_scroll_by(&mut host, request));
                continue;
            }
            ScenarioStep::ScrollState { state } => {
                list.on_scroll_state_changed(&mut host, *state);
                continue;
            }
            ScenarioStep::ScrollTo { first } => {
                host.scroll_to(*first);
                continue;
            }
            ScenarioStep::Wait { ms } => {
                host.advance_ms(*ms);
                continue;
            }
            ScenarioStep::AssertRotation { child, degrees } => (
                "assert_rotation",
                evaluate_rotation(&host, *child, *degrees),
            ),
            ScenarioStep::AssertNeutral => ("assert_neutral", evaluate_neutral(&host)),
            ScenarioStep::AssertTilted { children } => {
                ("assert_tilted", evaluate_tilted(&host, children))
            }
            ScenarioStep::AssertOverscrollResult { consumed } => (
                "assert_overscroll_result",
                evaluate_overscroll_result(last_result, *consumed),
            ),
            ScenarioStep::AssertBaseCalls {
                count,
                max_overscroll_y,
            } => (
                "assert_base_calls",
                evaluate_base_calls(&host, *count, *max_overscroll_y),
            ),
        };

        if let AssertionResult::Failed { code, message } = result {
            tracing::info!("step {} failed ({}): {}", step_index, code, message);
            return ScenarioReport::failed(
                assertion,
                step_index,
                message,
                elapsed_ms(&host),
                host.child_rotations(),
                host.base_requests().len(),
            );
        }
    }

    ScenarioReport::passed(
        scenario.steps.len(),
        elapsed_ms(&host),
        host.child_rotations(),
        host.base_requests().len(),
    )
}

fn elapsed_ms(host: &HeadlessList) -> u64 {
    u64::try_from(host.now().as_millis()).unwrap_or(u64::MAX)
}
