//! Scenario checks against the headless list

use kinetic_list::HeadlessList;

const ROTATION_EPSILON: f32 = 1e-4;

/// Assertion result with structured failure details
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

impl AssertionResult {
    fn failed(code: &str, message: String) -> Self {
        AssertionResult::Failed {
            code: code.to_string(),
            message,
        }
    }
}

pub fn evaluate_rotation(host: &HeadlessList, child: i32, degrees: f32) -> AssertionResult {
    let Some(actual) = host.child_rotation(child) else {
        return AssertionResult::failed("missing_child", format!("child {child}: not laid out"));
    };
    if (actual - degrees).abs() <= ROTATION_EPSILON {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "rotation_mismatch",
            format!("child {child}: expected rotation {degrees}, got {actual}"),
        )
    }
}

pub fn evaluate_neutral(host: &HeadlessList) -> AssertionResult {
    let tilted = host.tilted_children();
    if tilted.is_empty() {
        AssertionResult::Passed
    } else {
        AssertionResult::failed("not_neutral", format!("children {tilted:?} still tilted"))
    }
}

pub fn evaluate_tilted(host: &HeadlessList, expected: &[i32]) -> AssertionResult {
    let mut expected = expected.to_vec();
    expected.sort_unstable();
    expected.dedup();

    let tilted = host.tilted_children();
    if tilted == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "tilt_mismatch",
            format!("expected tilted {expected:?}, got {tilted:?}"),
        )
    }
}

pub fn evaluate_overscroll_result(last: Option<bool>, consumed: bool) -> AssertionResult {
    match last {
        None => AssertionResult::failed("no_overscroll", "no overscroll delivered yet".to_string()),
        Some(actual) if actual == consumed => AssertionResult::Passed,
        Some(actual) => AssertionResult::failed(
            "result_mismatch",
            format!("expected overscroll result {consumed}, got {actual}"),
        ),
    }
}

pub fn evaluate_base_calls(
    host: &HeadlessList,
    count: usize,
    max_overscroll_y: Option<i32>,
) -> AssertionResult {
    let requests = host.base_requests();
    if requests.len() != count {
        return AssertionResult::failed(
            "base_call_count",
            format!("expected {count} base calls, got {}", requests.len()),
        );
    }
    if let Some(expected) = max_overscroll_y {
        if let Some((i, r)) = requests
            .iter()
            .enumerate()
            .find(|(_, r)| r.max_overscroll_y != expected)
        {
            return AssertionResult::failed(
                "base_allowance",
                format!(
                    "base call {i}: expected max_overscroll_y {expected}, got {}",
                    r.max_overscroll_y
                ),
            );
        }
    }
    AssertionResult::Passed
}
