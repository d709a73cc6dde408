//! Sanity checks for tuning values that would break the simulation.

use crate::movement::MovementTuning;

/// A tuning field with an unusable value.
#[derive(Debug, Clone, PartialEq)]
pub struct TuningIssue {
    pub field: &'static str,
    pub message: &'static str,
}

impl std::fmt::Display for TuningIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

macro_rules! check {
    ($issues:expr, $cond:expr, $field:expr, $message:expr) => {
        if !$cond {
            $issues.push(TuningIssue {
                field: $field,
                message: $message,
            });
        }
    };
}

/// Returns every problem found, empty if the tuning is usable.
pub fn validate_tuning(tuning: &MovementTuning) -> Vec<TuningIssue> {
    let mut issues = Vec::new();

    check!(issues, tuning.body_width > 0.0, "body_width", "must be positive");
    check!(issues, tuning.body_height > 0.0, "body_height", "must be positive");
    check!(
        issues,
        tuning.crouch_height_ratio > 0.0 && tuning.crouch_height_ratio <= 1.0,
        "crouch_height_ratio",
        "must be in (0, 1]"
    );
    check!(issues, tuning.gravity >= 0.0, "gravity", "must not be negative");
    check!(issues, tuning.max_velocity > 0.0, "max_velocity", "must be positive");
    check!(issues, tuning.max_fall_velocity > 0.0, "max_fall_velocity", "must be positive");
    check!(issues, tuning.jump_velocity < 0.0, "jump_velocity", "must point up (negative)");
    check!(issues, tuning.max_tick_ms > 0.0, "max_tick_ms", "must be positive");
    check!(
        issues,
        tuning.jump_boost.divisor > 0.0,
        "jump_boost.divisor",
        "must be positive"
    );
    check!(
        issues,
        tuning.jump_boost.max_distance > 0.0,
        "jump_boost.max_distance",
        "must be positive"
    );
    check!(
        issues,
        tuning.jump_boost.min_boost <= tuning.jump_boost.max_boost,
        "jump_boost.min_boost",
        "must not exceed max_boost"
    );

    issues
}
