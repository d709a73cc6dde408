//! Movement domain: jump-timing bonus.

use bevy::prelude::*;

use super::resources::JumpBoostCurve;

impl JumpBoostCurve {
    /// Horizontal speed bonus for a jump taken `timing` px away from the ideal
    /// instant. Negative timings are early presses, positive ones late.
    pub fn boost(&self, timing: f32) -> f32 {
        let closeness = (1.0 - timing.abs() / self.max_distance).max(0.0);
        let boost = self.min_boost + (self.max_boost - self.min_boost) * closeness.powf(self.exponent);
        boost.max(self.min_boost) / self.divisor
    }
}

/// Boost for `timing` with the stock curve.
pub fn compute_jump_boost(timing: f32) -> f32 {
    JumpBoostCurve::default().boost(timing)
}

/// Timing of a jump executed at `position`.
///
/// An early press records the distance to the ground while still falling and
/// yields a negative timing. Otherwise the distance travelled since landing is
/// the (late) timing. `None` means there is nothing to reward.
pub fn jump_timing(
    jump_action_distance: Option<f32>,
    ground_touch_position: Option<Vec2>,
    position: Vec2,
) -> Option<f32> {
    match jump_action_distance {
        Some(distance) if distance != 0.0 && distance.is_finite() => Some(-distance),
        _ => ground_touch_position.map(|touch| touch.distance(position)),
    }
}
