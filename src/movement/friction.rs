//! Movement domain: velocity-dependent friction.
//!
//! Friction is a per-millisecond multiplier in `[0, 1]`. A tick of `dt` ms scales
//! horizontal speed by `factor.powf(dt)`, so decay does not depend on frame rate.

use super::resources::FrictionTuning;
use super::state::ActionState;

fn raw_factor(v: f32, angle: f32, base_factor: f32, velocity_scaling: f32, gravity_effect: f32) -> f32 {
    1.0 - (1.0 - base_factor) * v.abs() * velocity_scaling - angle.sin() * gravity_effect * v.abs()
}

/// Per-ms decay factor for speed `v` on a surface sloped `angle` radians
/// (positive = uphill along the direction of travel).
pub fn friction(v: f32, angle: f32, base_factor: f32, velocity_scaling: f32, gravity_effect: f32) -> f32 {
    raw_factor(v, angle, base_factor, velocity_scaling, gravity_effect).clamp(0.0, 1.0)
}

/// Per-ms gain from sliding downhill. Exactly 1 on flat ground or uphill.
pub fn slope_gain(v: f32, angle: f32, gravity_effect: f32) -> f32 {
    (1.0 - angle.sin() * gravity_effect * v.abs()).max(1.0)
}

/// Per-ms multiplier pair chosen for the current state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceFriction {
    pub decay: f32,
    pub gain: f32,
}

impl SurfaceFriction {
    pub const NONE: SurfaceFriction = SurfaceFriction {
        decay: 1.0,
        gain: 1.0,
    };

    fn decay(decay: f32) -> Self {
        Self { decay, gain: 1.0 }
    }

    /// Combined multiplier for a tick of `dt` ms.
    pub fn over(&self, dt: f32) -> f32 {
        self.decay.powf(dt) * self.gain.powf(dt)
    }
}

/// Pick the friction profile for `state` at forward speed `speed` on a slope of
/// `slope` radians relative to the direction of travel.
pub fn surface_friction(state: &ActionState, speed: f32, slope: f32, tuning: &FrictionTuning) -> SurfaceFriction {
    match state {
        ActionState::Jump
        | ActionState::Fall
        | ActionState::Walljump { .. }
        | ActionState::Launch { .. } => SurfaceFriction::NONE,
        ActionState::Decel => SurfaceFriction::decay(tuning.decel_factor),
        ActionState::Crouch => SurfaceFriction::decay(tuning.crouch_factor),
        ActionState::Slide => {
            if slope > 0.0 {
                SurfaceFriction::decay(friction(
                    speed,
                    slope,
                    tuning.base_factor,
                    tuning.velocity_scaling,
                    tuning.slide_uphill_gravity_effect,
                ))
            } else if slope < 0.0 {
                // The slope term is split out so the decay stays within [0, 1].
                SurfaceFriction {
                    decay: friction(
                        speed,
                        0.0,
                        tuning.base_factor,
                        tuning.velocity_scaling,
                        tuning.slide_downhill_gravity_effect,
                    ),
                    gain: slope_gain(speed, slope, tuning.slide_downhill_gravity_effect),
                }
            } else {
                SurfaceFriction::decay(friction(
                    speed,
                    0.0,
                    tuning.slide_base_factor,
                    tuning.velocity_scaling,
                    tuning.gravity_effect,
                ))
            }
        }
        ActionState::Idle
        | ActionState::Move
        | ActionState::Plasma
        | ActionState::Dead { .. } => SurfaceFriction::decay(friction(
            speed,
            slope,
            tuning.base_factor,
            tuning.velocity_scaling,
            tuning.gravity_effect,
        )),
    }
}
