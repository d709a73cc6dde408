//! Movement domain: tuning and input resources.
//!
//! All values use pixels and milliseconds: velocities are px/ms and
//! accelerations px/ms². World space is y-down, so jump velocities are negative.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::weapons::WeaponTuning;

#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementTuning {
    pub body_width: f32,
    pub body_height: f32,
    /// Crouched height as a fraction of the standing height.
    pub crouch_height_ratio: f32,

    pub gravity: f32,
    pub max_fall_velocity: f32,
    /// Ceiling on forward speed applied by the acceleration step.
    pub max_velocity: f32,
    pub run_acceleration: f32,
    pub jump_air_acceleration: f32,
    pub jump_air_speed_limit: f32,
    pub fall_air_acceleration: f32,
    pub fall_air_speed_limit: f32,
    pub brake_deceleration: f32,
    pub idle_speed_threshold: f32,
    pub crouch_stop_speed: f32,
    /// Forward speed given when forward is pressed while crouched at rest.
    pub crouch_nudge_speed: f32,

    pub jump_velocity: f32,
    pub walljump_velocity: f32,
    /// Downward speed after bumping a ceiling.
    pub bounce_velocity: f32,
    pub death_fall_speed: f32,

    pub jump_buffer_ms: f64,
    pub walljump_cooldown_ms: f64,
    /// Walljump unlocks its exit after this long even without an animation callback.
    pub walljump_exit_fallback_ms: f32,
    pub launch_duration_ms: f32,
    pub death_duration_ms: f32,
    /// Longest tick simulated in one step.
    pub max_tick_ms: f32,

    /// Forward speed floor after leaving a portal.
    pub portal_min_speed: f32,
    /// Offset from a portal exit's anchor to where the body lands.
    pub portal_exit_offset: (f32, f32),

    pub friction: FrictionTuning,
    pub jump_boost: JumpBoostCurve,
    pub ramp: RampTuning,
    pub weapons: WeaponTuning,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            body_width: 32.0,
            body_height: 42.0,
            crouch_height_ratio: 0.5,

            gravity: 0.00092,
            max_fall_velocity: 1.0,
            max_velocity: 10.0,
            run_acceleration: 0.00015,
            jump_air_acceleration: 0.0001,
            jump_air_speed_limit: 0.05,
            fall_air_acceleration: 0.0005,
            fall_air_speed_limit: 0.1,
            brake_deceleration: 0.0006,
            idle_speed_threshold: 0.02,
            crouch_stop_speed: 0.03,
            crouch_nudge_speed: 0.1,

            jump_velocity: -0.325,
            walljump_velocity: -0.22,
            bounce_velocity: 0.1,
            death_fall_speed: 0.1,

            jump_buffer_ms: 333.0,
            walljump_cooldown_ms: 1000.0,
            walljump_exit_fallback_ms: 400.0,
            launch_duration_ms: 100.0,
            death_duration_ms: 5000.0,
            max_tick_ms: 50.0,

            portal_min_speed: 0.3,
            portal_exit_offset: (10.0, -5.0),

            friction: FrictionTuning::default(),
            jump_boost: JumpBoostCurve::default(),
            ramp: RampTuning::default(),
            weapons: WeaponTuning::default(),
        }
    }
}

impl MovementTuning {
    pub fn body_size(&self) -> Vec2 {
        Vec2::new(self.body_width, self.body_height)
    }

    pub fn crouch_height(&self) -> f32 {
        self.body_height * self.crouch_height_ratio
    }
}

/// Constants feeding [`crate::movement::friction`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FrictionTuning {
    pub base_factor: f32,
    pub velocity_scaling: f32,
    pub gravity_effect: f32,
    /// Fixed per-ms factor while decelerating.
    pub decel_factor: f32,
    /// Fixed per-ms factor while crouched without sliding.
    pub crouch_factor: f32,
    pub slide_base_factor: f32,
    pub slide_uphill_gravity_effect: f32,
    pub slide_downhill_gravity_effect: f32,
}

impl Default for FrictionTuning {
    fn default() -> Self {
        Self {
            base_factor: 0.8,
            velocity_scaling: 0.0013,
            gravity_effect: 0.001,
            decel_factor: 0.998,
            crouch_factor: 0.998,
            slide_base_factor: 0.91,
            slide_uphill_gravity_effect: 0.0007,
            slide_downhill_gravity_effect: 0.005,
        }
    }
}

/// Cubic falloff turning jump timing into a horizontal speed bonus.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct JumpBoostCurve {
    pub min_boost: f32,
    pub max_boost: f32,
    /// Timing distance (px) at which the boost bottoms out.
    pub max_distance: f32,
    pub exponent: f32,
    pub divisor: f32,
    /// Multiplier when jumping without holding forward.
    pub standing_multiplier: f32,
    /// Forward speed below which a jump gets a kick.
    pub kick_threshold: f32,
    pub kick_speed: f32,
}

impl Default for JumpBoostCurve {
    fn default() -> Self {
        Self {
            min_boost: 0.01,
            max_boost: 1.0,
            max_distance: 32.0,
            exponent: 3.0,
            divisor: 5.0,
            standing_multiplier: 1.337,
            kick_threshold: 0.2,
            kick_speed: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RampTuning {
    /// Scale on `|vx| * tan(angle)` when leaving an uphill ramp.
    pub launch_factor: f32,
    /// Share of the launch speed added to a jump taken on an uphill ramp.
    pub jump_inherit_fraction: f32,
    /// Pixels the body is lifted when jumping off a downhill ramp.
    pub downhill_jump_lift: f32,
    /// Extra downward reach of the ramp contact box while already on a ramp.
    pub stick_margin: f32,
}

impl Default for RampTuning {
    fn default() -> Self {
        Self {
            launch_factor: 1.0,
            jump_inherit_fraction: 0.5,
            downhill_jump_lift: 3.0,
            stick_margin: 2.0,
        }
    }
}

/// Snapshot of the keyboard, sampled once per frame.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MovementInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    pub wall_jump: bool,
    pub shoot: bool,
    pub switch_weapon: bool,
}
