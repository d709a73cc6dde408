//! Movement domain: the body's mutable physical data.
//!
//! State hooks receive a `&mut Locomotion` and may queue follow-up events on it.
//! The owning [`super::CharacterBody`] raises those through the state machine.

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::physics::{Aabb, Collider, within_near_range};

use super::jump::jump_timing;
use super::ports::{BodyEffect, DecalKind, DecalRequest, PortalExit, SoundCue};
use super::resources::MovementTuning;
use super::state::MovementEvent;

/// Vertical speed given on portal exit so the body is not read as grounded.
const PORTAL_EXIT_LIFT: f32 = -0.0001;

/// Held inputs, as last reported by the input layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    pub wall_jump: bool,
    pub shoot: bool,
    pub switch_weapon: bool,
}

#[derive(Debug, Clone)]
pub struct Locomotion {
    pub(crate) position: Vec2,
    pub(crate) size: Vec2,
    pub(crate) velocity: Vec2,
    /// Facing, ±1.
    pub(crate) direction: f32,
    /// Forward acceleration in px/ms², set by the active state.
    pub(crate) acceleration: f32,

    pub(crate) distance_to_ground: f32,
    /// Slope of the ramp underfoot in world terms (positive rises to the right).
    pub(crate) last_ramp_angle: f32,
    pub(crate) ground_touch_position: Option<Vec2>,
    pub(crate) jump_action_distance: Option<f32>,
    pub(crate) jump_timing: Option<f32>,
    pub(crate) last_boost: f32,

    pub(crate) crouching: bool,
    pub(crate) can_uncrouch: bool,

    pub(crate) intents: Intents,
    pub(crate) jump_pressed_at: Option<f64>,
    pub(crate) last_walljump_at: Option<f64>,
    pub(crate) last_weapon_switch_at: Option<f64>,

    pub(crate) input_frozen: bool,
    pub(crate) movement_frozen: bool,
    pub(crate) respawn_requested: bool,

    pub(crate) tuning: MovementTuning,
    pub(crate) pending: VecDeque<MovementEvent>,
    pub(crate) effects: Vec<BodyEffect>,
}

impl Locomotion {
    pub fn new(position: Vec2, direction: f32, tuning: MovementTuning) -> Self {
        Self {
            position,
            size: tuning.body_size(),
            velocity: Vec2::ZERO,
            direction: if direction < 0.0 { -1.0 } else { 1.0 },
            acceleration: 0.0,
            distance_to_ground: f32::INFINITY,
            last_ramp_angle: 0.0,
            ground_touch_position: None,
            jump_action_distance: None,
            jump_timing: None,
            last_boost: 0.0,
            crouching: false,
            can_uncrouch: true,
            intents: Intents::default(),
            jump_pressed_at: None,
            last_walljump_at: None,
            last_weapon_switch_at: None,
            input_frozen: false,
            movement_frozen: false,
            respawn_requested: false,
            tuning,
            pending: VecDeque::new(),
            effects: Vec::new(),
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            pos: self.position,
            w: self.size.x,
            h: self.size.y,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }

    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.position.x + self.size.x / 2.0, self.position.y + self.size.y)
    }

    /// Speed along the facing direction.
    pub fn forward_speed(&self) -> f32 {
        self.velocity.x * self.direction
    }

    pub fn set_forward_speed(&mut self, speed: f32) {
        self.velocity.x = speed * self.direction;
    }

    pub fn forward_held(&self) -> bool {
        if self.direction > 0.0 {
            self.intents.right
        } else {
            self.intents.left
        }
    }

    pub fn back_held(&self) -> bool {
        if self.direction > 0.0 {
            self.intents.left
        } else {
            self.intents.right
        }
    }

    pub fn any_direction_held(&self) -> bool {
        self.intents.left || self.intents.right || self.intents.up || self.intents.down
    }

    /// Ramp slope relative to the facing: positive is uphill.
    pub fn travel_slope(&self) -> f32 {
        self.last_ramp_angle * self.direction
    }

    pub fn raise(&mut self, event: MovementEvent) {
        self.pending.push_back(event);
    }

    pub fn emit(&mut self, effect: BodyEffect) {
        self.effects.push(effect);
    }

    /// Integrate acceleration and gravity, then cap forward speed.
    pub fn accelerate(&mut self, dt: f32) {
        self.velocity.x += self.acceleration * self.direction * dt;
        self.velocity.y += self.tuning.gravity * dt;
        let speed = self.forward_speed().clamp(0.0, self.tuning.max_velocity);
        self.set_forward_speed(speed);
    }

    /// Shrink to crouch height, keeping the feet in place.
    pub fn crouch_down(&mut self) {
        if self.crouching {
            return;
        }
        let crouched = self.tuning.crouch_height();
        self.position.y += self.size.y - crouched;
        self.size.y = crouched;
        self.crouching = true;
    }

    pub fn stand_up(&mut self) {
        if !self.crouching {
            return;
        }
        let standing = self.tuning.body_height;
        self.position.y -= standing - self.size.y;
        self.size.y = standing;
        self.crouching = false;
    }

    /// Is there room to stand at full height?
    pub fn standing_room(&self, nearby: &[&Collider]) -> bool {
        let standing = self.tuning.body_height;
        let head_room = Aabb {
            pos: Vec2::new(self.position.x, self.position.y - (standing - self.size.y)),
            w: self.size.x,
            h: standing,
        };
        !nearby
            .iter()
            .filter_map(|c| c.solid_box())
            .any(|shape| within_near_range(&head_room, shape) && head_room.overlaps(shape))
    }

    /// Record the press distance for the timing bonus, once per press.
    pub fn record_jump_press(&mut self) {
        if self.jump_action_distance.is_some() || self.last_ramp_angle != 0.0 {
            return;
        }
        let distance = self.distance_to_ground;
        if distance > 0.0 && distance.is_finite() {
            self.jump_action_distance = Some(distance);
        }
    }

    /// Vertical speed gained from leaving an uphill ramp at the current speed.
    pub fn ramp_launch_speed(&self) -> f32 {
        let slope = self.travel_slope();
        if slope <= 0.0 {
            return 0.0;
        }
        -self.forward_speed().abs() * slope.tan() * self.tuning.ramp.launch_factor
    }

    /// Apply a jump: timing bonus on the horizontal axis, take-off speed on the vertical.
    pub fn take_off(&mut self) {
        let timing = jump_timing(
            self.jump_action_distance,
            self.ground_touch_position,
            self.position,
        );
        self.jump_timing = timing;

        if !(self.intents.down || self.intents.up) {
            if let Some(timing) = timing {
                let curve = &self.tuning.jump_boost;
                let mut boost = curve.boost(timing);
                if !self.forward_held() {
                    boost *= curve.standing_multiplier;
                }
                if self.forward_speed() < curve.kick_threshold {
                    let kick = curve.kick_speed;
                    self.set_forward_speed(kick);
                }
                self.velocity.x += boost * self.direction;
                self.last_boost = boost;
                debug!("Jump timing {:.2}px, boost {:.4}", timing, boost);
            }
        }

        self.jump_action_distance = None;
        self.ground_touch_position = None;
        self.acceleration = 0.0;

        let slope = self.travel_slope();
        if slope > 0.0 {
            let inherited = self.ramp_launch_speed() * self.tuning.ramp.jump_inherit_fraction;
            self.velocity.y = self.tuning.jump_velocity + inherited;
        } else {
            if slope < 0.0 {
                self.position.y -= self.tuning.ramp.downhill_jump_lift;
            }
            self.velocity.y = self.tuning.jump_velocity;
        }
        self.last_ramp_angle = 0.0;

        self.emit(BodyEffect::Sound(SoundCue::Jump));
        let feet = self.feet();
        self.emit(BodyEffect::Decal(DecalRequest {
            kind: DecalKind::JumpDust,
            position: feet,
        }));
    }

    pub fn take_portal(&mut self, exit: PortalExit) {
        let facing = if exit.direction < 0.0 { -1.0 } else { 1.0 };
        if facing != self.direction {
            self.direction = facing;
            self.velocity.x = -self.velocity.x;
        }
        let (ox, oy) = self.tuning.portal_exit_offset;
        // The offset is in world space whichever way the exit faces.
        self.position = exit.position + Vec2::new(ox, oy);
        self.velocity.y = PORTAL_EXIT_LIFT;
        let speed = self.forward_speed().max(self.tuning.portal_min_speed);
        self.set_forward_speed(speed);
        self.emit(BodyEffect::Sound(SoundCue::Teleport));
    }
}
