//! Weapons domain: the runner's arsenal and the plasma-climb impulse.
//!
//! Projectiles themselves live outside the movement core. This module only
//! tracks ammo and cooldowns and works out how a shot moves the body.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum WeaponKind {
    Rocket,
    Plasma,
}

impl WeaponKind {
    pub fn other(&self) -> WeaponKind {
        match self {
            WeaponKind::Rocket => WeaponKind::Plasma,
            WeaponKind::Plasma => WeaponKind::Rocket,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WeaponTuning {
    pub rocket_cooldown_ms: f32,
    pub plasma_cooldown_ms: f32,
    pub switch_cooldown_ms: f64,
    /// Upward push while climbing with down held alongside left or right.
    pub climb_diagonal_lift: f32,
    /// Upward push while climbing straight with down held.
    pub climb_straight_lift: f32,
    /// Extra push while vertical speed is above `climb_assist_below`.
    pub climb_assist: f32,
    pub climb_assist_below: f32,
    pub climb_up_drag: f32,
    pub climb_side_push: f32,
    /// Distance falloff for explosion knockback: `1 / (1 + k * d^exp)`.
    pub blast_falloff: f32,
    pub blast_exponent: f32,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            rocket_cooldown_ms: 1337.0,
            plasma_cooldown_ms: 92.0,
            switch_cooldown_ms: 666.0,
            climb_diagonal_lift: 0.07,
            climb_straight_lift: 0.103,
            climb_assist: 0.015,
            climb_assist_below: -0.15,
            climb_up_drag: 0.02,
            climb_side_push: 0.04,
            blast_falloff: 0.01,
            blast_exponent: 1.33,
        }
    }
}

impl WeaponTuning {
    pub fn cooldown(&self, kind: WeaponKind) -> f32 {
        match kind {
            WeaponKind::Rocket => self.rocket_cooldown_ms,
            WeaponKind::Plasma => self.plasma_cooldown_ms,
        }
    }

    /// Velocity change from firing plasma into a wall while holding directions.
    ///
    /// Pointing down pushes the body up the wall; pointing sideways pushes it
    /// away from the side aimed at.
    pub fn climb_impulse(&self, left: bool, right: bool, up: bool, down: bool, vy: f32) -> Vec2 {
        let mut dv = Vec2::ZERO;
        if down {
            dv.y -= if left || right {
                self.climb_diagonal_lift
            } else {
                self.climb_straight_lift
            };
            if vy > self.climb_assist_below {
                dv.y -= self.climb_assist;
            }
        }
        if up {
            dv.y += self.climb_up_drag;
        }
        if left {
            dv.x += self.climb_side_push;
        }
        if right {
            dv.x -= self.climb_side_push;
        }
        dv
    }

    /// Knockback speed from an explosion `distance` px away.
    pub fn blast_speed(&self, distance: f32) -> f32 {
        1.0 / (1.0 + self.blast_falloff * distance.max(0.0).powf(self.blast_exponent))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    Fired,
    /// Trigger pulled with no ammo left.
    Empty,
    CoolingDown,
    NotOwned,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct WeaponSlot {
    owned: bool,
    ammo: u32,
    /// Milliseconds until the weapon can fire again.
    cooldown: f32,
}

/// Weapons carried by the runner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arsenal {
    rocket: WeaponSlot,
    plasma: WeaponSlot,
    active: Option<WeaponKind>,
}

impl Arsenal {
    fn slot(&self, kind: WeaponKind) -> &WeaponSlot {
        match kind {
            WeaponKind::Rocket => &self.rocket,
            WeaponKind::Plasma => &self.plasma,
        }
    }

    fn slot_mut(&mut self, kind: WeaponKind) -> &mut WeaponSlot {
        match kind {
            WeaponKind::Rocket => &mut self.rocket,
            WeaponKind::Plasma => &mut self.plasma,
        }
    }

    pub fn active(&self) -> Option<WeaponKind> {
        self.active
    }

    pub fn owns(&self, kind: WeaponKind) -> bool {
        self.slot(kind).owned
    }

    pub fn ammo(&self, kind: WeaponKind) -> u32 {
        self.slot(kind).ammo
    }

    /// Take a weapon (or more ammo for it) and make it active.
    pub fn pick_up(&mut self, kind: WeaponKind, ammo: u32) {
        let slot = self.slot_mut(kind);
        slot.owned = true;
        slot.ammo = slot.ammo.saturating_add(ammo);
        self.active = Some(kind);
    }

    /// Switch to the other weapon if it is owned. Returns the new active weapon.
    pub fn switch(&mut self) -> Option<WeaponKind> {
        let other = self.active?.other();
        if self.owns(other) {
            self.active = Some(other);
            Some(other)
        } else {
            None
        }
    }

    pub fn tick(&mut self, dt: f32) {
        for slot in [&mut self.rocket, &mut self.plasma] {
            slot.cooldown = (slot.cooldown - dt).max(0.0);
        }
    }

    /// Pull the trigger on `kind`. Empty pulls still start the cooldown.
    pub fn try_fire(&mut self, kind: WeaponKind, tuning: &WeaponTuning) -> FireOutcome {
        let slot = self.slot_mut(kind);
        if !slot.owned {
            return FireOutcome::NotOwned;
        }
        if slot.cooldown > 0.0 {
            return FireOutcome::CoolingDown;
        }
        slot.cooldown = tuning.cooldown(kind);
        if slot.ammo == 0 {
            return FireOutcome::Empty;
        }
        slot.ammo -= 1;
        FireOutcome::Fired
    }
}
