//! Level domain: weapon pickups, portals, jump pads and race lines.
//!
//! Each collection implements the matching movement port, so the body can
//! query it during functional collisions.

use bevy::prelude::*;

use crate::movement::{
    ItemPickup, ItemPort, JumpPadPort, PortalExit, PortalPort, RaceLine, RaceLinePort,
};
use crate::physics::Aabb;
use crate::weapons::WeaponKind;

/// Delay before a respawning item can be taken again.
pub const ITEM_RESPAWN_MS: f64 = 3000.0;
/// Delay between two launches from the same pad.
pub const JUMP_PAD_COOLDOWN_MS: f64 = 1000.0;

/// Horizontal and vertical slack around a portal mouth.
const PORTAL_REACH: Vec2 = Vec2::new(20.0, 10.0);
/// Pads trigger a little wider than they are drawn, and above their top face.
const PAD_REACH: Vec2 = Vec2::new(10.0, 20.0);

fn center_within(trigger: &Aabb, reach: Vec2, body: &Aabb) -> bool {
    trigger
        .expanded(reach.x, reach.y, reach.y)
        .contains_point(body.center())
}

// ---- Items ------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ItemSpawn {
    pub bounds: Aabb,
    pub weapon: WeaponKind,
    pub ammo: u32,
    /// Respawning items come back after [`ITEM_RESPAWN_MS`]; others stay taken
    /// until the level resets.
    pub respawns: bool,
    taken_at: Option<f64>,
}

impl ItemSpawn {
    pub fn new(bounds: Aabb, weapon: WeaponKind, ammo: u32, respawns: bool) -> Self {
        Self {
            bounds,
            weapon,
            ammo,
            respawns,
            taken_at: None,
        }
    }

    pub fn is_available(&self, now: f64) -> bool {
        match self.taken_at {
            None => true,
            Some(at) => self.respawns && now - at > ITEM_RESPAWN_MS,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ItemSpawns {
    pub spawns: Vec<ItemSpawn>,
}

impl ItemSpawns {
    pub fn reset(&mut self) {
        for spawn in &mut self.spawns {
            spawn.taken_at = None;
        }
    }
}

impl ItemPort for ItemSpawns {
    fn pick_up(&mut self, body: &Aabb, now: f64) -> Option<ItemPickup> {
        let spawn = self
            .spawns
            .iter_mut()
            .find(|spawn| spawn.is_available(now) && spawn.bounds.contains_point(body.center()))?;
        spawn.taken_at = Some(now);
        debug!("Picked up {:?} x{}", spawn.weapon, spawn.ammo);
        Some(ItemPickup {
            weapon: spawn.weapon,
            ammo: spawn.ammo,
        })
    }
}

// ---- Portals ----------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Portal {
    pub entry: Aabb,
    pub exit: PortalExit,
}

#[derive(Debug, Clone, Default)]
pub struct PortalNetwork {
    pub portals: Vec<Portal>,
}

impl PortalPort for PortalNetwork {
    fn teleport(&mut self, body: &Aabb, _now: f64) -> Option<PortalExit> {
        self.portals
            .iter()
            .find(|portal| center_within(&portal.entry, PORTAL_REACH, body))
            .map(|portal| portal.exit)
    }
}

// ---- Jump pads ----------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct JumpPad {
    pub bounds: Aabb,
    /// Horizontal push along the facing and the vertical take-off speed.
    pub launch: Vec2,
    used_at: Option<f64>,
}

impl JumpPad {
    pub fn new(bounds: Aabb, launch: Vec2) -> Self {
        Self {
            bounds,
            launch,
            used_at: None,
        }
    }

    pub fn is_ready(&self, now: f64) -> bool {
        self.used_at
            .is_none_or(|at| now - at > JUMP_PAD_COOLDOWN_MS)
    }
}

#[derive(Debug, Clone, Default)]
pub struct JumpPads {
    pub pads: Vec<JumpPad>,
}

impl JumpPads {
    pub fn reset(&mut self) {
        for pad in &mut self.pads {
            pad.used_at = None;
        }
    }
}

impl JumpPadPort for JumpPads {
    fn bounce(&mut self, body: &Aabb, now: f64) -> Option<Vec2> {
        let pad = self
            .pads
            .iter_mut()
            .find(|pad| pad.is_ready(now) && center_within(&pad.bounds, PAD_REACH, body))?;
        pad.used_at = Some(now);
        Some(pad.launch)
    }
}

// ---- Race lines -------------------------------------------------------------

/// Start and finish zones of the level's timed run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RaceLines {
    pub start: Option<Aabb>,
    pub finish: Option<Aabb>,
}

impl RaceLinePort for RaceLines {
    fn touches(&self, line: RaceLine, body: &Aabb) -> bool {
        let zone = match line {
            RaceLine::Start => self.start,
            RaceLine::Finish => self.finish,
        };
        zone.is_some_and(|zone| zone.overlaps(body))
    }
}
