//! Movement domain: port adapters that collect body effects as messages.
//!
//! The relays buffer what the body hands them; the step system writes the
//! buffered messages once the body update has returned.

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::movement::{
    AudioPort, DecalKind, DecalPort, DecalRequest, DecalRequested, ProjectilePort,
    ProjectileRequested, ShotFired, SoundCue, SoundRequested,
};

fn either(rng: &mut ChaCha8Rng, first: &'static str, second: &'static str) -> &'static str {
    if rng.random_bool(0.5) { first } else { second }
}

/// Asset name for a sound cue. Jumps pick one of two takes.
pub(crate) fn sound_asset(cue: SoundCue, rng: &mut ChaCha8Rng) -> &'static str {
    match cue {
        SoundCue::Jump => either(rng, "jump1", "jump2"),
        SoundCue::WallJump => either(rng, "walljump1", "walljump2"),
        SoundCue::JumpPad => "jumppad",
        SoundCue::Death => "death",
        SoundCue::Pickup => "weapon_pickup",
        SoundCue::WeaponEmpty => "noammo",
        SoundCue::WeaponSwitch => "weapon_switch",
        SoundCue::RocketLaunch => "rocket_launch",
        SoundCue::Plasma => "plasma",
        SoundCue::Teleport => "teleport",
    }
}

pub(crate) fn decal_asset(kind: DecalKind, rng: &mut ChaCha8Rng) -> &'static str {
    match kind {
        DecalKind::JumpDust => either(rng, "dash1", "dash2"),
        DecalKind::PlasmaScorch => "plasma_scorch",
    }
}

pub(crate) struct SoundRelay<'a> {
    rng: &'a mut ChaCha8Rng,
    pub requested: Vec<SoundRequested>,
}

impl<'a> SoundRelay<'a> {
    pub fn new(rng: &'a mut ChaCha8Rng) -> Self {
        Self {
            rng,
            requested: Vec::new(),
        }
    }
}

impl AudioPort for SoundRelay<'_> {
    fn play(&mut self, cue: SoundCue) {
        let asset = sound_asset(cue, self.rng);
        self.requested.push(SoundRequested { cue, asset });
    }
}

pub(crate) struct DecalRelay<'a> {
    rng: &'a mut ChaCha8Rng,
    pub requested: Vec<DecalRequested>,
}

impl<'a> DecalRelay<'a> {
    pub fn new(rng: &'a mut ChaCha8Rng) -> Self {
        Self {
            rng,
            requested: Vec::new(),
        }
    }
}

impl DecalPort for DecalRelay<'_> {
    fn spawn(&mut self, decal: DecalRequest) {
        let asset = decal_asset(decal.kind, self.rng);
        self.requested.push(DecalRequested { decal, asset });
    }
}

pub(crate) struct ShotRelay {
    shooter: Entity,
    pub requested: Vec<ProjectileRequested>,
}

impl ShotRelay {
    pub fn new(shooter: Entity) -> Self {
        Self {
            shooter,
            requested: Vec::new(),
        }
    }
}

impl ProjectilePort for ShotRelay {
    fn fire(&mut self, shot: ShotFired) {
        self.requested.push(ProjectileRequested {
            shooter: self.shooter,
            shot,
        });
    }
}
