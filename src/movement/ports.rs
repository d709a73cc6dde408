//! Movement domain: clock and side-effect ports the body talks to.
//!
//! Every port is optional. The body's physics never depends on whether a
//! port is wired up or what it does with a notification.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use bevy::prelude::*;

use crate::physics::Aabb;
use crate::weapons::WeaponKind;

/// Monotonic time source in milliseconds.
pub trait Clock: Send + Sync {
    fn now(&self) -> f64;
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    bits: AtomicU64,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            bits: AtomicU64::new(start_ms.to_bits()),
        }
    }

    pub fn set(&self, ms: f64) {
        self.bits.store(ms.to_bits(), Ordering::Relaxed);
    }

    pub fn advance(&self, ms: f64) {
        self.set(self.now() + ms);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

/// Wall clock measured from construction.
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Jump,
    WallJump,
    JumpPad,
    Death,
    Pickup,
    WeaponEmpty,
    WeaponSwitch,
    RocketLaunch,
    Plasma,
    Teleport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecalKind {
    /// Dust puff left at the feet on take-off.
    JumpDust,
    /// Scorch mark on a wall being plasma-climbed.
    PlasmaScorch,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecalRequest {
    pub kind: DecalKind,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemPickup {
    pub weapon: WeaponKind,
    pub ammo: u32,
}

/// Where a portal puts the body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortalExit {
    pub position: Vec2,
    /// Facing after the teleport, ±1.
    pub direction: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotFired {
    pub weapon: WeaponKind,
    pub origin: Vec2,
    /// Unit aim vector.
    pub aim: Vec2,
}

pub trait AnimationPort {
    fn on_state_entered(&mut self, state: &'static str);
    fn on_weapon_changed(&mut self, _weapon: Option<WeaponKind>) {}
}

pub trait AudioPort {
    fn play(&mut self, cue: SoundCue);
}

pub trait DecalPort {
    fn spawn(&mut self, decal: DecalRequest);
}

pub trait ItemPort {
    fn pick_up(&mut self, body: &Aabb, now: f64) -> Option<ItemPickup>;
}

pub trait PortalPort {
    fn teleport(&mut self, body: &Aabb, now: f64) -> Option<PortalExit>;
}

pub trait JumpPadPort {
    /// Launch velocity if the body stands on a ready pad. `x` is along the facing.
    fn bounce(&mut self, body: &Aabb, now: f64) -> Option<Vec2>;
}

pub trait ProjectilePort {
    fn fire(&mut self, shot: ShotFired);
}

/// One end of the level's timed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RaceLine {
    Start,
    Finish,
}

pub trait RaceLinePort {
    fn touches(&self, line: RaceLine, body: &Aabb) -> bool;
}

/// The set of ports handed to one body update. Missing ports are no-ops.
#[derive(Default)]
pub struct Ports<'a> {
    pub animation: Option<&'a mut dyn AnimationPort>,
    pub audio: Option<&'a mut dyn AudioPort>,
    pub decals: Option<&'a mut dyn DecalPort>,
    pub items: Option<&'a mut dyn ItemPort>,
    pub portals: Option<&'a mut dyn PortalPort>,
    pub jump_pads: Option<&'a mut dyn JumpPadPort>,
    pub projectiles: Option<&'a mut dyn ProjectilePort>,
    pub race_lines: Option<&'a dyn RaceLinePort>,
}

impl Ports<'_> {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Side effect queued by the body during a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyEffect {
    StateExited(&'static str),
    StateEntered(&'static str),
    Sound(SoundCue),
    Decal(DecalRequest),
    Shot(ShotFired),
    WeaponChanged(Option<WeaponKind>),
    RaceStarted,
    /// Run time in milliseconds.
    RaceFinished(f64),
}

impl BodyEffect {
    /// Hand the effect to whichever port cares about it.
    pub(crate) fn dispatch(&self, ports: &mut Ports<'_>) {
        match *self {
            BodyEffect::StateExited(_)
            | BodyEffect::RaceStarted
            | BodyEffect::RaceFinished(_) => {}
            BodyEffect::StateEntered(name) => {
                if let Some(animation) = ports.animation.as_deref_mut() {
                    animation.on_state_entered(name);
                }
            }
            BodyEffect::Sound(cue) => {
                if let Some(audio) = ports.audio.as_deref_mut() {
                    audio.play(cue);
                }
            }
            BodyEffect::Decal(decal) => {
                if let Some(decals) = ports.decals.as_deref_mut() {
                    decals.spawn(decal);
                }
            }
            BodyEffect::Shot(shot) => {
                if let Some(projectiles) = ports.projectiles.as_deref_mut() {
                    projectiles.fire(shot);
                }
            }
            BodyEffect::WeaponChanged(weapon) => {
                if let Some(animation) = ports.animation.as_deref_mut() {
                    animation.on_weapon_changed(weapon);
                }
            }
        }
    }
}
