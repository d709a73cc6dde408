//! Movement domain: the runner's body, action states and per-tick pipeline.
//!
//! The body itself is plain Rust driven by [`CharacterBody::update`]; the
//! systems here feed it keyboard input and Bevy time and relay its side effects
//! as messages.

mod body;
mod friction;
mod jump;
mod locomotion;
mod ports;
mod race;
mod resources;
mod state;
pub(crate) mod systems;

#[cfg(feature = "dev-tools")]
mod dev;

use std::sync::Arc;

use bevy::ecs::message::Message;
use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::{GameplayPaused, gameplay_active};

pub use body::{BodySnapshot, CharacterBody, TickReport};
pub use friction::{SurfaceFriction, friction, slope_gain, surface_friction};
pub use jump::{compute_jump_boost, jump_timing};
pub use locomotion::Intents;
pub use ports::{
    AnimationPort, AudioPort, BodyEffect, Clock, DecalKind, DecalPort, DecalRequest, ItemPickup,
    ItemPort, JumpPadPort, ManualClock, PortalExit, PortalPort, Ports, ProjectilePort, RaceLine,
    RaceLinePort, ShotFired, SoundCue, SystemClock,
};
pub use race::RaceTimer;
pub use resources::{FrictionTuning, JumpBoostCurve, MovementInput, MovementTuning, RampTuning};
pub use state::{ActionState, MovementEvent, MovementStateMachine, Transition};

use systems::{
    advance_clock, apply_runner_input, read_input, step_runners, sync_pause,
    sync_runner_transforms,
};

/// Marker for the player-controlled runner.
#[derive(Component, Debug)]
pub struct Runner;

/// Simulation clock shared by every body, advanced by Bevy time.
#[derive(Resource, Clone)]
pub struct SimulationClock(pub Arc<ManualClock>);

impl Default for SimulationClock {
    fn default() -> Self {
        Self(Arc::new(ManualClock::new(0.0)))
    }
}

impl SimulationClock {
    pub fn handle(&self) -> Arc<dyn Clock> {
        self.0.clone()
    }
}

/// RNGs used to pick between sound and decal variants.
#[derive(Resource, Debug)]
pub struct EffectVariants {
    pub sounds: ChaCha8Rng,
    pub decals: ChaCha8Rng,
}

impl Default for EffectVariants {
    fn default() -> Self {
        let seed: u64 = rand::rng().random();
        Self {
            sounds: ChaCha8Rng::seed_from_u64(seed),
            decals: ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
        }
    }
}

/// Where new runners appear.
#[derive(Resource, Debug, Clone, Copy)]
pub struct RunnerSpawn {
    pub position: Vec2,
    pub direction: f32,
}

impl Default for RunnerSpawn {
    fn default() -> Self {
        Self {
            position: Vec2::new(64.0, 200.0),
            direction: 1.0,
        }
    }
}

/// Message asking the audio layer to play an asset.
#[derive(Debug, Clone)]
pub struct SoundRequested {
    pub cue: SoundCue,
    pub asset: &'static str,
}

impl Message for SoundRequested {}

#[derive(Debug, Clone)]
pub struct DecalRequested {
    pub decal: DecalRequest,
    pub asset: &'static str,
}

impl Message for DecalRequested {}

#[derive(Debug, Clone)]
pub struct ProjectileRequested {
    pub shooter: Entity,
    pub shot: ShotFired,
}

impl Message for ProjectileRequested {}

/// Message fired when a runner died and was put back at its spawn point.
#[derive(Debug, Clone)]
pub struct RunnerRespawned {
    pub entity: Entity,
}

impl Message for RunnerRespawned {}

/// Message fired when a runner touched the finish line of a timed run.
#[derive(Debug, Clone)]
pub struct RaceTimeRecorded {
    pub entity: Entity,
    pub time_ms: f64,
}

impl Message for RaceTimeRecorded {}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .init_resource::<SimulationClock>()
            .init_resource::<EffectVariants>()
            .init_resource::<RunnerSpawn>()
            .init_resource::<GameplayPaused>()
            .add_message::<SoundRequested>()
            .add_message::<DecalRequested>()
            .add_message::<ProjectileRequested>()
            .add_message::<RunnerRespawned>()
            .add_message::<RaceTimeRecorded>()
            .add_systems(Startup, systems::spawn_runner)
            .add_systems(
                Update,
                (
                    read_input.run_if(gameplay_active),
                    apply_runner_input.run_if(gameplay_active),
                    sync_pause,
                    advance_clock.run_if(gameplay_active),
                    step_runners.run_if(gameplay_active),
                    sync_runner_transforms,
                )
                    .chain(),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(Update, dev::log_runner_snapshot);
    }
}
