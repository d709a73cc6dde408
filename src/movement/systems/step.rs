//! Movement domain: spawning, stepping and rendering runner bodies.

use bevy::prelude::*;

use crate::animation::AnimationController;
use crate::core::GameplayPaused;
use crate::level::{LevelColliders, LevelFeatures};
use crate::movement::{
    AnimationPort, BodyEffect, CharacterBody, DecalRequested, EffectVariants, MovementTuning,
    Ports, ProjectileRequested, RaceTimeRecorded, Runner, RunnerRespawned, RunnerSpawn,
    SimulationClock, SoundRequested,
};

use super::relay::{DecalRelay, ShotRelay, SoundRelay};

const RUNNER_COLOR: Color = Color::srgb(0.9, 0.85, 0.3);
const RUNNER_Z: f32 = 10.0;

pub(crate) fn spawn_runner(
    mut commands: Commands,
    tuning: Res<MovementTuning>,
    spawn: Res<RunnerSpawn>,
    clock: Res<SimulationClock>,
) {
    let body = CharacterBody::new(spawn.position, tuning.clone(), clock.handle())
        .facing(spawn.direction);
    let bounds = body.bounds();
    let center = bounds.center();

    commands.spawn((
        Runner,
        body,
        AnimationController::for_runner(),
        Sprite {
            color: RUNNER_COLOR,
            custom_size: Some(bounds.size()),
            ..default()
        },
        Transform::from_xyz(center.x, -center.y, RUNNER_Z),
    ));

    info!("Spawned runner at {:?}", spawn.position);
}

/// Freeze bodies while anything holds the pause.
pub(crate) fn sync_pause(
    paused: Res<GameplayPaused>,
    mut bodies: Query<&mut CharacterBody, With<Runner>>,
) {
    let frozen = paused.is_paused();
    for mut body in &mut bodies {
        if body.is_frozen() != frozen {
            body.set_frozen(frozen);
        }
    }
}

pub(crate) fn advance_clock(time: Res<Time>, clock: Res<SimulationClock>) {
    clock.0.advance(time.delta_secs_f64() * 1000.0);
}

pub(crate) fn step_runners(
    time: Res<Time>,
    colliders: Res<LevelColliders>,
    mut features: ResMut<LevelFeatures>,
    mut variants: ResMut<EffectVariants>,
    mut runners: Query<
        (Entity, &mut CharacterBody, Option<&mut AnimationController>),
        With<Runner>,
    >,
    mut sounds: MessageWriter<SoundRequested>,
    mut decals: MessageWriter<DecalRequested>,
    mut projectiles: MessageWriter<ProjectileRequested>,
    mut respawned: MessageWriter<RunnerRespawned>,
    mut race_times: MessageWriter<RaceTimeRecorded>,
) {
    let dt = time.delta_secs() * 1000.0;
    let variants = &mut *variants;
    let LevelFeatures {
        items,
        portals,
        jump_pads,
        race_lines,
    } = &mut *features;

    for (entity, mut body, mut animation) in &mut runners {
        let mut sound_relay = SoundRelay::new(&mut variants.sounds);
        let mut decal_relay = DecalRelay::new(&mut variants.decals);
        let mut shot_relay = ShotRelay::new(entity);

        let report = {
            let mut ports = Ports {
                animation: animation
                    .as_deref_mut()
                    .map(|controller| controller as &mut dyn AnimationPort),
                audio: Some(&mut sound_relay),
                decals: Some(&mut decal_relay),
                items: Some(&mut *items),
                portals: Some(&mut *portals),
                jump_pads: Some(&mut *jump_pads),
                projectiles: Some(&mut shot_relay),
                race_lines: Some(&*race_lines),
            };
            body.update(dt, &*colliders, &mut ports)
        };

        for message in sound_relay.requested {
            sounds.write(message);
        }
        for message in decal_relay.requested {
            decals.write(message);
        }
        for message in shot_relay.requested {
            projectiles.write(message);
        }
        for effect in &report.effects {
            if let BodyEffect::RaceFinished(time_ms) = *effect {
                race_times.write(RaceTimeRecorded { entity, time_ms });
            }
        }
        if report.respawned {
            respawned.write(RunnerRespawned { entity });
        }
    }
}

/// Mirror body bounds onto the sprite. World space is y-down, Bevy is y-up.
pub(crate) fn sync_runner_transforms(
    mut runners: Query<(&CharacterBody, &mut Transform, &mut Sprite), With<Runner>>,
) {
    for (body, mut transform, mut sprite) in &mut runners {
        let bounds = body.bounds();
        let center = bounds.center();
        transform.translation.x = center.x;
        transform.translation.y = -center.y;
        sprite.custom_size = Some(bounds.size());
    }
}
