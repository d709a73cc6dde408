//! Core domain: camera setup, pause toggling and camera follow.

use bevy::prelude::*;

use crate::core::resources::{CameraFollow, GameplayPaused};
use crate::movement::{CharacterBody, Runner};

const PAUSE_SOURCE: &str = "pause_menu";

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub(crate) fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut paused: ResMut<GameplayPaused>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        let now_paused = paused.toggle(PAUSE_SOURCE);
        info!("Gameplay {}", if now_paused { "paused" } else { "resumed" });
    }
}

pub(crate) fn follow_runner(
    time: Res<Time>,
    follow: Res<CameraFollow>,
    runners: Query<&CharacterBody, With<Runner>>,
    mut cameras: Query<&mut Transform, (With<Camera2d>, Without<Runner>)>,
) {
    let Some(body) = runners.iter().next() else {
        return;
    };
    let snapshot = body.snapshot();
    let center = snapshot.position + snapshot.size / 2.0;
    let target = follow.target(center, snapshot.direction, snapshot.velocity.x);
    let blend = follow.blend(time.delta_secs() * 1000.0);

    for mut transform in &mut cameras {
        let current = transform.translation.truncate();
        let next = current.lerp(target, blend);
        transform.translation.x = next.x;
        transform.translation.y = next.y;
    }
}
