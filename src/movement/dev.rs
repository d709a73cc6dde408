//! Movement domain: dev-only inspection of the runner.

use bevy::prelude::*;

use crate::movement::{CharacterBody, Runner};

/// F1 dumps the runner's snapshot to the log.
pub(crate) fn log_runner_snapshot(
    keyboard: Res<ButtonInput<KeyCode>>,
    runners: Query<&CharacterBody, With<Runner>>,
) {
    if !keyboard.just_pressed(KeyCode::F1) {
        return;
    }
    for body in &runners {
        let snapshot = body.snapshot();
        info!(
            "Runner {} at ({:.1}, {:.1}) vel ({:.3}, {:.3}) ground {:.1} boost {:.4} ramp {:.1} deg weapon {:?}",
            snapshot.state,
            snapshot.position.x,
            snapshot.position.y,
            snapshot.velocity.x,
            snapshot.velocity.y,
            snapshot.distance_to_ground,
            snapshot.last_boost,
            snapshot.last_ramp_angle.to_degrees(),
            snapshot.active_weapon,
        );
    }
}
