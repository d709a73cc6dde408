//! Core domain: camera, pausing and other app-wide plumbing.

mod resources;
mod systems;


use bevy::prelude::*;

pub use resources::{CameraFollow, GameplayPaused, gameplay_active};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameplayPaused>()
            .init_resource::<CameraFollow>()
            .add_systems(Startup, systems::setup_camera)
            .add_systems(
                Update,
                (
                    systems::toggle_pause,
                    systems::follow_runner.run_if(gameplay_active),
                ),
            );
    }
}
