//! Content domain: data-driven tuning loaded from `assets/data` at startup.

mod loader;
mod validation;

#[cfg(test)]
mod tests;

use std::path::Path;

use bevy::prelude::*;

use crate::movement::MovementTuning;

pub use loader::{
    TUNING_SCHEMA_VERSION, TuningFile, TuningLoadError, load_movement_tuning,
    parse_movement_tuning,
};
pub use validation::{TuningIssue, validate_tuning};

pub const MOVEMENT_TUNING_PATH: &str = "assets/data/movement.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .add_systems(PreStartup, load_tuning);
    }
}

/// Replace the default tuning with the file's, keeping defaults if it fails to load.
fn load_tuning(mut tuning: ResMut<MovementTuning>) {
    match load_movement_tuning(Path::new(MOVEMENT_TUNING_PATH)) {
        Ok(loaded) => {
            *tuning = loaded;
            info!("Loaded movement tuning from {}", MOVEMENT_TUNING_PATH);
        }
        Err(e) => {
            warn!("{}; using built-in movement tuning", e);
        }
    }
}
