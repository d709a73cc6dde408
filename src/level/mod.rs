//! Level domain: the static colliders and interactive features the runner moves through.

mod features;

#[cfg(feature = "dev-tools")]
mod dev;
#[cfg(test)]
mod tests;

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::RunnerRespawned;
use crate::physics::{Aabb, Collider, CollisionQuery, FlatColliderSet};

pub use features::{
    ITEM_RESPAWN_MS, ItemSpawn, ItemSpawns, JUMP_PAD_COOLDOWN_MS, JumpPad, JumpPads, Portal,
    PortalNetwork, RaceLines,
};

/// Every static collider of the loaded level.
#[derive(Resource, Debug, Clone, Default)]
pub struct LevelColliders(pub FlatColliderSet);

impl CollisionQuery for LevelColliders {
    fn query(&self, region: &Aabb) -> Vec<&Collider> {
        self.0.query(region)
    }
}

/// Interactive level features, handed to the body as ports.
#[derive(Resource, Debug, Clone, Default)]
pub struct LevelFeatures {
    pub items: ItemSpawns,
    pub portals: PortalNetwork,
    pub jump_pads: JumpPads,
    pub race_lines: RaceLines,
}

impl LevelFeatures {
    /// Put every pickup back and re-arm every pad.
    pub fn reset(&mut self) {
        self.items.reset();
        self.jump_pads.reset();
    }
}

/// Marker for sprites drawn for level geometry.
#[derive(Component, Debug)]
pub struct LevelGeometry;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelColliders>()
            .init_resource::<LevelFeatures>()
            .add_systems(Update, reset_level_on_respawn);

        #[cfg(feature = "dev-tools")]
        app.add_systems(Startup, dev::spawn_test_level);
    }
}

fn reset_level_on_respawn(
    mut respawns: MessageReader<RunnerRespawned>,
    mut features: ResMut<LevelFeatures>,
) {
    if respawns.read().count() > 0 {
        features.reset();
        info!("Level features reset after respawn");
    }
}
