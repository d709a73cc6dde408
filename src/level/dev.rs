//! Level domain: in-code test level for local runs.

use bevy::prelude::*;

use crate::movement::PortalExit;
use crate::physics::{Aabb, BoxCollider, Collider, ColliderTag, Ramp, ShapeError};
use crate::weapons::WeaponKind;

use super::{ItemSpawn, JumpPad, LevelColliders, LevelFeatures, LevelGeometry, Portal};

/// Width of the vertical slices ramps are drawn with.
const RAMP_SLICE: f32 = 8.0;

fn tag_color(tag: ColliderTag) -> Color {
    match tag {
        ColliderTag::Static => Color::srgb(0.4, 0.5, 0.4),
        ColliderTag::Wall => Color::srgba(0.3, 0.3, 0.6, 0.6),
        ColliderTag::Ramp => Color::srgb(0.5, 0.4, 0.3),
        ColliderTag::Death => Color::srgb(0.8, 0.2, 0.2),
        ColliderTag::Decoration => Color::srgb(0.25, 0.25, 0.3),
    }
}

fn spawn_rect(commands: &mut Commands, shape: &Aabb, color: Color, z: f32) {
    let center = shape.center();
    commands.spawn((
        LevelGeometry,
        Sprite {
            color,
            custom_size: Some(shape.size()),
            ..default()
        },
        Transform::from_xyz(center.x, -center.y, z),
    ));
}

fn spawn_ramp_slices(commands: &mut Commands, ramp: &Ramp) {
    let bounds = ramp.bounds();
    let edges = ramp.top_edges();
    let mut x = bounds.left();
    while x < bounds.right() {
        let mid = x + RAMP_SLICE / 2.0;
        let top = edges
            .iter()
            .filter_map(|edge| edge.y_at(mid))
            .fold(bounds.bottom(), f32::min);
        let height = bounds.bottom() - top;
        if height > 0.0 {
            let slice = Aabb {
                pos: Vec2::new(x, top),
                w: RAMP_SLICE,
                h: height,
            };
            spawn_rect(commands, &slice, tag_color(ColliderTag::Ramp), 0.0);
        }
        x += RAMP_SLICE;
    }
}

fn test_level_colliders() -> Result<Vec<Collider>, ShapeError> {
    use ColliderTag::{Death, Static, Wall};

    Ok(vec![
        Collider::Box(BoxCollider::new(-40.0, -400.0, 40.0, 860.0, Static)?),
        Collider::Box(BoxCollider::new(0.0, 400.0, 2000.0, 60.0, Static)?),
        Collider::Box(BoxCollider::new(2200.0, 400.0, 1000.0, 60.0, Static)?),
        Collider::Box(BoxCollider::new(600.0, 300.0, 200.0, 20.0, Static)?),
        // Climbable pillar: a solid core with a wall-jump zone on its left face.
        Collider::Box(BoxCollider::new(940.0, 100.0, 40.0, 300.0, Static)?),
        Collider::Box(BoxCollider::new(900.0, 100.0, 40.0, 300.0, Wall)?),
        Collider::Ramp(Ramp::new(
            Vec2::new(1100.0, 400.0),
            Vec2::new(1300.0, 400.0),
            Vec2::new(1300.0, 285.0),
        )?),
        Collider::Box(BoxCollider::new(1300.0, 285.0, 80.0, 115.0, Static)?),
        Collider::Ramp(Ramp::new(
            Vec2::new(1500.0, 400.0),
            Vec2::new(1800.0, 400.0),
            Vec2::new(1650.0, 320.0),
        )?),
        Collider::Box(BoxCollider::new(1990.0, 470.0, 220.0, 30.0, Death)?),
        Collider::Box(BoxCollider::new(3200.0, -400.0, 40.0, 860.0, Static)?),
    ])
}

fn test_level_features() -> Result<LevelFeatures, ShapeError> {
    let mut features = LevelFeatures::default();
    features.items.spawns = vec![
        ItemSpawn::new(
            Aabb::new(Vec2::new(400.0, 360.0), 24.0, 24.0)?,
            WeaponKind::Rocket,
            5,
            false,
        ),
        ItemSpawn::new(
            Aabb::new(Vec2::new(840.0, 360.0), 24.0, 24.0)?,
            WeaponKind::Plasma,
            50,
            true,
        ),
    ];
    features.jump_pads.pads = vec![JumpPad::new(
        Aabb::new(Vec2::new(2400.0, 379.0), 64.0, 21.0)?,
        Vec2::new(0.1, -0.7),
    )];
    features.portals.portals = vec![Portal {
        entry: Aabb::new(Vec2::new(3100.0, 336.0), 64.0, 64.0)?,
        exit: PortalExit {
            position: Vec2::new(100.0, 300.0),
            direction: 1.0,
        },
    }];
    features.race_lines.start = Some(Aabb::new(Vec2::new(200.0, 200.0), 8.0, 200.0)?);
    features.race_lines.finish = Some(Aabb::new(Vec2::new(3000.0, 200.0), 8.0, 200.0)?);
    Ok(features)
}

fn test_level() -> Result<(Vec<Collider>, LevelFeatures), ShapeError> {
    Ok((test_level_colliders()?, test_level_features()?))
}

pub(crate) fn spawn_test_level(
    mut commands: Commands,
    mut colliders: ResMut<LevelColliders>,
    mut features: ResMut<LevelFeatures>,
) {
    let (level_colliders, level_features) = match test_level() {
        Ok(level) => level,
        Err(e) => {
            warn!("Test level has bad geometry: {}", e);
            return;
        }
    };

    for collider in &level_colliders {
        match collider {
            Collider::Box(b) => spawn_rect(&mut commands, &b.shape, tag_color(b.tag), 0.0),
            Collider::Ramp(r) => spawn_ramp_slices(&mut commands, r),
        }
    }
    for item in &level_features.items.spawns {
        spawn_rect(&mut commands, &item.bounds, Color::srgb(0.9, 0.6, 0.1), 1.0);
    }
    for pad in &level_features.jump_pads.pads {
        spawn_rect(&mut commands, &pad.bounds, Color::srgb(0.2, 0.8, 0.8), 1.0);
    }
    for portal in &level_features.portals.portals {
        spawn_rect(&mut commands, &portal.entry, Color::srgb(0.6, 0.2, 0.8), 1.0);
    }
    let lines = &level_features.race_lines;
    for line in lines.start.iter().chain(lines.finish.iter()) {
        spawn_rect(&mut commands, line, Color::srgba(1.0, 1.0, 1.0, 0.5), 1.0);
    }

    info!(
        "Spawned test level: {} colliders, {} items, {} pads, {} portals",
        level_colliders.len(),
        level_features.items.spawns.len(),
        level_features.jump_pads.pads.len(),
        level_features.portals.portals.len()
    );

    colliders.0 = level_colliders.into_iter().collect();
    *features = level_features;
}
