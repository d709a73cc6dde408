use bevy::prelude::*;

use super::*;
use crate::movement::{ItemPort, JumpPadPort, PortalExit, PortalPort, RaceLine, RaceLinePort};
use crate::physics::{BoxCollider, ColliderTag};
use crate::weapons::WeaponKind;

fn body_at(x: f32, y: f32) -> Aabb {
    Aabb {
        pos: Vec2::new(x, y),
        w: 32.0,
        h: 42.0,
    }
}

fn rect(x: f32, y: f32, w: f32, h: f32) -> Aabb {
    Aabb {
        pos: Vec2::new(x, y),
        w,
        h,
    }
}

// ----------------------------------------------------------------------------
// Items
// ----------------------------------------------------------------------------

#[test]
fn test_item_picked_up_when_center_inside() {
    let mut items = ItemSpawns {
        spawns: vec![ItemSpawn::new(
            rect(0.0, 0.0, 40.0, 40.0),
            WeaponKind::Rocket,
            5,
            false,
        )],
    };

    // Body centre at (16, 21).
    let pickup = items.pick_up(&body_at(0.0, 0.0), 0.0);
    assert_eq!(pickup.map(|p| p.weapon), Some(WeaponKind::Rocket));
    assert_eq!(pickup.map(|p| p.ammo), Some(5));
}

#[test]
fn test_item_not_picked_up_when_only_edges_overlap() {
    let mut items = ItemSpawns {
        spawns: vec![ItemSpawn::new(
            rect(40.0, 0.0, 10.0, 10.0),
            WeaponKind::Plasma,
            10,
            true,
        )],
    };
    assert!(items.pick_up(&body_at(20.0, 0.0), 0.0).is_none());
}

#[test]
fn test_item_respawns_after_delay() {
    let mut items = ItemSpawns {
        spawns: vec![ItemSpawn::new(
            rect(0.0, 0.0, 40.0, 40.0),
            WeaponKind::Plasma,
            10,
            true,
        )],
    };
    let body = body_at(0.0, 0.0);

    assert!(items.pick_up(&body, 100.0).is_some());
    assert!(items.pick_up(&body, 100.0 + ITEM_RESPAWN_MS).is_none());
    assert!(items.pick_up(&body, 101.0 + ITEM_RESPAWN_MS).is_some());
}

#[test]
fn test_one_shot_item_stays_taken_until_reset() {
    let mut features = LevelFeatures::default();
    features.items.spawns.push(ItemSpawn::new(
        rect(0.0, 0.0, 40.0, 40.0),
        WeaponKind::Rocket,
        5,
        false,
    ));
    let body = body_at(0.0, 0.0);

    assert!(features.items.pick_up(&body, 0.0).is_some());
    assert!(features.items.pick_up(&body, 1_000_000.0).is_none());

    features.reset();
    assert!(features.items.pick_up(&body, 1_000_000.0).is_some());
}

// ----------------------------------------------------------------------------
// Jump pads
// ----------------------------------------------------------------------------

#[test]
fn test_jump_pad_bounces_then_cools_down() {
    let launch = Vec2::new(0.1, -0.7);
    let mut pads = JumpPads {
        pads: vec![JumpPad::new(rect(0.0, 40.0, 64.0, 21.0), launch)],
    };
    // Standing on the ground the pad sits on: feet at y = 61, centre at y = 40.
    let body = body_at(10.0, 19.0);

    assert_eq!(pads.bounce(&body, 0.0), Some(launch));
    assert_eq!(pads.bounce(&body, JUMP_PAD_COOLDOWN_MS), None);
    assert_eq!(pads.bounce(&body, JUMP_PAD_COOLDOWN_MS + 1.0), Some(launch));
}

#[test]
fn test_jump_pad_ignores_distant_body() {
    let mut pads = JumpPads {
        pads: vec![JumpPad::new(rect(0.0, 40.0, 64.0, 21.0), Vec2::new(0.0, -0.7))],
    };
    assert_eq!(pads.bounce(&body_at(300.0, 19.0), 0.0), None);
}

#[test]
fn test_reset_rearms_pads() {
    let mut features = LevelFeatures::default();
    features
        .jump_pads
        .pads
        .push(JumpPad::new(rect(0.0, 40.0, 64.0, 21.0), Vec2::new(0.0, -0.7)));
    let body = body_at(10.0, 19.0);

    assert!(features.jump_pads.bounce(&body, 0.0).is_some());
    assert!(features.jump_pads.bounce(&body, 10.0).is_none());
    features.reset();
    assert!(features.jump_pads.bounce(&body, 10.0).is_some());
}

// ----------------------------------------------------------------------------
// Portals
// ----------------------------------------------------------------------------

#[test]
fn test_portal_returns_exit_for_body_in_mouth() {
    let exit = PortalExit {
        position: Vec2::new(500.0, 100.0),
        direction: -1.0,
    };
    let mut portals = PortalNetwork {
        portals: vec![Portal {
            entry: rect(0.0, 0.0, 64.0, 64.0),
            exit,
        }],
    };

    assert_eq!(portals.teleport(&body_at(10.0, 10.0), 0.0), Some(exit));
    assert_eq!(portals.teleport(&body_at(200.0, 10.0), 0.0), None);
}

// ----------------------------------------------------------------------------
// Race lines
// ----------------------------------------------------------------------------

#[test]
fn test_race_lines_report_the_line_under_the_body() {
    let lines = RaceLines {
        start: Some(rect(100.0, 0.0, 8.0, 200.0)),
        finish: Some(rect(900.0, 0.0, 8.0, 200.0)),
    };

    let at_start = body_at(90.0, 100.0);
    assert!(lines.touches(RaceLine::Start, &at_start));
    assert!(!lines.touches(RaceLine::Finish, &at_start));

    let at_finish = body_at(880.0, 100.0);
    assert!(lines.touches(RaceLine::Finish, &at_finish));
    assert!(!lines.touches(RaceLine::Start, &body_at(300.0, 100.0)));
}

#[test]
fn test_missing_race_lines_never_touch() {
    let lines = RaceLines::default();
    assert!(!lines.touches(RaceLine::Start, &body_at(0.0, 0.0)));
    assert!(!lines.touches(RaceLine::Finish, &body_at(0.0, 0.0)));
}

// ----------------------------------------------------------------------------
// Colliders
// ----------------------------------------------------------------------------

#[test]
fn test_level_colliders_query_filters_by_region() {
    let ground = Collider::Box(
        BoxCollider::new(0.0, 100.0, 500.0, 20.0, ColliderTag::Static).expect("valid box"),
    );
    let far = Collider::Box(
        BoxCollider::new(2000.0, 100.0, 50.0, 20.0, ColliderTag::Static).expect("valid box"),
    );
    let colliders = LevelColliders([ground, far].into_iter().collect());

    let found = colliders.query(&rect(0.0, 0.0, 100.0, 150.0));
    assert_eq!(found.len(), 1);
    assert_eq!(*found[0], ground);
}
