//! Movement domain: keyboard sampling for the runner.

use bevy::prelude::*;

use crate::movement::{CharacterBody, MovementInput, Runner};

pub(crate) fn read_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<MovementInput>) {
    let held = |keys: &[KeyCode]| keys.iter().any(|key| keyboard.pressed(*key));

    input.left = held(&[KeyCode::KeyA, KeyCode::ArrowLeft]);
    input.right = held(&[KeyCode::KeyD, KeyCode::ArrowRight]);
    input.up = held(&[KeyCode::KeyW, KeyCode::ArrowUp]);
    input.down = held(&[KeyCode::KeyS, KeyCode::ArrowDown]);
    input.jump = held(&[KeyCode::Space, KeyCode::KeyK]);
    input.wall_jump = held(&[KeyCode::ShiftLeft, KeyCode::KeyL]);
    input.shoot = held(&[KeyCode::ControlLeft, KeyCode::KeyJ]);
    input.switch_weapon = held(&[KeyCode::KeyQ]);
}

pub(crate) fn apply_runner_input(
    input: Res<MovementInput>,
    mut runners: Query<&mut CharacterBody, With<Runner>>,
) {
    for mut body in &mut runners {
        body.apply_input(&input);
    }
}
