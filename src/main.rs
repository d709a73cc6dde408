use bevy::prelude::*;

use racesow_arcade::{animation, content, core, level, movement};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Racesow Arcade".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins((
            core::CorePlugin,
            content::ContentPlugin,
            level::LevelPlugin,
            movement::MovementPlugin,
            animation::AnimationPlugin,
        ))
        .run();
}
