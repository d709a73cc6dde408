//! Animation domain: runner clip playback and the animation-finished callback.

mod controller;

#[cfg(test)]
mod tests;

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::core::gameplay_active;
use crate::movement::{CharacterBody, Runner};

pub use controller::{AnimationController, AnimationFinished, RunnerAnimation};

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<AnimationFinished>().add_systems(
            Update,
            (
                update_animation_frames,
                forward_finished_animations,
                tint_runner_sprites,
            )
                .chain()
                .run_if(gameplay_active),
        );
    }
}

/// System that updates animation frames based on time.
pub fn update_animation_frames(
    time: Res<Time>,
    mut query: Query<(Entity, &mut AnimationController)>,
    mut finished_events: MessageWriter<AnimationFinished>,
) {
    for (entity, mut controller) in &mut query {
        if controller.finished {
            continue;
        }
        if controller.advance(time.delta_secs()) {
            finished_events.write(AnimationFinished {
                entity,
                state: controller.state,
            });
        }
    }
}

/// Unlock the walljump exit once its clip has played out.
fn forward_finished_animations(
    mut finished: MessageReader<AnimationFinished>,
    mut bodies: Query<&mut CharacterBody>,
) {
    for event in finished.read() {
        if event.state != RunnerAnimation::Walljump {
            continue;
        }
        if let Ok(mut body) = bodies.get_mut(event.entity) {
            body.notify_animation_finished();
        }
    }
}

fn tint_runner_sprites(
    mut runners: Query<(&AnimationController, &mut Sprite), (With<Runner>, Changed<AnimationController>)>,
) {
    for (controller, mut sprite) in &mut runners {
        sprite.color = controller.state.tint();
    }
}
