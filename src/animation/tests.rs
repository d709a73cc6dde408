use super::*;
use crate::movement::AnimationPort;
use crate::weapons::WeaponKind;

// ----------------------------------------------------------------------------
// State mapping
// ----------------------------------------------------------------------------

#[test]
fn test_every_movement_state_has_a_clip() {
    for name in [
        "Idle", "Move", "Decel", "Jump", "Fall", "Walljump", "Crouch", "Slide", "Plasma", "Launch",
        "Dead",
    ] {
        assert!(
            RunnerAnimation::from_state_name(name).is_some(),
            "no clip for {}",
            name
        );
    }
    assert_eq!(RunnerAnimation::from_state_name("Swim"), None);
}

#[test]
fn test_state_entered_switches_clip() {
    let mut controller = AnimationController::for_runner();
    controller.on_state_entered("Move");
    assert_eq!(controller.state, RunnerAnimation::Run);
    assert_eq!(controller.previous_state, RunnerAnimation::Idle);
    assert_eq!(controller.current_sprite_key(), "runner_run_1");
}

#[test]
fn test_weapon_change_is_recorded() {
    let mut controller = AnimationController::for_runner();
    controller.on_weapon_changed(Some(WeaponKind::Plasma));
    assert_eq!(controller.weapon, Some(WeaponKind::Plasma));
}

// ----------------------------------------------------------------------------
// Playback
// ----------------------------------------------------------------------------

#[test]
fn test_looping_clip_wraps_without_finishing() {
    let mut controller = AnimationController::for_runner();
    let clip_length = controller.frame_duration * controller.total_frames as f32;

    assert!(!controller.advance(clip_length + 0.01));
    assert!(!controller.finished);
    assert!(controller.current_frame < controller.total_frames);
}

#[test]
fn test_one_shot_clip_finishes_once() {
    let mut controller = AnimationController::for_runner();
    controller.set_state(RunnerAnimation::Walljump);
    let frame = controller.frame_duration;

    let mut completions = 0;
    for _ in 0..20 {
        if controller.advance(frame) {
            completions += 1;
        }
    }
    assert_eq!(completions, 1);
    assert!(controller.finished);
    assert_eq!(controller.current_frame, controller.total_frames - 1);
}

#[test]
fn test_reentering_one_shot_restarts_it() {
    let mut controller = AnimationController::for_runner();
    controller.set_state(RunnerAnimation::Walljump);
    controller.advance(10.0);
    assert!(controller.finished);

    controller.on_state_entered("Walljump");
    assert!(!controller.finished);
    assert_eq!(controller.current_frame, 0);
}

#[test]
fn test_reentering_looping_clip_keeps_frame() {
    let mut controller = AnimationController::for_runner();
    controller.set_state(RunnerAnimation::Run);
    controller.advance(controller.frame_duration * 1.5);
    let frame = controller.current_frame;
    assert!(frame > 0);

    controller.set_state(RunnerAnimation::Run);
    assert_eq!(controller.current_frame, frame);
}
