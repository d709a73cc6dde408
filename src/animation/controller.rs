//! Animation state and playback for the runner.
//!
//! The controller is driven by the body's state-entered notifications and
//! reports one-shot completions back through [`AnimationFinished`].

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::movement::AnimationPort;
use crate::weapons::WeaponKind;

/// Animation clips, one per runner action state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunnerAnimation {
    #[default]
    Idle,
    Run,
    Decel,
    Jump,
    Fall,
    Walljump,
    Crouch,
    Slide,
    Plasma,
    Launch,
    Death,
}

impl RunnerAnimation {
    /// Clip for a movement state name, as reported by the body.
    pub fn from_state_name(name: &str) -> Option<Self> {
        let clip = match name {
            "Idle" => RunnerAnimation::Idle,
            "Move" => RunnerAnimation::Run,
            "Decel" => RunnerAnimation::Decel,
            "Jump" => RunnerAnimation::Jump,
            "Fall" => RunnerAnimation::Fall,
            "Walljump" => RunnerAnimation::Walljump,
            "Crouch" => RunnerAnimation::Crouch,
            "Slide" => RunnerAnimation::Slide,
            "Plasma" => RunnerAnimation::Plasma,
            "Launch" => RunnerAnimation::Launch,
            "Dead" => RunnerAnimation::Death,
            _ => return None,
        };
        Some(clip)
    }

    pub fn looping(&self) -> bool {
        !matches!(
            self,
            RunnerAnimation::Jump
                | RunnerAnimation::Walljump
                | RunnerAnimation::Launch
                | RunnerAnimation::Death
        )
    }

    pub fn total_frames(&self) -> u32 {
        match self {
            RunnerAnimation::Idle => 4,
            RunnerAnimation::Run => 6,
            RunnerAnimation::Walljump => 4,
            RunnerAnimation::Death => 6,
            RunnerAnimation::Crouch | RunnerAnimation::Slide => 1,
            _ => 2,
        }
    }

    /// Seconds per frame.
    pub fn frame_duration(&self) -> f32 {
        match self {
            RunnerAnimation::Walljump => 0.08,
            RunnerAnimation::Run | RunnerAnimation::Plasma => 0.1,
            _ => 0.15,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            RunnerAnimation::Idle => "idle",
            RunnerAnimation::Run => "run",
            RunnerAnimation::Decel => "decel",
            RunnerAnimation::Jump => "jump",
            RunnerAnimation::Fall => "fall",
            RunnerAnimation::Walljump => "walljump",
            RunnerAnimation::Crouch => "crouch",
            RunnerAnimation::Slide => "slide",
            RunnerAnimation::Plasma => "plasma",
            RunnerAnimation::Launch => "launch",
            RunnerAnimation::Death => "death",
        }
    }

    /// Placeholder colour until the runner has real sprite sheets.
    pub fn tint(&self) -> Color {
        match self {
            RunnerAnimation::Idle | RunnerAnimation::Decel => Color::srgb(0.9, 0.85, 0.3),
            RunnerAnimation::Run => Color::srgb(1.0, 0.75, 0.2),
            RunnerAnimation::Jump | RunnerAnimation::Fall => Color::srgb(0.55, 0.8, 1.0),
            RunnerAnimation::Walljump => Color::srgb(0.4, 1.0, 0.6),
            RunnerAnimation::Crouch | RunnerAnimation::Slide => Color::srgb(0.85, 0.55, 0.9),
            RunnerAnimation::Plasma => Color::srgb(0.3, 0.6, 1.0),
            RunnerAnimation::Launch => Color::srgb(1.0, 0.5, 0.3),
            RunnerAnimation::Death => Color::srgb(0.6, 0.1, 0.1),
        }
    }
}

/// Component for animation playback on the runner sprite.
#[derive(Component, Debug)]
pub struct AnimationController {
    pub state: RunnerAnimation,
    /// Previous state (for detecting transitions).
    pub previous_state: RunnerAnimation,
    /// Base name for animation sprites (e.g., "runner").
    pub animation_base: String,
    /// Current frame index (0-based).
    pub current_frame: u32,
    pub total_frames: u32,
    /// Time accumulator for frame timing.
    pub frame_timer: f32,
    pub frame_duration: f32,
    pub looping: bool,
    /// Whether the animation has finished (for non-looping).
    pub finished: bool,
    /// Weapon drawn in the runner's hands.
    pub weapon: Option<WeaponKind>,
}

impl Default for AnimationController {
    fn default() -> Self {
        let state = RunnerAnimation::default();
        Self {
            state,
            previous_state: state,
            animation_base: String::new(),
            current_frame: 0,
            total_frames: state.total_frames(),
            frame_timer: 0.0,
            frame_duration: state.frame_duration(),
            looping: state.looping(),
            finished: false,
            weapon: None,
        }
    }
}

impl AnimationController {
    pub fn new(animation_base: &str) -> Self {
        Self {
            animation_base: animation_base.to_string(),
            ..default()
        }
    }

    pub fn for_runner() -> Self {
        Self::new("runner")
    }

    /// Switch clips. A looping clip already playing keeps its place; one-shot
    /// clips always restart.
    pub fn set_state(&mut self, state: RunnerAnimation) {
        if self.state == state && self.looping {
            return;
        }
        self.previous_state = self.state;
        self.state = state;
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.finished = false;
        self.looping = state.looping();
        self.total_frames = state.total_frames();
        self.frame_duration = state.frame_duration();
    }

    /// Advance playback by `dt` seconds. Returns true when a one-shot clip
    /// reaches its last frame.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.finished {
            return false;
        }

        self.frame_timer += dt;
        let mut completed = false;
        while self.frame_timer >= self.frame_duration && !self.finished {
            self.frame_timer -= self.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= self.total_frames {
                if self.looping {
                    self.current_frame = 0;
                } else {
                    self.current_frame = self.total_frames - 1;
                    self.finished = true;
                    completed = true;
                }
            }
        }
        completed
    }

    /// Full sprite key for the current frame, e.g. `runner_run_3`.
    pub fn current_sprite_key(&self) -> String {
        format!(
            "{}_{}_{}",
            self.animation_base,
            self.state.suffix(),
            self.current_frame + 1 // 1-indexed for file naming
        )
    }
}

impl AnimationPort for AnimationController {
    fn on_state_entered(&mut self, state: &'static str) {
        match RunnerAnimation::from_state_name(state) {
            Some(clip) => self.set_state(clip),
            None => debug!("No animation for state {}", state),
        }
    }

    fn on_weapon_changed(&mut self, weapon: Option<WeaponKind>) {
        self.weapon = weapon;
    }
}

/// Message fired when a non-looping animation completes.
#[derive(Debug)]
pub struct AnimationFinished {
    pub entity: Entity,
    pub state: RunnerAnimation,
}

impl Message for AnimationFinished {}
