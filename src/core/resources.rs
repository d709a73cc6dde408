//! Core domain: shared resources for pausing and camera framing.

use bevy::prelude::*;
use std::collections::HashSet;

/// Resource tracking if gameplay should be paused.
/// Gameplay is paused if any source is active.
#[derive(Resource, Debug, Default)]
pub struct GameplayPaused {
    pub sources: HashSet<String>,
}

impl GameplayPaused {
    pub fn is_paused(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn pause(&mut self, source: impl Into<String>) {
        self.sources.insert(source.into());
    }

    pub fn unpause(&mut self, source: impl Into<String>) {
        self.sources.remove(&source.into());
    }

    /// Flip one source on or off. Returns whether that source is now pausing.
    pub fn toggle(&mut self, source: impl Into<String>) -> bool {
        let source = source.into();
        if self.sources.remove(&source) {
            false
        } else {
            self.sources.insert(source);
            true
        }
    }
}

/// Run condition: returns true only when gameplay is not paused
pub fn gameplay_active(paused: Res<GameplayPaused>) -> bool {
    !paused.is_paused()
}

/// How the camera trails the runner.
#[derive(Resource, Debug, Clone)]
pub struct CameraFollow {
    /// Pixels the framing leads ahead of the facing direction.
    pub lookahead: f32,
    /// Extra lead per px/ms of horizontal speed.
    pub velocity_lead: f32,
    /// Exponential smoothing rate per millisecond.
    pub smoothing: f32,
}

impl Default for CameraFollow {
    fn default() -> Self {
        Self {
            lookahead: 160.0,
            velocity_lead: 36.0,
            smoothing: 0.01,
        }
    }
}

impl CameraFollow {
    /// Camera position (Bevy space) to move toward for a runner centred at
    /// `center` (world space, y-down).
    pub fn target(&self, center: Vec2, direction: f32, vx: f32) -> Vec2 {
        let lead = self.lookahead * direction + self.velocity_lead * vx;
        Vec2::new(center.x + lead, -center.y)
    }

    /// Share of the remaining distance covered in `dt_ms`.
    pub fn blend(&self, dt_ms: f32) -> f32 {
        1.0 - (-self.smoothing * dt_ms).exp()
    }
}
