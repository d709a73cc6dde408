//! Movement domain: action states and the state machine driving them.

use bevy::prelude::*;

use super::locomotion::Locomotion;
use super::ports::{BodyEffect, SoundCue};

/// Transition triggers understood by the action states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementEvent {
    Idle,
    Move,
    Decel,
    Jump,
    Fall,
    Walljump,
    Crouch,
    Slide,
    Plasma,
    Ramp,
    Launch,
    Dead,
}

impl MovementEvent {
    pub const ALL: [MovementEvent; 12] = [
        MovementEvent::Idle,
        MovementEvent::Move,
        MovementEvent::Decel,
        MovementEvent::Jump,
        MovementEvent::Fall,
        MovementEvent::Walljump,
        MovementEvent::Crouch,
        MovementEvent::Slide,
        MovementEvent::Plasma,
        MovementEvent::Ramp,
        MovementEvent::Launch,
        MovementEvent::Dead,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MovementEvent::Idle => "idle",
            MovementEvent::Move => "move",
            MovementEvent::Decel => "decel",
            MovementEvent::Jump => "jump",
            MovementEvent::Fall => "fall",
            MovementEvent::Walljump => "walljump",
            MovementEvent::Crouch => "crouch",
            MovementEvent::Slide => "slide",
            MovementEvent::Plasma => "plasma",
            MovementEvent::Ramp => "ramp",
            MovementEvent::Launch => "launch",
            MovementEvent::Dead => "dead",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|event| event.name() == name)
    }
}

/// One node of the movement state machine, with whatever data it needs locally.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionState {
    Idle,
    Move,
    Decel,
    Jump,
    Fall,
    Walljump {
        /// Exit is locked until the wall-jump animation reports completion.
        finished: bool,
        elapsed: f32,
    },
    Crouch,
    Slide,
    Plasma,
    Launch {
        elapsed: f32,
    },
    Dead {
        timer: f32,
    },
}

impl ActionState {
    pub fn walljump() -> Self {
        ActionState::Walljump {
            finished: false,
            elapsed: 0.0,
        }
    }

    pub fn launch() -> Self {
        ActionState::Launch { elapsed: 0.0 }
    }

    pub fn dead() -> Self {
        ActionState::Dead { timer: 0.0 }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActionState::Idle => "Idle",
            ActionState::Move => "Move",
            ActionState::Decel => "Decel",
            ActionState::Jump => "Jump",
            ActionState::Fall => "Fall",
            ActionState::Walljump { .. } => "Walljump",
            ActionState::Crouch => "Crouch",
            ActionState::Slide => "Slide",
            ActionState::Plasma => "Plasma",
            ActionState::Launch { .. } => "Launch",
            ActionState::Dead { .. } => "Dead",
        }
    }

    /// Launch that has not yet been through a state update.
    pub fn is_fresh_launch(&self) -> bool {
        matches!(self, ActionState::Launch { elapsed } if *elapsed == 0.0)
    }

    /// Next state for `event`, or `None` to stay put.
    pub fn on_event(&self, event: MovementEvent) -> Option<ActionState> {
        use ActionState as S;
        use MovementEvent as E;

        let next = match (self, event) {
            (S::Idle, E::Jump) => S::Jump,
            (S::Idle, E::Move) => S::Move,
            (S::Idle, E::Decel) => S::Decel,
            (S::Idle, E::Fall) => S::Fall,
            (S::Idle, E::Crouch) => S::Crouch,

            (S::Move, E::Decel) => S::Decel,
            (S::Move, E::Fall) => S::Fall,
            (S::Move, E::Jump) => S::Jump,
            (S::Move, E::Crouch) => S::Crouch,
            (S::Move, E::Idle) => S::Idle,

            (S::Decel, E::Idle) => S::Idle,
            (S::Decel, E::Move) => S::Move,
            (S::Decel, E::Fall) => S::Fall,
            (S::Decel, E::Jump) => S::Jump,
            (S::Decel, E::Crouch) => S::Crouch,

            (S::Jump, E::Fall) => S::Fall,
            (S::Jump, E::Walljump) => S::walljump(),
            (S::Jump, E::Ramp) => S::Move,

            (S::Fall, E::Idle) => S::Idle,
            (S::Fall, E::Decel) => S::Decel,
            (S::Fall, E::Move) => S::Move,
            (S::Fall, E::Crouch) => S::Crouch,
            (S::Fall, E::Walljump) => S::walljump(),
            (S::Fall, E::Ramp) => S::Move,

            (S::Walljump { .. }, E::Fall) => S::Fall,
            (S::Walljump { .. }, E::Walljump) => S::walljump(),
            (S::Walljump { .. }, E::Decel) => S::Decel,
            (S::Walljump { .. }, E::Move) => S::Move,
            (S::Walljump { .. }, E::Idle) => S::Idle,

            (S::Crouch, E::Jump) => S::Jump,
            (S::Crouch, E::Decel) => S::Decel,
            (S::Crouch, E::Fall) => S::Fall,
            (S::Crouch, E::Move) => S::Move,
            (S::Crouch, E::Idle) => S::Idle,
            (S::Crouch, E::Slide) => S::Slide,

            (S::Slide, E::Jump) => S::Jump,
            (S::Slide, E::Decel) => S::Decel,
            (S::Slide, E::Fall) => S::Fall,
            (S::Slide, E::Move) => S::Move,
            (S::Slide, E::Idle) => S::Idle,
            (S::Slide, E::Crouch) => S::Crouch,

            (S::Plasma, E::Fall) => S::Fall,
            (S::Plasma, E::Walljump) => S::walljump(),
            (S::Plasma, E::Move) => S::Move,
            (S::Plasma, E::Idle) => S::Idle,
            (S::Plasma, E::Decel) => S::Decel,

            (S::Launch { .. }, E::Fall) => S::Fall,
            (S::Launch { .. }, E::Walljump) => S::walljump(),
            (S::Launch { .. }, E::Ramp) => S::Move,

            (S::Dead { .. }, _) => return None,

            // Shared by every living state.
            (S::Plasma, E::Plasma) => return None,
            (_, E::Plasma) => S::Plasma,
            (_, E::Dead) => S::dead(),
            (S::Idle | S::Move | S::Decel | S::Crouch | S::Slide, E::Launch) => S::launch(),

            _ => return None,
        };
        Some(next)
    }

    pub fn can_enter(&self, _body: &Locomotion) -> bool {
        true
    }

    pub fn can_exit(&self) -> bool {
        match self {
            ActionState::Walljump { finished, .. } => *finished,
            _ => true,
        }
    }

    pub(crate) fn on_enter(&mut self, body: &mut Locomotion) {
        match self {
            ActionState::Idle | ActionState::Decel => body.acceleration = 0.0,
            ActionState::Jump => {
                body.last_walljump_at = None;
                body.take_off();
            }
            ActionState::Fall => body.last_ramp_angle = 0.0,
            ActionState::Walljump { .. } => {
                body.velocity.y = body.tuning.walljump_velocity;
                body.emit(BodyEffect::Sound(SoundCue::WallJump));
            }
            ActionState::Crouch | ActionState::Slide => body.crouch_down(),
            ActionState::Dead { .. } => {
                body.input_frozen = true;
                body.velocity.x = 0.0;
                body.acceleration = 0.0;
                body.emit(BodyEffect::Sound(SoundCue::Death));
            }
            ActionState::Move | ActionState::Plasma | ActionState::Launch { .. } => {}
        }
    }

    pub(crate) fn on_exit(&mut self, body: &mut Locomotion) {
        if let ActionState::Crouch | ActionState::Slide = self {
            body.stand_up();
        }
    }

    pub(crate) fn update(&mut self, body: &mut Locomotion, dt: f32) {
        let tuning = &body.tuning;
        match self {
            ActionState::Idle | ActionState::Decel => {
                if body.intents.down {
                    body.raise(MovementEvent::Crouch);
                }
            }
            ActionState::Move => {
                body.acceleration = tuning.run_acceleration;
                if body.intents.down {
                    body.raise(MovementEvent::Crouch);
                }
            }
            ActionState::Jump => {
                if body.forward_held() && body.forward_speed() < tuning.jump_air_speed_limit {
                    body.acceleration = tuning.jump_air_acceleration;
                }
            }
            ActionState::Fall => {
                body.acceleration =
                    if body.forward_held() && body.forward_speed() < tuning.fall_air_speed_limit {
                        tuning.fall_air_acceleration
                    } else {
                        0.0
                    };
            }
            ActionState::Walljump { finished, elapsed } => {
                *elapsed += dt;
                if *elapsed >= tuning.walljump_exit_fallback_ms {
                    *finished = true;
                }
            }
            ActionState::Crouch => {
                body.acceleration = 0.0;
                if body.forward_held() {
                    body.raise(MovementEvent::Slide);
                }
            }
            ActionState::Slide => {
                body.acceleration = 0.0;
                if !body.forward_held() {
                    body.raise(MovementEvent::Crouch);
                }
            }
            ActionState::Plasma => {
                if !body.any_direction_held() {
                    body.raise(MovementEvent::Fall);
                }
            }
            ActionState::Launch { elapsed } => {
                *elapsed += dt;
                if *elapsed >= tuning.launch_duration_ms {
                    body.raise(MovementEvent::Fall);
                }
            }
            ActionState::Dead { timer } => {
                *timer += dt;
                body.velocity = Vec2::new(0.0, tuning.death_fall_speed);
                if *timer > tuning.death_duration_ms {
                    body.respawn_requested = true;
                }
            }
        }
    }
}

/// A state change that went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: &'static str,
    pub to: &'static str,
    pub event: MovementEvent,
}

/// Holds the active [`ActionState`] and applies transitions with their hooks.
#[derive(Debug, Clone)]
pub struct MovementStateMachine {
    state: ActionState,
}

impl MovementStateMachine {
    pub fn new(initial: ActionState) -> Self {
        Self { state: initial }
    }

    pub fn state(&self) -> &ActionState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut ActionState {
        &mut self.state
    }

    pub fn name(&self) -> &'static str {
        self.state.name()
    }

    /// Offer `event` to the current state. Returns the transition if one happened.
    pub(crate) fn raise_event(
        &mut self,
        event: MovementEvent,
        body: &mut Locomotion,
    ) -> Option<Transition> {
        let next = self.state.on_event(event)?;

        if !self.state.can_exit() || !next.can_enter(body) {
            debug!(
                "Dropped {} while in {}: transition gated",
                event.name(),
                self.state.name()
            );
            return None;
        }

        self.state.on_exit(body);
        body.emit(BodyEffect::StateExited(self.state.name()));

        let previous = std::mem::replace(&mut self.state, next);
        self.state.on_enter(body);
        body.emit(BodyEffect::StateEntered(self.state.name()));

        let transition = Transition {
            from: previous.name(),
            to: self.state.name(),
            event,
        };
        debug!("{} -> {} on {}", transition.from, transition.to, event.name());
        Some(transition)
    }

    pub(crate) fn update(&mut self, body: &mut Locomotion, dt: f32) {
        self.state.update(body, dt);
    }
}
