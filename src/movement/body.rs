//! Movement domain: the character body and its per-tick pipeline.

use std::sync::Arc;

use bevy::prelude::*;

use crate::physics::{
    Aabb, Collider, ColliderTag, CollisionQuery, distance_to_ground, overlaps_tagged,
    point_in_tagged, ramp_edge_contact, snap_height, surface_angle, within_near_range,
};
use crate::weapons::{Arsenal, FireOutcome, WeaponKind};

use super::friction::surface_friction;
use super::locomotion::{Intents, Locomotion};
use super::ports::{
    BodyEffect, Clock, DecalKind, DecalRequest, Ports, RaceLine, ShotFired, SoundCue,
};
use super::race::RaceTimer;
use super::resources::{MovementInput, MovementTuning};
use super::state::{ActionState, MovementEvent, MovementStateMachine, Transition};

/// How far below the body the ground scan looks.
const GROUND_SCAN_DEPTH: f32 = 2048.0;

/// Upper bound on events handled in one drain, against hooks that keep re-raising.
const MAX_CHAINED_EVENTS: usize = 32;

/// Result of one [`CharacterBody::update`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Effects raised this tick, in order, after they were handed to the ports.
    pub effects: Vec<BodyEffect>,
    /// The body died and was put back at its spawn point. The level should reset too.
    pub respawned: bool,
}

impl TickReport {
    pub fn entered_states(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.effects.iter().filter_map(|effect| match effect {
            BodyEffect::StateEntered(name) => Some(*name),
            _ => None,
        })
    }
}

/// Read-only view for camera and HUD code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    pub state: &'static str,
    pub direction: f32,
    pub distance_to_ground: f32,
    pub last_boost: f32,
    pub jump_timing: Option<f32>,
    pub last_ramp_angle: f32,
    pub crouching: bool,
    pub active_weapon: Option<WeaponKind>,
    /// Milliseconds since the start line, or the run time once finished.
    pub race_time: Option<f64>,
}

/// The runner: a box moved by an action-state machine through a level of
/// static boxes and ramps.
#[derive(Component)]
pub struct CharacterBody {
    motion: Locomotion,
    machine: MovementStateMachine,
    arsenal: Arsenal,
    race: RaceTimer,
    spawn_point: Vec2,
    spawn_direction: f32,
    clock: Arc<dyn Clock>,
}

impl CharacterBody {
    /// New body at `spawn_point` (top-left corner), falling.
    pub fn new(spawn_point: Vec2, tuning: MovementTuning, clock: Arc<dyn Clock>) -> Self {
        Self {
            motion: Locomotion::new(spawn_point, 1.0, tuning),
            machine: MovementStateMachine::new(ActionState::Fall),
            arsenal: Arsenal::default(),
            race: RaceTimer::default(),
            spawn_point,
            spawn_direction: 1.0,
            clock,
        }
    }

    /// Face left instead of right, now and after every respawn.
    pub fn facing(mut self, direction: f32) -> Self {
        self.spawn_direction = if direction < 0.0 { -1.0 } else { 1.0 };
        self.motion.direction = self.spawn_direction;
        self
    }

    // ---- Read access -------------------------------------------------------

    pub fn state(&self) -> &ActionState {
        self.machine.state()
    }

    pub fn state_name(&self) -> &'static str {
        self.machine.name()
    }

    pub fn position(&self) -> Vec2 {
        self.motion.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.motion.velocity
    }

    pub fn bounds(&self) -> Aabb {
        self.motion.bounds()
    }

    pub fn intents(&self) -> Intents {
        self.motion.intents
    }

    pub fn arsenal(&self) -> &Arsenal {
        &self.arsenal
    }

    pub fn race(&self) -> &RaceTimer {
        &self.race
    }

    pub fn tuning(&self) -> &MovementTuning {
        &self.motion.tuning
    }

    pub fn snapshot(&self) -> BodySnapshot {
        let m = &self.motion;
        BodySnapshot {
            position: m.position,
            velocity: m.velocity,
            size: m.size,
            state: self.machine.name(),
            direction: m.direction,
            distance_to_ground: m.distance_to_ground,
            last_boost: m.last_boost,
            jump_timing: m.jump_timing,
            last_ramp_angle: m.last_ramp_angle,
            crouching: m.crouching,
            active_weapon: self.arsenal.active(),
            race_time: self.race.elapsed(self.clock.now()),
        }
    }

    // ---- External control --------------------------------------------------

    pub fn set_position(&mut self, position: Vec2) {
        self.motion.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.motion.velocity = velocity;
    }

    pub fn set_tuning(&mut self, tuning: MovementTuning) {
        self.motion.tuning = tuning;
    }

    /// Hold the body still until unfrozen: no movement, jumps or weapons.
    pub fn set_frozen(&mut self, frozen: bool) {
        self.motion.movement_frozen = frozen;
    }

    pub fn is_frozen(&self) -> bool {
        self.motion.movement_frozen
    }

    pub fn give_weapon(&mut self, kind: WeaponKind, ammo: u32) {
        self.arsenal.pick_up(kind, ammo);
        self.motion.emit(BodyEffect::WeaponChanged(Some(kind)));
    }

    /// Raise an event by name. Unknown names are ignored.
    pub fn raise_event_named(&mut self, name: &str) -> Option<Transition> {
        match MovementEvent::from_name(name) {
            Some(event) => self.raise(event),
            None => {
                debug!("Ignoring unknown movement event '{}'", name);
                None
            }
        }
    }

    /// Callback from the animation layer: the current one-shot animation ended.
    pub fn notify_animation_finished(&mut self) {
        if let ActionState::Walljump { finished, .. } = self.machine.state_mut() {
            *finished = true;
        }
    }

    /// Knockback from an explosion `distance` px away, pushing along `angle`
    /// (radians, y-down).
    pub fn apply_explosion_impulse(&mut self, distance: f32, angle: f32) {
        let speed = self.motion.tuning.weapons.blast_speed(distance);
        self.motion.velocity += Vec2::new(angle.cos(), angle.sin()) * speed;
        self.raise(MovementEvent::Fall);
    }

    /// Put the body back at its spawn point with fresh state, falling.
    pub fn reset(&mut self) {
        let tuning = self.motion.tuning.clone();
        let intents = self.motion.intents;
        let effects = std::mem::take(&mut self.motion.effects);

        self.motion = Locomotion::new(self.spawn_point, self.spawn_direction, tuning);
        self.motion.intents = intents;
        self.motion.effects = effects;
        self.machine = MovementStateMachine::new(ActionState::Fall);
        self.arsenal = Arsenal::default();
        self.race = RaceTimer::default();
    }

    // ---- Input -------------------------------------------------------------

    pub fn apply_input(&mut self, input: &MovementInput) {
        self.set_left(input.left);
        self.set_right(input.right);
        self.set_up(input.up);
        self.set_down(input.down);
        self.set_jump(input.jump);
        self.set_wall_jump(input.wall_jump);
        self.set_shoot(input.shoot);
        self.set_switch_weapon(input.switch_weapon);
    }

    fn set_direction_key(&mut self, pressed: bool, facing: f32) {
        if self.motion.input_frozen {
            return;
        }
        let was_pressed = if facing > 0.0 {
            std::mem::replace(&mut self.motion.intents.right, pressed)
        } else {
            std::mem::replace(&mut self.motion.intents.left, pressed)
        };
        // Pressing forward while crouched at rest nudges the body into a slide.
        if pressed
            && !was_pressed
            && facing == self.motion.direction
            && *self.machine.state() == ActionState::Crouch
            && self.motion.velocity.x == 0.0
        {
            let nudge = self.motion.tuning.crouch_nudge_speed;
            self.motion.set_forward_speed(nudge);
        }
    }

    pub fn set_left(&mut self, pressed: bool) {
        self.set_direction_key(pressed, -1.0);
    }

    pub fn set_right(&mut self, pressed: bool) {
        self.set_direction_key(pressed, 1.0);
    }

    pub fn set_up(&mut self, pressed: bool) {
        if !self.motion.input_frozen {
            self.motion.intents.up = pressed;
        }
    }

    pub fn set_down(&mut self, pressed: bool) {
        if self.motion.input_frozen {
            return;
        }
        let was_pressed = std::mem::replace(&mut self.motion.intents.down, pressed);
        if pressed && !was_pressed {
            self.raise(MovementEvent::Crouch);
        }
    }

    /// Edge-triggered: a press starts the jump buffer, a release clears it.
    pub fn set_jump(&mut self, pressed: bool) {
        if self.motion.input_frozen {
            return;
        }
        let was_pressed = std::mem::replace(&mut self.motion.intents.jump, pressed);
        if pressed && !was_pressed {
            self.motion.jump_pressed_at = Some(self.clock.now());
            self.motion.record_jump_press();
        } else if !pressed {
            self.motion.jump_pressed_at = None;
        }
    }

    pub fn set_wall_jump(&mut self, pressed: bool) {
        if !self.motion.input_frozen {
            self.motion.intents.wall_jump = pressed;
        }
    }

    pub fn set_shoot(&mut self, pressed: bool) {
        if !self.motion.input_frozen {
            self.motion.intents.shoot = pressed;
        }
    }

    pub fn set_switch_weapon(&mut self, pressed: bool) {
        if !self.motion.input_frozen {
            self.motion.intents.switch_weapon = pressed;
        }
    }

    // ---- Tick --------------------------------------------------------------

    /// Advance the body by `dt` milliseconds against the colliders `world` supplies.
    pub fn update(
        &mut self,
        dt: f32,
        world: &dyn CollisionQuery,
        ports: &mut Ports<'_>,
    ) -> TickReport {
        let mut report = TickReport::default();
        let dt = dt.min(self.motion.tuning.max_tick_ms);
        if !(dt > 0.0) {
            return report;
        }

        let now = self.clock.now();
        let region = self.query_region(dt);
        let nearby = world.query(&region);

        self.motion.can_uncrouch = !self.motion.crouching || self.motion.standing_room(&nearby);
        self.motion.distance_to_ground = distance_to_ground(&self.motion.bounds(), &nearby);

        // A frozen body keeps its state, velocity, ammo and cooldowns.
        if !self.motion.movement_frozen {
            if self.motion.velocity.y > 0.0 && *self.machine.state() != ActionState::Plasma {
                self.raise(MovementEvent::Fall);
            }
            self.check_buffered_jump(now);
            self.check_wall_jump(now, &nearby);
            self.check_weapon_switch(now);

            self.state_events(dt);
            self.machine.update(&mut self.motion, dt);
            self.drain_events();

            if self.motion.respawn_requested {
                self.respawn();
                report.respawned = true;
            } else {
                self.integrate(dt, now, &nearby, ports);
            }

            self.arsenal.tick(dt);
            if !report.respawned {
                self.fire_weapons(&nearby);
            }
        }

        report.effects = std::mem::take(&mut self.motion.effects);
        for effect in &report.effects {
            effect.dispatch(ports);
        }
        report
    }

    fn query_region(&self, dt: f32) -> Aabb {
        let m = &self.motion;
        let reach = m.velocity.abs() * dt;
        m.bounds().expanded(
            reach.x + m.size.x,
            reach.y + m.tuning.body_height,
            reach.y + GROUND_SCAN_DEPTH,
        )
    }

    fn raise(&mut self, event: MovementEvent) -> Option<Transition> {
        let transition = self.machine.raise_event(event, &mut self.motion);
        self.drain_events();
        transition
    }

    /// Feed events queued by state hooks back into the machine.
    fn drain_events(&mut self) {
        let mut handled = 0;
        while let Some(event) = self.motion.pending.pop_front() {
            if handled == MAX_CHAINED_EVENTS {
                warn!("Dropping chained movement events after {}", handled);
                self.motion.pending.clear();
                break;
            }
            self.machine.raise_event(event, &mut self.motion);
            handled += 1;
        }
    }

    fn respawn(&mut self) {
        self.reset();
        self.raise(MovementEvent::Idle);
        info!("Runner respawned at {:?}", self.spawn_point);
    }

    fn check_buffered_jump(&mut self, now: f64) {
        let m = &self.motion;
        if !m.intents.jump || !m.can_uncrouch {
            return;
        }
        if let Some(pressed_at) = m.jump_pressed_at {
            if now - pressed_at < m.tuning.jump_buffer_ms {
                self.raise(MovementEvent::Jump);
            }
        }
    }

    fn check_wall_jump(&mut self, now: f64, nearby: &[&Collider]) {
        let m = &self.motion;
        if !m.intents.wall_jump {
            return;
        }
        let ready = m
            .last_walljump_at
            .is_none_or(|at| now - at > m.tuning.walljump_cooldown_ms);
        if ready && overlaps_tagged(&m.bounds(), nearby, ColliderTag::Wall) {
            self.motion.last_walljump_at = Some(now);
            self.raise(MovementEvent::Walljump);
        }
    }

    fn check_weapon_switch(&mut self, now: f64) {
        let m = &self.motion;
        if !m.intents.switch_weapon {
            return;
        }
        let ready = m
            .last_weapon_switch_at
            .is_none_or(|at| now - at > m.tuning.weapons.switch_cooldown_ms);
        if !ready {
            return;
        }
        self.motion.last_weapon_switch_at = Some(now);
        if let Some(kind) = self.arsenal.switch() {
            self.motion.emit(BodyEffect::WeaponChanged(Some(kind)));
            self.motion.emit(BodyEffect::Sound(SoundCue::WeaponSwitch));
        }
    }

    /// Intent-driven transitions for a body resting on something.
    fn state_events(&mut self, dt: f32) {
        let grounded = self.motion.velocity.y == 0.0;
        if grounded && self.motion.can_uncrouch {
            let forward = self.motion.forward_held();
            let down = self.motion.intents.down;

            if forward && !down {
                self.raise(MovementEvent::Move);
            }
            if self.motion.forward_speed() > 0.0
                && !forward
                && !down
                && *self.machine.state() != ActionState::Idle
            {
                self.raise(MovementEvent::Decel);
            }
            if self.motion.velocity.x.abs() < self.motion.tuning.idle_speed_threshold
                && *self.machine.state() != ActionState::Move
                && !down
            {
                self.motion.velocity.x = 0.0;
                self.raise(MovementEvent::Idle);
            }
        }

        let m = &mut self.motion;
        if m.crouching && m.forward_speed() < m.tuning.crouch_stop_speed {
            m.velocity.x = 0.0;
        } else if m.back_held() && !m.forward_held() && *self.machine.state() != ActionState::Plasma
        {
            let speed = (m.forward_speed() - m.tuning.brake_deceleration * dt).max(0.0);
            m.set_forward_speed(speed);
        }
    }

    fn integrate(&mut self, dt: f32, now: f64, nearby: &[&Collider], ports: &mut Ports<'_>) {
        let friction = surface_friction(
            self.machine.state(),
            self.motion.forward_speed(),
            self.motion.travel_slope(),
            &self.motion.tuning.friction,
        );
        self.motion.velocity.x *= friction.over(dt);
        self.motion.accelerate(dt);
        let max_fall = self.motion.tuning.max_fall_velocity;
        self.motion.velocity.y = self.motion.velocity.y.min(max_fall);

        let dx = self.motion.velocity.x * dt;
        if dx != 0.0 {
            self.move_axis(Vec2::new(dx, 0.0), now, nearby, ports);
        }
        let dy = self.motion.velocity.y * dt;
        if dy != 0.0 {
            self.move_axis(Vec2::new(0.0, dy), now, nearby, ports);
        }
    }

    fn move_axis(&mut self, delta: Vec2, now: f64, nearby: &[&Collider], ports: &mut Ports<'_>) {
        self.motion.position += delta;
        // Ramps take priority: while one is underfoot, boxes are not resolved.
        if self.motion.last_ramp_angle == 0.0 && !self.machine.state().is_fresh_launch() {
            self.resolve_boxes(delta, nearby);
        }
        self.resolve_ramps(delta, nearby);
        self.functional_collisions(now, nearby, ports);
    }

    fn resolve_boxes(&mut self, delta: Vec2, nearby: &[&Collider]) {
        for shape in nearby.iter().filter_map(|c| c.solid_box()) {
            let body = self.motion.bounds();
            if !within_near_range(&body, shape) || !body.overlaps(shape) {
                continue;
            }

            if delta.x != 0.0 {
                self.motion.position.x = if delta.x > 0.0 {
                    shape.left() - body.w
                } else {
                    shape.right()
                };
                self.motion.velocity.x = 0.0;
                if *self.machine.state() == ActionState::Move
                    && !self.motion.any_direction_held()
                {
                    self.raise(MovementEvent::Decel);
                }
            }

            if delta.y > 0.0 {
                self.motion.position.y = shape.top() - body.h;
                self.motion.velocity.y = 0.0;
                self.land();
            } else if delta.y < 0.0 {
                self.motion.position.y = shape.bottom();
                self.motion.velocity.y = self.motion.tuning.bounce_velocity;
                self.raise(MovementEvent::Fall);
            }
        }
    }

    fn land(&mut self) {
        if matches!(
            self.machine.state(),
            ActionState::Jump | ActionState::Launch { .. }
        ) {
            self.raise(MovementEvent::Fall);
        }
        if matches!(
            self.machine.state(),
            ActionState::Fall | ActionState::Walljump { .. }
        ) {
            self.motion.ground_touch_position = Some(self.motion.position);
            debug!("Landed at {:?}", self.motion.position);
            self.raise(MovementEvent::Decel);
        }
    }

    fn resolve_ramps(&mut self, delta: Vec2, nearby: &[&Collider]) {
        // Bodies on the way up pass through ramps.
        if self.motion.velocity.y < 0.0 {
            self.motion.last_ramp_angle = 0.0;
            return;
        }

        let body = self.motion.bounds();
        let contact_box = if self.motion.last_ramp_angle != 0.0 {
            let reach = delta.x.abs() + self.motion.tuning.ramp.stick_margin;
            body.expanded(0.0, 0.0, reach)
        } else {
            body
        };
        let contact = nearby
            .iter()
            .filter_map(|c| c.as_ramp())
            .find_map(|ramp| ramp_edge_contact(&contact_box, ramp));
        let previous_slope = self.motion.travel_slope();

        let Some(edge) = contact else {
            if previous_slope > 0.0 {
                self.launch_from_ramp();
            }
            self.motion.last_ramp_angle = 0.0;
            return;
        };

        let angle = surface_angle(&edge);
        if previous_slope > 0.0 && angle * self.motion.direction < 0.0 {
            // Crest of a two-sided ramp.
            self.launch_from_ramp();
            self.motion.last_ramp_angle = 0.0;
            return;
        }

        self.motion.last_ramp_angle = angle;
        let surface = snap_height(&edge, body.center().x);
        self.motion.position.y = surface - body.h;
        if self.motion.ground_touch_position.is_none() {
            self.motion.ground_touch_position = Some(self.motion.position);
        }
        self.motion.velocity.y = 0.0;
        self.raise(MovementEvent::Ramp);
    }

    fn launch_from_ramp(&mut self) {
        let vy = self.motion.ramp_launch_speed();
        self.motion.velocity.y = vy;
        debug!(
            "Ramp launch at {:.1} deg, vy {:.3}",
            self.motion.last_ramp_angle.to_degrees(),
            vy
        );
        self.raise(MovementEvent::Launch);
    }

    fn functional_collisions(&mut self, now: f64, nearby: &[&Collider], ports: &mut Ports<'_>) {
        let body = self.motion.bounds();

        if overlaps_tagged(&body, nearby, ColliderTag::Death) {
            self.raise(MovementEvent::Dead);
        }

        if let Some(items) = ports.items.as_deref_mut() {
            if let Some(pickup) = items.pick_up(&body, now) {
                self.arsenal.pick_up(pickup.weapon, pickup.ammo);
                self.motion.emit(BodyEffect::Sound(SoundCue::Pickup));
                self.motion
                    .emit(BodyEffect::WeaponChanged(Some(pickup.weapon)));
            }
        }

        if let Some(portals) = ports.portals.as_deref_mut() {
            if let Some(exit) = portals.teleport(&body, now) {
                self.motion.take_portal(exit);
            }
        }

        if let Some(pads) = ports.jump_pads.as_deref_mut() {
            if let Some(launch) = pads.bounce(&body, now) {
                self.raise(MovementEvent::Jump);
                let direction = self.motion.direction;
                self.motion.velocity.x += launch.x * direction;
                self.motion.velocity.y = launch.y;
                self.motion.emit(BodyEffect::Sound(SoundCue::JumpPad));
            }
        }

        if let Some(lines) = ports.race_lines {
            if lines.touches(RaceLine::Start, &body) && self.race.start(now) {
                self.motion.emit(BodyEffect::RaceStarted);
            }
            if lines.touches(RaceLine::Finish, &body) {
                if let Some(time) = self.race.finish(now) {
                    info!("Run finished in {:.3} s", time / 1000.0);
                    self.motion.emit(BodyEffect::RaceFinished(time));
                }
            }
        }
    }

    fn fire_weapons(&mut self, nearby: &[&Collider]) {
        if !self.motion.intents.shoot {
            if *self.machine.state() == ActionState::Plasma {
                self.raise(MovementEvent::Fall);
            }
            return;
        }
        let Some(kind) = self.arsenal.active() else {
            return;
        };

        match self.arsenal.try_fire(kind, &self.motion.tuning.weapons) {
            FireOutcome::CoolingDown | FireOutcome::NotOwned => {}
            FireOutcome::Empty => self.motion.emit(BodyEffect::Sound(SoundCue::WeaponEmpty)),
            FireOutcome::Fired => match kind {
                WeaponKind::Rocket => {
                    self.motion.emit(BodyEffect::Sound(SoundCue::RocketLaunch));
                    self.emit_shot(kind);
                }
                WeaponKind::Plasma => {
                    self.motion.emit(BodyEffect::Sound(SoundCue::Plasma));
                    let center = self.motion.center();
                    if self.motion.any_direction_held()
                        && point_in_tagged(center, nearby, ColliderTag::Wall)
                    {
                        self.plasma_climb(center);
                    } else {
                        self.emit_shot(kind);
                    }
                }
            },
        }
    }

    fn plasma_climb(&mut self, center: Vec2) {
        self.raise(MovementEvent::Plasma);
        let i = self.motion.intents;
        let dv = self.motion.tuning.weapons.climb_impulse(
            i.left,
            i.right,
            i.up,
            i.down,
            self.motion.velocity.y,
        );
        self.motion.velocity += dv;
        self.motion.emit(BodyEffect::Decal(DecalRequest {
            kind: DecalKind::PlasmaScorch,
            position: center,
        }));
    }

    fn emit_shot(&mut self, weapon: WeaponKind) {
        let aim = if self.motion.intents.down {
            Vec2::Y
        } else {
            Vec2::new(self.motion.direction, 0.0)
        };
        self.motion.emit(BodyEffect::Shot(ShotFired {
            weapon,
            origin: self.motion.center(),
            aim,
        }));
    }
}
