//! BoardPhysics - интегратор состояния одной доски
//!
//! Два входа с разными частотами:
//! - `update(terrain, tilt, ratio, dt)` - variable rate: сэмплинг склона,
//!   классификация контакта, transform (position/rotation)
//! - `fixed_update(dt)` - fixed rate: силы, интегрирование скорости, skid relaxation
//!
//! Контакт отслеживается только в `update`; прыжок выключает сэмплинг контакта на
//! `JUMP_CONTACT_GRACE` секунд через собственный `Scheduler`.

use bevy::prelude::*;

use super::contact::{classify, landing_damping, Contact, ContactTracker, ContactTransition};
use super::events::{ContactEvent, ContactEvents};
use super::forces::{self, ForceState};
use super::skidding::{self, SkidInputs, SkidState};
use super::{JUMP_CONTACT_GRACE, MAX_TILT, MIN_DYNAMIC_SPEED_SQR, MIN_SIGNIFICANT_SPEED_SQR};
use crate::config::PhysicsParameters;
use crate::logger::{log, log_info};
use crate::math::{angle_deg, lerp, project_on_plane, sign};
use crate::scheduler::Scheduler;
use crate::terrain::{RaycastHit, SlopeFrame, SlopeSampler, TerrainQuery};

/// Порог speed input для turning down / slowing down
const SPEED_INPUT_THRESHOLD: f32 = 0.95;

/// Скорость, с которой визуальный наклон торможения догоняет цель (за update)
const SLOWING_DOWN_TILT_RATE: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeferredAction {
    RestoreContactSampling,
}

#[derive(Debug, Clone)]
pub struct BoardPhysics {
    parameters: PhysicsParameters,

    position: Vec3,
    rotation: Quat,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    velocity: Vec3,
    /// position + velocity·dt текущего update (там сэмплится склон и tip'ы)
    calculated_position: Vec3,

    slope: SlopeFrame,
    contact: ContactTracker,
    front_hit: Option<RaycastHit>,
    rear_hit: Option<RaycastHit>,

    /// φ, градусы (со знаком направления движения)
    tilt: f32,
    rotation_ratio: f32,
    last_direction_sign: f32,
    max_slowing_down_tilt: f32,

    is_turning_down: bool,
    is_slowing_down: bool,
    is_finished: bool,
    contact_sampling_enabled: bool,

    edge_friction_static: bool,
    snow_friction_static: bool,

    // рад/с
    angle_snapping_angular_velocity: f32,
    carving_angular_velocity: f32,
    angular_velocity_on_contact_lost: f32,

    skid: SkidState,

    scheduler: Scheduler<DeferredAction>,
    events: ContactEvents,
}

impl BoardPhysics {
    pub fn new(position: Vec3, rotation: Quat, parameters: PhysicsParameters) -> Self {
        let mut physics = Self {
            parameters,
            position,
            rotation,
            forward: Vec3::Z,
            right: Vec3::X,
            up: Vec3::Y,
            velocity: Vec3::ZERO,
            calculated_position: position,
            slope: SlopeFrame::untracked(),
            contact: ContactTracker::default(),
            front_hit: None,
            rear_hit: None,
            tilt: 0.0,
            rotation_ratio: 0.0,
            last_direction_sign: 1.0,
            max_slowing_down_tilt: 0.0,
            is_turning_down: false,
            is_slowing_down: false,
            is_finished: false,
            contact_sampling_enabled: true,
            edge_friction_static: false,
            snow_friction_static: false,
            angle_snapping_angular_velocity: 0.0,
            carving_angular_velocity: 0.0,
            angular_velocity_on_contact_lost: 0.0,
            skid: SkidState::default(),
            scheduler: Scheduler::new(),
            events: ContactEvents::default(),
        };

        physics.refresh_basis();
        physics
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn parameters(&self) -> &PhysicsParameters {
        &self.parameters
    }

    /// Live tuning: вступает в силу со следующего update/fixed_update
    pub fn set_parameters(&mut self, parameters: PhysicsParameters) {
        self.parameters = parameters;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn contact(&self) -> Contact {
        self.contact.current
    }

    pub fn slope(&self) -> &SlopeFrame {
        &self.slope
    }

    pub fn slope_normal(&self) -> Vec3 {
        self.slope.normal
    }

    pub fn front_hit(&self) -> Option<RaycastHit> {
        self.front_hit
    }

    pub fn rear_hit(&self) -> Option<RaycastHit> {
        self.rear_hit
    }

    pub fn tilt(&self) -> f32 {
        self.tilt
    }

    pub fn skid(&self) -> SkidState {
        self.skid
    }

    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    pub fn is_contact_sampling_enabled(&self) -> bool {
        self.contact_sampling_enabled
    }

    /// Угловая скорость вокруг вертикали, рад/с
    ///
    /// На земле: angle snapping + carving. В воздухе: вращение от tilt плюс
    /// угловая скорость, с которой доска оторвалась от земли.
    pub fn angular_velocity(&self) -> f32 {
        if self.contact.current.is_grounded() {
            self.angle_snapping_angular_velocity + self.carving_angular_velocity
        } else {
            self.tilt / MAX_TILT * self.parameters.rotation_in_air_angular_velocity.to_radians()
                + self.angular_velocity_on_contact_lost
        }
    }

    /// Забрать события контакта, накопленные с прошлого вызова
    ///
    /// Хост дренирует каждый кадр; иначе сверх `MAX_PENDING_EVENTS` старые события теряются.
    pub fn drain_events(&mut self) -> Vec<ContactEvent> {
        self.events.drain()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    // ========================================================================
    // Commands
    // ========================================================================

    /// Переинициализация кинематики. Не зависит от предыдущего состояния.
    pub fn reset(&mut self, position: Vec3, rotation: Quat, speed: f32) {
        self.position = position;
        self.rotation = rotation;
        self.refresh_basis();

        self.calculated_position = position;
        self.velocity = self.forward * speed;

        self.angle_snapping_angular_velocity = 0.0;
        self.carving_angular_velocity = 0.0;
        self.angular_velocity_on_contact_lost = 0.0;

        self.tilt = 0.0;
        self.rotation_ratio = 0.0;
        self.max_slowing_down_tilt = 0.0;
        self.last_direction_sign = 1.0;
        self.is_turning_down = false;
        self.is_slowing_down = false;
        self.edge_friction_static = false;
        self.snow_friction_static = false;
        self.skid = SkidState::default();
        self.slope = SlopeFrame::untracked();

        self.set_contact(Contact::None);
        self.is_finished = false;

        self.scheduler.clear();
        self.contact_sampling_enabled = true;

        log_info(&format!(
            "Board reset at ({:.2}, {:.2}, {:.2}), speed {:.2}",
            position.x, position.y, position.z, speed
        ));
    }

    /// Пассивное торможение до остановки: input игнорируется
    pub fn finish(&mut self) {
        if !self.is_finished {
            log_info("Board finished, braking");
        }
        self.is_finished = true;
    }

    /// Прыжок (только с земли). Контакт не сэмплится JUMP_CONTACT_GRACE секунд.
    pub fn jump(&mut self) {
        if !self.contact.current.is_grounded() {
            return;
        }

        self.set_contact(Contact::None);
        self.velocity += self.up * self.parameters.jump_velocity;

        self.contact_sampling_enabled = false;
        self.scheduler.after(JUMP_CONTACT_GRACE, DeferredAction::RestoreContactSampling);

        self.on_contact_lost();

        log_info(&format!("Board jump, velocity {:.2}", self.velocity.length()));
    }

    // ========================================================================
    // Variable rate
    // ========================================================================

    /// `tilt` - градусы [-MAX_TILT, MAX_TILT], `rotation_ratio` - speed input [-1, 1]
    pub fn update(&mut self, terrain: &dyn TerrainQuery, tilt: f32, rotation_ratio: f32, dt: f32) {
        for action in self.scheduler.advance(dt) {
            match action {
                DeferredAction::RestoreContactSampling => self.contact_sampling_enabled = true,
            }
        }

        self.refresh_basis();

        let (tilt, rotation_ratio) = if self.is_finished { (0.0, 0.0) } else { (tilt, rotation_ratio) };

        self.tilt = tilt * self.last_direction_sign;
        self.rotation_ratio = rotation_ratio;

        self.is_turning_down = rotation_ratio > SPEED_INPUT_THRESHOLD;
        self.is_slowing_down = self.is_finished || rotation_ratio < -SPEED_INPUT_THRESHOLD;

        let target_tilt = if self.is_slowing_down { MAX_TILT } else { 0.0 };
        self.max_slowing_down_tilt = lerp(self.max_slowing_down_tilt, target_tilt, SLOWING_DOWN_TILT_RATE);

        self.calculated_position = self.position + self.velocity * dt;

        self.update_slope(terrain);

        if self.contact_sampling_enabled {
            self.update_contact(terrain);
        }

        self.update_transform(dt);
    }

    fn refresh_basis(&mut self) {
        self.forward = self.rotation * Vec3::Z;
        self.right = self.rotation * Vec3::X;
        self.up = self.rotation * Vec3::Y;
    }

    fn front_point(&self) -> Vec3 {
        self.calculated_position + self.forward * self.parameters.tip_offset()
    }

    fn rear_point(&self) -> Vec3 {
        self.calculated_position - self.forward * self.parameters.tip_offset()
    }

    fn update_slope(&mut self, terrain: &dyn TerrainQuery) {
        let sampler = SlopeSampler::new(terrain, &self.parameters);

        self.slope = sampler
            .sample(self.calculated_position, self.forward, self.right)
            .unwrap_or_else(SlopeFrame::untracked);
    }

    fn set_contact(&mut self, contact: Contact) {
        self.contact.set(contact);

        if contact == Contact::None {
            self.front_hit = None;
            self.rear_hit = None;
        }
    }

    fn update_contact(&mut self, terrain: &dyn TerrainQuery) {
        let sample = classify(
            terrain,
            self.front_point(),
            self.rear_point(),
            self.parameters.takeoff_limit,
            self.parameters.terrain_layers,
        );

        self.front_hit = sample.front_hit;
        self.rear_hit = sample.rear_hit;
        self.set_contact(sample.contact);

        let last_velocity = self.velocity;

        if self.contact.current == Contact::Full {
            self.velocity = project_on_plane(self.velocity, self.slope.normal);
        }

        match self.contact.transition() {
            Some(ContactTransition::Found) => self.on_contact_found(last_velocity),
            Some(ContactTransition::Lost) => self.on_contact_lost(),
            None => {}
        }

        if self.contact.previous != self.contact.current {
            log(&format!("Contact {:?} → {:?}", self.contact.previous, self.contact.current));
        }
    }

    fn on_contact_found(&mut self, last_velocity: Vec3) {
        let coefficient = landing_damping(
            last_velocity,
            self.velocity,
            self.parameters.velocity_drop_on_contact_coefficient,
        );

        self.velocity *= coefficient;
        self.angle_snapping_angular_velocity *= coefficient;

        self.events.push(ContactEvent::Found {
            velocity_delta: self.velocity - last_velocity,
        });
    }

    fn on_contact_lost(&mut self) {
        self.angular_velocity_on_contact_lost = self.angle_snapping_angular_velocity + self.carving_angular_velocity;
        self.events.push(ContactEvent::Lost);
    }

    fn update_transform(&mut self, dt: f32) {
        let front = self.front_hit.map(|hit| hit.point).unwrap_or_else(|| self.front_point());
        let rear = self.rear_hit.map(|hit| hit.point).unwrap_or_else(|| self.rear_point());

        self.position = (front + rear) / 2.0;

        let delta_rotation = self.angular_velocity() * dt;

        if !self.contact.current.is_grounded() {
            // В воздухе: вращение вокруг мировой вертикали
            self.rotation = (Quat::from_rotation_y(delta_rotation) * self.rotation).normalize();
            return;
        }

        let along = front - rear;
        let length = along.length();
        let pitch = if length > f32::EPSILON {
            -(along.y / length).clamp(-1.0, 1.0).asin()
        } else {
            0.0
        };
        let yaw = along.x.atan2(along.z) + delta_rotation;

        let tilt = if self.is_slowing_down {
            sign(self.right.dot(-self.velocity))
                * self.max_slowing_down_tilt
                * (self.velocity.length_squared() / 100.0).clamp(0.0, 1.0)
        } else {
            self.tilt
        };

        let surface_vector = self.slope.normal.cross(self.forward) * sign(self.forward.dot(self.slope.equipotential));
        let max_surface_tilt = angle_deg(Vec3::Y, surface_vector) / 2.0;
        let visual = forces::visual_tilt(tilt, max_surface_tilt, self.velocity.length_squared());

        self.rotation = Quat::from_euler(EulerRot::YXZ, yaw, pitch, (-visual).to_radians());
    }

    // ========================================================================
    // Fixed rate
    // ========================================================================

    pub fn fixed_update(&mut self, dt: f32) {
        if project_on_plane(self.velocity, self.slope.normal).length_squared() >= MIN_SIGNIFICANT_SPEED_SQR
            && self.contact.current.is_grounded()
        {
            self.last_direction_sign =
                forces::unidirectionality_sign(self.velocity, self.forward, self.parameters.invert_input_backwards);
        }

        self.angle_snapping_angular_velocity = 0.0;

        self.update_forces(dt);
        self.update_skidding();
    }

    fn update_forces(&mut self, dt: f32) {
        let output = forces::calculate_force(
            &ForceState {
                slope: &self.slope,
                tilt: self.tilt,
                rotation_ratio: self.rotation_ratio,
                velocity: self.velocity,
                forward: self.forward,
                right: self.right,
                contact: self.contact.current,
                direction_sign: self.last_direction_sign,
                is_slowing_down: self.is_slowing_down,
                edge_friction_static: self.edge_friction_static,
                snow_friction_static: self.snow_friction_static,
            },
            &self.parameters,
        );
        self.carving_angular_velocity = output.carving_angular_velocity;

        let drag = forces::air_resistance(self.velocity, &self.parameters);
        let mass = self.parameters.rider_mass.max(f32::EPSILON);

        let delta_velocity = forces::limit_overshoot((output.force + drag) / mass * dt, self.velocity);
        self.velocity += delta_velocity;

        self.snow_friction_static = self.velocity.length_squared() < MIN_DYNAMIC_SPEED_SQR;
        if self.snow_friction_static {
            self.velocity = Vec3::ZERO;
        }

        if self.contact.current != Contact::Full {
            return;
        }

        self.edge_friction_static = forces::edge_friction_static(
            self.edge_friction_static,
            self.velocity,
            self.forward,
            self.right,
            self.slope.normal,
        );

        if self.is_slowing_down {
            self.velocity *= self.parameters.velocity_per_tick_drop_on_slowing_down;
        } else {
            self.velocity = forces::carve_blend(self.velocity, self.forward, self.angular_velocity(), &self.parameters);
        }
    }

    fn update_skidding(&mut self) {
        if self.contact.current != Contact::Full {
            self.skid = SkidState::default();
            return;
        }

        let (skid, angular_velocity) = skidding::relax(
            &SkidInputs {
                velocity: self.velocity,
                forward: self.forward,
                slope_normal: self.slope.normal,
                slope_vector: self.slope.slope_vector,
                is_slowing_down: self.is_slowing_down,
                is_turning_down: self.is_turning_down,
            },
            &self.parameters,
        );

        self.skid = skid;
        self.angle_snapping_angular_velocity = angular_velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::GRAVITY;
    use crate::terrain::{EmptyTerrain, PlaneTerrain};

    const DT: f32 = 1.0 / 60.0;

    fn grounded_board(parameters: PhysicsParameters, speed: f32) -> (BoardPhysics, PlaneTerrain) {
        let terrain = PlaneTerrain::horizontal(0.0);
        let mut physics = BoardPhysics::new(Vec3::ZERO, Quat::IDENTITY, parameters);
        physics.reset(Vec3::ZERO, Quat::IDENTITY, speed);
        physics.update(&terrain, 0.0, 0.0, DT);
        physics.drain_events();
        (physics, terrain)
    }

    #[test]
    fn test_reset_is_independent_of_prior_state() {
        let terrain = PlaneTerrain::slope(20.0);
        let mut physics = BoardPhysics::new(Vec3::new(0.0, 0.0, 0.0), Quat::IDENTITY, PhysicsParameters::default());

        for _ in 0..30 {
            physics.update(&terrain, 40.0, 0.5, DT);
            physics.fixed_update(DT);
        }

        let rotation = Quat::from_rotation_y(1.0);
        physics.reset(Vec3::new(5.0, 3.0, 1.0), rotation, 7.0);

        assert_eq!(physics.contact(), Contact::None);
        assert!((physics.velocity() - rotation * Vec3::Z * 7.0).length() < 1e-5);
        assert_eq!(physics.angular_velocity(), 0.0);
        assert!(physics.front_hit().is_none());
        assert!(physics.rear_hit().is_none());
        assert!(physics.is_contact_sampling_enabled());
    }

    #[test]
    fn test_jump_in_air_is_noop() {
        let mut physics = BoardPhysics::new(Vec3::Y * 10.0, Quat::IDENTITY, PhysicsParameters::default());
        physics.reset(Vec3::Y * 10.0, Quat::IDENTITY, 2.0);

        let velocity = physics.velocity();
        physics.jump();

        assert_eq!(physics.velocity(), velocity);
        assert_eq!(physics.contact(), Contact::None);
        assert!(physics.is_contact_sampling_enabled());
        assert_eq!(physics.pending_events(), 0);
    }

    #[test]
    fn test_jump_grace_window() {
        let parameters = PhysicsParameters {
            jump_velocity: 0.0,
            ..Default::default()
        };
        let (mut physics, terrain) = grounded_board(parameters, 0.0);
        assert_eq!(physics.contact(), Contact::Full);

        physics.jump();
        assert_eq!(physics.contact(), Contact::None);
        assert_eq!(physics.drain_events(), vec![ContactEvent::Lost]);

        // Земля прямо под доской, но контакт не сэмплится
        let mut elapsed = 0.0;
        while elapsed + DT < JUMP_CONTACT_GRACE - 1e-3 {
            physics.update(&terrain, 0.0, 0.0, DT);
            elapsed += DT;
            assert_eq!(physics.contact(), Contact::None);
            assert!(!physics.is_contact_sampling_enabled());
        }

        for _ in 0..3 {
            physics.update(&terrain, 0.0, 0.0, DT);
        }

        assert_eq!(physics.contact(), Contact::Full);
        let events = physics.drain_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], ContactEvent::Found { .. }));
    }

    #[test]
    fn test_jump_adds_jump_velocity_along_up() {
        let parameters = PhysicsParameters {
            jump_velocity: 4.0,
            ..Default::default()
        };
        let (mut physics, _) = grounded_board(parameters, 3.0);
        assert_eq!(physics.contact(), Contact::Full);

        let before = physics.velocity();
        let up = physics.up();
        physics.jump();

        assert_eq!(physics.contact(), Contact::None);
        assert!((physics.velocity() - before - up * 4.0).length() < 1e-6);
        assert!(!physics.is_contact_sampling_enabled());
    }

    #[test]
    fn test_one_tick_does_not_add_speed_on_flat() {
        let parameters = PhysicsParameters::default();
        let terrain = PlaneTerrain::horizontal(0.0);
        let mut physics = BoardPhysics::new(Vec3::ZERO, Quat::IDENTITY, parameters);

        physics.reset(Vec3::ZERO, Quat::IDENTITY, 5.0);
        physics.update(&terrain, 0.0, 0.0, DT);
        assert_eq!(physics.contact(), Contact::Full);

        physics.fixed_update(DT);
        assert!(physics.velocity().length() <= 5.0);
    }

    #[test]
    fn test_speed_is_conserved_without_losses() {
        let parameters = PhysicsParameters {
            air_density: 0.0,
            edge_static_friction: 0.0,
            edge_dynamic_friction: 0.0,
            snow_static_friction: 0.0,
            snow_dynamic_friction: 0.0,
            boost: 0.0,
            ..Default::default()
        };
        let (mut physics, terrain) = grounded_board(parameters, 6.0);
        assert_eq!(physics.contact(), Contact::Full);

        let speed = physics.velocity().length();
        assert!(speed > 0.0);

        for _ in 0..120 {
            physics.fixed_update(DT);
            physics.update(&terrain, 0.0, 0.0, DT);
            assert!((physics.velocity().length() - speed).abs() < 1e-3);
            assert_eq!(physics.contact(), Contact::Full);
        }
    }

    #[test]
    fn test_falling_board_lands_exactly_once() {
        let terrain = PlaneTerrain::horizontal(0.0);
        let mut physics = BoardPhysics::new(Vec3::Y * 3.0, Quat::IDENTITY, PhysicsParameters::default());
        physics.reset(Vec3::Y * 3.0, Quat::IDENTITY, 0.0);
        let takeoff_limit = physics.parameters().takeoff_limit;

        let mut found = 0;
        let mut lost = 0;
        let mut first_touch_tick = None;
        let mut landing_tick = None;
        let mut before_landing = Vec3::ZERO;

        for tick in 0..240 {
            let velocity = physics.velocity();

            // В воздухе доска не вращается: оба tip'а на высоте прогнозной позиции
            let tip_gap = (physics.position() + velocity * DT).y;
            if first_touch_tick.is_none() && tip_gap <= takeoff_limit {
                first_touch_tick = Some(tick);
            }

            physics.update(&terrain, 0.0, 0.0, DT);

            for event in physics.drain_events() {
                match event {
                    ContactEvent::Found { velocity_delta } => {
                        found += 1;
                        landing_tick = Some(tick);
                        before_landing = velocity;
                        assert_eq!(velocity_delta, physics.velocity() - velocity);
                        assert!(velocity_delta.y > 0.0);
                    }
                    ContactEvent::Lost => lost += 1,
                }
            }

            physics.fixed_update(DT);
        }

        assert_eq!(found, 1);
        assert_eq!(lost, 0);
        assert!(landing_tick.is_some());
        assert_eq!(landing_tick, first_touch_tick);
        assert!(before_landing.y < 0.0);
        assert_eq!(physics.contact(), Contact::Full);
        assert!(physics.position().y.abs() < 1e-3);
    }

    #[test]
    fn test_board_accelerates_down_the_slope() {
        let terrain = PlaneTerrain::slope(20.0);
        let mut physics = BoardPhysics::new(Vec3::ZERO, Quat::IDENTITY, PhysicsParameters::default());
        physics.reset(Vec3::ZERO, Quat::IDENTITY, 1.0);

        for _ in 0..60 {
            physics.update(&terrain, 0.0, 0.0, DT);
            physics.fixed_update(DT);
        }

        assert!(physics.contact().is_grounded());
        assert!(physics.velocity().length() > 3.0);
        assert!(physics.position().z > 0.0);
        assert!(physics.position().y < 0.0);
    }

    #[test]
    fn test_free_fall_without_terrain() {
        let terrain = EmptyTerrain;
        let mut physics = BoardPhysics::new(Vec3::ZERO, Quat::IDENTITY, PhysicsParameters::default());
        physics.reset(Vec3::ZERO, Quat::IDENTITY, 0.0);

        physics.update(&terrain, 0.0, 0.0, DT);
        physics.fixed_update(DT);

        assert_eq!(physics.contact(), Contact::None);
        assert!(!physics.slope().is_tracked());
        assert!((physics.velocity().y + GRAVITY * DT).abs() < 1e-4);
    }

    #[test]
    fn test_finished_board_stops() {
        let (mut physics, terrain) = grounded_board(PhysicsParameters::default(), 8.0);
        physics.finish();

        for _ in 0..600 {
            physics.update(&terrain, 60.0, 1.0, DT);
            physics.fixed_update(DT);
        }

        assert!(physics.is_finished());
        assert_eq!(physics.tilt(), 0.0);
        assert!(physics.velocity().length() < 0.1);
    }

    #[test]
    fn test_in_air_spin_follows_tilt() {
        let parameters = PhysicsParameters {
            rotation_in_air_angular_velocity: 360.0,
            ..Default::default()
        };
        let terrain = EmptyTerrain;
        let mut physics = BoardPhysics::new(Vec3::ZERO, Quat::IDENTITY, parameters);
        physics.reset(Vec3::ZERO, Quat::IDENTITY, 0.0);

        physics.update(&terrain, 30.0, 0.0, DT);

        // 30/60 · 360°/s = 180°/s
        assert!((physics.angular_velocity() - std::f32::consts::PI).abs() < 1e-4);
        let (yaw, _, _) = physics.rotation().to_euler(EulerRot::YXZ);
        assert!((yaw - std::f32::consts::PI * DT).abs() < 1e-4);
    }
}
