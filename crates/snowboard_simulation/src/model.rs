//! Snowboard - модель доски для хоста
//!
//! Связывает user-параметры, input и физику:
//! каждый update параметры заново выводятся из ModelParameters (live tuning),
//! прыжок применяется до variable-rate шага, turning превращается в tilt.

use bevy::prelude::*;

use crate::board::{assess_landing, BoardPhysics, Contact, ContactEvent, LandingOutcome};
use crate::config::{derive, ModelParameters, PhysicsParameters};
use crate::input::{shape_tilt, BoardInput};
use crate::terrain::TerrainQuery;

#[derive(Debug, Clone)]
pub struct Snowboard {
    model: ModelParameters,
    physics: BoardPhysics,
}

impl Snowboard {
    pub fn new(position: Vec3, rotation: Quat, model: ModelParameters) -> Self {
        let parameters = derive(&model);

        Self {
            model,
            physics: BoardPhysics::new(position, rotation, parameters),
        }
    }

    pub fn model_parameters(&self) -> &ModelParameters {
        &self.model
    }

    /// Изменения вступают в силу со следующего update
    pub fn model_parameters_mut(&mut self) -> &mut ModelParameters {
        &mut self.model
    }

    pub fn physics(&self) -> &BoardPhysics {
        &self.physics
    }

    pub fn physics_parameters(&self) -> &PhysicsParameters {
        self.physics.parameters()
    }

    pub fn position(&self) -> Vec3 {
        self.physics.position()
    }

    pub fn rotation(&self) -> Quat {
        self.physics.rotation()
    }

    pub fn velocity(&self) -> Vec3 {
        self.physics.velocity()
    }

    pub fn contact(&self) -> Contact {
        self.physics.contact()
    }

    /// Variable-rate шаг (каждый кадр)
    pub fn update(&mut self, terrain: &dyn TerrainQuery, input: &dyn BoardInput, dt: f32) {
        self.physics.set_parameters(derive(&self.model));

        if input.jump() {
            self.physics.jump();
        }

        let tilt = shape_tilt(input.turning(), self.physics.parameters().input_sensitivity);
        self.physics.update(terrain, tilt, input.speeding(), dt);
    }

    /// Fixed-rate шаг
    pub fn fixed_update(&mut self, dt: f32) {
        self.physics.fixed_update(dt);
    }

    pub fn reset(&mut self, position: Vec3, rotation: Quat, speed: f32) {
        self.physics.reset(position, rotation, speed);
    }

    /// Reset в текущей позе с нулевой скоростью
    pub fn reset_in_place(&mut self) {
        let (position, rotation) = (self.physics.position(), self.physics.rotation());
        self.physics.reset(position, rotation, 0.0);
    }

    /// Финиш: input больше не влияет, доска тормозит до остановки
    pub fn stop(&mut self) {
        self.physics.finish();
    }

    pub fn drain_events(&mut self) -> Vec<ContactEvent> {
        self.physics.drain_events()
    }

    /// Оценка приземления по delta скорости из ContactEvent::Found
    pub fn assess_landing(&self, velocity_delta: Vec3) -> LandingOutcome {
        assess_landing(
            self.physics.velocity(),
            self.physics.forward(),
            self.physics.up(),
            velocity_delta,
            self.physics.parameters(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::BoardCommand;
    use crate::terrain::PlaneTerrain;

    const DT: f32 = 1.0 / 60.0;

    fn grounded() -> (Snowboard, PlaneTerrain) {
        let terrain = PlaneTerrain::horizontal(0.0);
        let mut snowboard = Snowboard::new(Vec3::ZERO, Quat::IDENTITY, ModelParameters::default());
        snowboard.reset(Vec3::ZERO, Quat::IDENTITY, 0.0);
        snowboard.update(&terrain, &BoardCommand::default(), DT);
        snowboard.drain_events();
        (snowboard, terrain)
    }

    #[test]
    fn test_parameters_are_derived_every_update() {
        let (mut snowboard, terrain) = grounded();

        snowboard.model_parameters_mut().turn_abruptness = 0.0;
        assert!((snowboard.physics_parameters().sidecut_radius - 50.0).abs() > 1e-3);

        snowboard.update(&terrain, &BoardCommand::default(), DT);
        assert!((snowboard.physics_parameters().sidecut_radius - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_jump_is_applied_before_update() {
        let (mut snowboard, terrain) = grounded();
        assert_eq!(snowboard.contact(), Contact::Full);

        let jump = BoardCommand {
            jump: true,
            ..Default::default()
        };
        let before = snowboard.velocity();
        let up = snowboard.physics().up();
        snowboard.update(&terrain, &jump, DT);

        assert_eq!(snowboard.contact(), Contact::None);
        let jump_velocity = snowboard.physics_parameters().jump_velocity;
        assert!((snowboard.velocity() - before - up * jump_velocity).length() < 1e-6);
        assert_eq!(snowboard.drain_events(), vec![ContactEvent::Lost]);
    }

    #[test]
    fn test_turning_input_becomes_tilt() {
        let (mut snowboard, terrain) = grounded();

        let command = BoardCommand {
            turning: 1.0,
            ..Default::default()
        };
        snowboard.update(&terrain, &command, DT);

        assert!((snowboard.physics().tilt() - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_reset_in_place_keeps_pose() {
        let (mut snowboard, terrain) = grounded();
        snowboard.reset(Vec3::new(0.0, 0.0, 2.0), Quat::from_rotation_y(0.5), 6.0);
        snowboard.update(&terrain, &BoardCommand::default(), DT);

        let (position, rotation) = (snowboard.position(), snowboard.rotation());
        snowboard.reset_in_place();

        assert_eq!(snowboard.position(), position);
        assert_eq!(snowboard.rotation(), rotation);
        assert_eq!(snowboard.velocity(), Vec3::ZERO);
        assert_eq!(snowboard.contact(), Contact::None);
    }

    #[test]
    fn test_landing_assessment_uses_board_axes() {
        let (mut snowboard, _) = grounded();
        snowboard.reset(Vec3::ZERO, Quat::IDENTITY, 5.0);

        assert!(snowboard.assess_landing(Vec3::Y).is_safe());
        assert!(!snowboard.assess_landing(Vec3::Y * 50.0).is_safe());
    }
}
