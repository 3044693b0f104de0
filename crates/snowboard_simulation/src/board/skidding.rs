//! Skid relaxation: доворот доски к скорости / к линии падения
//!
//! Source - угол между направлением (скорость или её смесь с линией падения) и
//! forward, со знаком относительно нормали склона. Target зависит от режима:
//! - торможение: ±90° (доска поперёк склона)
//! - turning down: 0° (нос к направлению движения)
//! - иначе: source (ничего не делаем)
//!
//! Угловая скорость: max_rate · sign(Δ) · clamp(Δ/45, −1, 1)².

use bevy::prelude::*;

use super::MIN_SIGNIFICANT_SPEED_SQR;
use crate::config::PhysicsParameters;
use crate::math::{angle_deg, lerp_vec, sign};

/// Разница углов, на которой доворот идёт с максимальной скоростью (градусы)
const FULL_RATE_DELTA: f32 = 45.0;

/// |v|², при котором направление торможения полностью определяется скоростью
const SLOWING_DIRECTION_SPEED_SQR: f32 = 50.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SkidState {
    pub source_angle: f32,
    pub target_angle: f32,
    pub delta_angle: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct SkidInputs {
    pub velocity: Vec3,
    pub forward: Vec3,
    pub slope_normal: Vec3,
    pub slope_vector: Vec3,
    pub is_slowing_down: bool,
    pub is_turning_down: bool,
}

/// Угол от `direction` до `forward` со знаком по нормали склона
pub fn signed_angle_to_forward(direction: Vec3, forward: Vec3, slope_normal: Vec3) -> f32 {
    angle_deg(direction, forward) * sign(slope_normal.dot(direction.cross(forward)))
}

/// Возвращает углы и angle-snapping угловую скорость (рад/с)
pub fn relax(inputs: &SkidInputs, parameters: &PhysicsParameters) -> (SkidState, f32) {
    let speed_sqr = inputs.velocity.length_squared();

    let (source_angle, target_angle, max_rate) = if inputs.is_slowing_down {
        let weight = (speed_sqr / SLOWING_DIRECTION_SPEED_SQR).clamp(0.0, 1.0);
        let direction = lerp_vec(inputs.slope_vector, inputs.velocity, weight);
        let source = signed_angle_to_forward(direction, inputs.forward, inputs.slope_normal);

        (source, 90.0 * sign(source), parameters.slowing_down_angular_velocity)
    } else {
        let source = signed_angle_to_forward(inputs.velocity, inputs.forward, inputs.slope_normal);
        let target = if inputs.is_turning_down { 0.0 } else { source };

        (source, target, parameters.rotate_to_slope_angular_velocity)
    };

    let delta_angle = if speed_sqr < MIN_SIGNIFICANT_SPEED_SQR {
        0.0
    } else {
        target_angle - source_angle
    };

    let ratio = (delta_angle / FULL_RATE_DELTA).clamp(-1.0, 1.0);
    let angular_velocity = (max_rate * sign(delta_angle) * ratio * ratio).to_radians();

    (
        SkidState {
            source_angle,
            target_angle,
            delta_angle,
        },
        angular_velocity,
    )
}
