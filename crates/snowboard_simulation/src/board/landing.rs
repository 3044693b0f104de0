//! Оценка приземления (для хоста: падение райдера)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::PhysicsParameters;
use crate::math::{angle_deg, project_on_plane};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LandingOutcome {
    Safe,
    /// Горизонтальная скорость слишком далеко от оси доски (в обе стороны)
    UnsafeAngle { angle: f32 },
    /// Слишком резкое изменение скорости при касании
    UnsafeSpeed { impact: f32 },
}

impl LandingOutcome {
    pub fn is_safe(&self) -> bool {
        matches!(self, LandingOutcome::Safe)
    }
}

/// Оценить приземление по скорости после касания и ContactFound delta
///
/// Скорость проецируется на плоскость доски (по её up). Лимиты бесконечные,
/// если в ModelParameters проверка выключена.
pub fn assess_landing(
    velocity: Vec3,
    forward: Vec3,
    up: Vec3,
    velocity_delta: Vec3,
    parameters: &PhysicsParameters,
) -> LandingOutcome {
    let planar = project_on_plane(velocity, up);
    let to_nose = angle_deg(planar, forward);
    let to_tail = angle_deg(planar, -forward);

    if to_nose > parameters.max_landing_angle && to_tail > parameters.max_landing_angle {
        return LandingOutcome::UnsafeAngle {
            angle: to_nose.min(to_tail),
        };
    }

    let impact = velocity_delta.length();
    if impact > parameters.speed_of_fall {
        return LandingOutcome::UnsafeSpeed { impact };
    }

    LandingOutcome::Safe
}
