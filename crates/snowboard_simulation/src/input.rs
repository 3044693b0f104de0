//! Управление доской
//!
//! Хост реализует `BoardInput` (клавиатура, геймпад, AI, replay). Для ECS -
//! компонент `BoardCommand`, в headless тестах заполняется напрямую.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::board::MAX_TILT;
use crate::math::sign;

/// Источник команд для одной доски
pub trait BoardInput {
    /// [-1, 1]: 1 - поворот вправо, -1 - влево
    fn turning(&self) -> f32;

    /// [-1, 1]: -1 - тормозить изо всех сил, 1 - развернуться по линии падения
    fn speeding(&self) -> f32;

    /// Прыжок в текущем кадре
    fn jump(&self) -> bool;
}

/// Команды доски на текущий кадр (ECS-форма BoardInput)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct BoardCommand {
    pub turning: f32,
    pub speeding: f32,
    pub jump: bool,
}

impl BoardInput for BoardCommand {
    fn turning(&self) -> f32 {
        self.turning
    }

    fn speeding(&self) -> f32 {
        self.speeding
    }

    fn jump(&self) -> bool {
        self.jump
    }
}

/// Turning → tilt (градусы): MAX_TILT · |turn|^(1/sensitivity) · sign(turn)
///
/// sensitivity < 1 делает центр стика мягче, края - резче.
pub fn shape_tilt(turning: f32, input_sensitivity: f32) -> f32 {
    let exponent = 1.0 / input_sensitivity.max(f32::EPSILON);
    MAX_TILT * turning.abs().powf(exponent) * sign(turning)
}
