//! User-facing параметры модели (sliders)
//!
//! Большинство значений нормализованы в [0, 1] и превращаются в физические
//! коэффициенты через `derive` (см. config/mod.rs). Хранятся в пресетах (JSON).

use serde::{Deserialize, Serialize};

use crate::error::ParameterError;
use crate::logger::log_warning;
use crate::terrain::LayerMask;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParameters {
    /// Слои, по которым бьют лучи террейна
    pub terrain_layers: LayerMask,

    pub rotate_in_air: bool,
    /// Градусы/сек при полном наклоне в воздухе
    pub in_air_rotation_angular_velocity: f32,

    /// Инвертировать поворот при езде задом наперёд
    pub invert_input_backwards: bool,

    pub fall_on_unsafe_landing_angle: bool,
    /// Градусы
    pub max_safe_landing_angle: f32,

    pub fall_on_unsafe_landing_speed: bool,
    /// м/с (модуль изменения скорости при приземлении)
    pub max_safe_landing_speed: f32,

    // Нормализованные sliders [0, 1]
    pub turn_abruptness: f32,
    pub turn_to_slope_rate: f32,
    pub slowing_down_rate: f32,
    pub friction: f32,
    pub slipping: f32,
    pub air_resistance: f32,
    pub contact_offset: f32,

    /// Метры
    pub board_length: f32,
    pub board_width: f32,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            terrain_layers: LayerMask::ALL,
            rotate_in_air: true,
            in_air_rotation_angular_velocity: 360.0,
            invert_input_backwards: false,
            fall_on_unsafe_landing_angle: true,
            max_safe_landing_angle: 60.0,
            fall_on_unsafe_landing_speed: true,
            max_safe_landing_speed: 20.0,
            turn_abruptness: 0.7,     // sidecut ≈ 15.7m
            turn_to_slope_rate: 0.0,
            slowing_down_rate: 0.47,  // ≈ 100°/s
            friction: 0.07,           // ≈ 0.03
            slipping: 0.22,           // ≈ 0.3 carving/skidding blend
            air_resistance: 0.1,      // ≈ 0.5 kg/m³
            contact_offset: 0.31,     // ≈ 0.1m takeoff limit
            board_length: 1.6,
            board_width: 0.325,
        }
    }
}

impl ModelParameters {
    /// Загрузить пресет из JSON (отсутствующие поля - Default) и провалидировать
    pub fn from_json(json: &str) -> Result<Self, ParameterError> {
        let result = serde_json::from_str::<Self>(json)
            .map_err(ParameterError::from)
            .and_then(|parameters| parameters.validate().map(|_| parameters));

        if let Err(error) = &result {
            log_warning(&format!("Parameter preset rejected: {}", error));
        }

        result
    }

    pub fn to_json(&self) -> Result<String, ParameterError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        let sliders = [
            ("turn_abruptness", self.turn_abruptness),
            ("turn_to_slope_rate", self.turn_to_slope_rate),
            ("slowing_down_rate", self.slowing_down_rate),
            ("friction", self.friction),
            ("slipping", self.slipping),
            ("air_resistance", self.air_resistance),
            ("contact_offset", self.contact_offset),
        ];

        for (name, value) in sliders {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite { name, value });
            }
            if !(0.0..=1.0).contains(&value) {
                return Err(ParameterError::OutOfRange { name, value });
            }
        }

        let limits = [
            ("in_air_rotation_angular_velocity", self.in_air_rotation_angular_velocity),
            ("max_safe_landing_angle", self.max_safe_landing_angle),
            ("max_safe_landing_speed", self.max_safe_landing_speed),
        ];

        for (name, value) in limits {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite { name, value });
            }
        }

        let (length, width) = (self.board_length, self.board_width);
        if !length.is_finite() || !width.is_finite() || length <= 0.0 || width <= 0.0 || width >= length {
            return Err(ParameterError::InvalidBoard { length, width });
        }

        Ok(())
    }
}
