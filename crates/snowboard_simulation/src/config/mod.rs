//! Конфигурация модели: user sliders → физические коэффициенты
//!
//! `derive` - чистая функция, вызывается каждый update (live tuning):
//! никаких скрытых мутаций общего состояния, результат зависит только от входа.

pub mod model_parameters;
pub mod physics_parameters;

pub use model_parameters::ModelParameters;
pub use physics_parameters::PhysicsParameters;

use crate::math::lerp;

/// ModelParameters → PhysicsParameters по фиксированным кривым интерполяции
pub fn derive(model: &ModelParameters) -> PhysicsParameters {
    let friction = lerp(0.01, 0.3, model.friction);

    PhysicsParameters {
        rotation_in_air_angular_velocity: if model.rotate_in_air {
            model.in_air_rotation_angular_velocity
        } else {
            0.0
        },

        board_length: model.board_length,
        board_width: model.board_width,

        max_landing_angle: if model.fall_on_unsafe_landing_angle {
            model.max_safe_landing_angle
        } else {
            f32::INFINITY
        },
        speed_of_fall: if model.fall_on_unsafe_landing_speed {
            model.max_safe_landing_speed
        } else {
            f32::INFINITY
        },

        sidecut_radius: lerp(50.0, 1.0, model.turn_abruptness),
        rotate_to_slope_angular_velocity: lerp(0.0, 180.0, model.turn_to_slope_rate),
        slowing_down_angular_velocity: lerp(30.0, 180.0, model.slowing_down_rate),
        carving_skidding_blend: lerp(0.1, 1.0, model.slipping),
        takeoff_limit: lerp(0.01, 0.3, model.contact_offset),

        edge_static_friction: friction,
        edge_dynamic_friction: friction,
        snow_static_friction: friction,
        snow_dynamic_friction: friction * 0.1,

        air_density: lerp(0.0, 5.0, model.air_resistance),

        invert_input_backwards: model.invert_input_backwards,
        terrain_layers: model.terrain_layers,

        ..PhysicsParameters::default()
    }
}
