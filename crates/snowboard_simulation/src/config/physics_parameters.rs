//! Физические коэффициенты модели (ParameterSet)
//!
//! Пересчитываются каждый update из ModelParameters (см. `derive`) и не
//! меняются в течение одного прохода. Поля, которых нет среди sliders,
//! остаются на design-time значениях из Default.

use crate::terrain::LayerMask;

#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsParameters {
    /// Коэффициент "гиперболы" потери скорости при приземлении
    pub velocity_drop_on_contact_coefficient: f32,
    /// Множитель скорости за fixed tick при торможении (Full contact)
    pub velocity_per_tick_drop_on_slowing_down: f32,

    pub board_length: f32,
    pub board_width: f32,
    pub rider_height: f32,
    pub rider_mass: f32,
    pub sidecut_radius: f32,
    /// Максимальный вертикальный зазор tip ↔ террейн, ещё считающийся контактом
    pub takeoff_limit: f32,

    pub air_density: f32,
    pub form_factor: f32,

    pub edge_static_friction: f32,
    pub edge_dynamic_friction: f32,
    pub snow_static_friction: f32,
    pub snow_dynamic_friction: f32,

    /// Скорость, начиная с которой поворот чисто карвинговый
    pub pure_curved_turn_min_speed: f32,
    pub carving_skidding_blend: f32,

    /// Градусы/сек
    pub slowing_down_angular_velocity: f32,
    /// Градусы/сек
    pub rotate_to_slope_angular_velocity: f32,

    pub jump_velocity: f32,
    pub boost: f32,
    pub start_speed: f32,
    pub input_sensitivity: f32,

    /// Градусы/сек при полном наклоне в воздухе (0 - вращение выключено)
    pub rotation_in_air_angular_velocity: f32,

    /// Градусы; +inf выключает проверку
    pub max_landing_angle: f32,
    /// м/с; +inf выключает проверку
    pub speed_of_fall: f32,

    /// Окно скоростей, в котором малый радиус поворота тянется к sidecut
    pub turn_radius_blend_min_speed: f32,
    pub turn_radius_blend_max_speed: f32,

    pub invert_input_backwards: bool,
    pub terrain_layers: LayerMask,
}

impl Default for PhysicsParameters {
    fn default() -> Self {
        Self {
            velocity_drop_on_contact_coefficient: 0.9,
            velocity_per_tick_drop_on_slowing_down: 0.975,
            board_length: 1.6,
            board_width: 0.325,
            rider_height: 1.77,
            rider_mass: 75.0,
            sidecut_radius: 15.2,
            takeoff_limit: 0.1,
            air_density: 0.5,
            form_factor: 0.35,
            edge_static_friction: 0.03,
            edge_dynamic_friction: 0.03,
            snow_static_friction: 0.03,
            snow_dynamic_friction: 0.003,
            pure_curved_turn_min_speed: 15.0,
            carving_skidding_blend: 0.3, // 1.0 - скейтборд
            slowing_down_angular_velocity: 100.0,
            rotate_to_slope_angular_velocity: 0.0,
            jump_velocity: 3.0,
            boost: 0.0,
            start_speed: 5.0,
            input_sensitivity: 0.55,
            rotation_in_air_angular_velocity: 360.0,
            max_landing_angle: 60.0,
            speed_of_fall: 20.0,
            turn_radius_blend_min_speed: 10.0,
            turn_radius_blend_max_speed: 35.0,
            invert_input_backwards: false,
            terrain_layers: LayerMask::ALL,
        }
    }
}

impl PhysicsParameters {
    /// Расстояние от центра доски до точки контакта tip'а
    pub fn tip_offset(&self) -> f32 {
        self.board_length / 2.0 - self.board_width / 2.0
    }

    /// Кольца слоупа: (радиус, вес), от ближнего к дальнему
    pub fn interpolation_rings(&self) -> [(f32, f32); 3] {
        [
            (self.board_length * 0.5, 0.3),
            (self.board_length, 0.3),
            (self.board_length * 1.5, 0.2),
        ]
    }
}
