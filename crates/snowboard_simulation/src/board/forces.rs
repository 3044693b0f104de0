//! Силовая модель доски
//!
//! Ускорения считаются в локальных осях склона (z - линия падения, x - горизонталь
//! склона), затем поворачиваются в мир базисом склона (`SlopeFrame::local_to_world`):
//! - aG  - гравитация вдоль склона: g·sin α
//! - aEf - трение канта: μ = μ_edge·|sin φ| (в статике не больше tan α)
//! - aF  - трение базы о снег: g·cos α·μ_snow против скорости
//! - aB  - буст от speed input (только вниз по склону, до 30°)
//! Сопротивление воздуха добавляется отдельно (`air_resistance`).

use bevy::prelude::*;

use super::contact::Contact;
use super::{GRAVITY, MAX_TILT};
use crate::config::PhysicsParameters;
use crate::math::{angle_deg, lerp, lerp_vec, project, project_on_plane, sign};
use crate::terrain::SlopeFrame;

/// Склон, круче которого буст уже не помогает (градусы)
const BOOST_MAX_SLOPE: f32 = 30.0;

const EDGE_SPEED_EPSILON_SQR: f32 = 1e-4;

/// Мгновенное состояние доски, нужное силовой модели
#[derive(Debug, Clone, Copy)]
pub struct ForceState<'a> {
    pub slope: &'a SlopeFrame,
    /// φ, градусы (уже со знаком направления движения)
    pub tilt: f32,
    /// Speed input [-1, 1]
    pub rotation_ratio: f32,
    pub velocity: Vec3,
    pub forward: Vec3,
    pub right: Vec3,
    pub contact: Contact,
    /// Знак "последнего значимого" направления движения (±1)
    pub direction_sign: f32,
    pub is_slowing_down: bool,
    pub edge_friction_static: bool,
    pub snow_friction_static: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceOutput {
    /// Суммарная сила (Н) с учётом состояния контакта
    pub force: Vec3,
    /// Угловая скорость карвинга, рад/с (0 вне Full contact)
    pub carving_angular_velocity: f32,
}

/// Радиус поворота по наклону без поправки на скорость: R / (2·tan φ)
///
/// Нулевой наклон - бесконечный радиус (прямолинейное движение).
pub fn calculated_turn_radius(tilt_deg: f32, sidecut_radius: f32, direction_sign: f32) -> f32 {
    let tan = tilt_deg.to_radians().tan();
    if tan.abs() < 1e-6 {
        return f32::INFINITY * sign(tan) * direction_sign;
    }

    sidecut_radius / (tan * 2.0) * direction_sign
}

/// Радиус поворота с поправкой на скорость
///
/// Если |r| < sidecut, на скоростях из окна [blend_min, blend_max] радиус
/// тянется к sidecut - без нереально крутых поворотов на скорости.
pub fn turn_radius(tilt_deg: f32, speed: f32, direction_sign: f32, parameters: &PhysicsParameters) -> f32 {
    let radius = calculated_turn_radius(tilt_deg, parameters.sidecut_radius, direction_sign);

    if radius.abs() > parameters.sidecut_radius {
        return radius;
    }

    let window = (parameters.turn_radius_blend_max_speed - parameters.turn_radius_blend_min_speed).max(1e-6);
    let t = (speed - parameters.turn_radius_blend_min_speed) / window;

    sign(radius) * lerp(radius.abs(), parameters.sidecut_radius, t)
}

pub fn carving_angular_velocity(forward_speed: f32, radius: f32) -> f32 {
    if !radius.is_finite() || radius == 0.0 {
        return 0.0;
    }

    forward_speed / radius
}

/// Знак движения относительно носа доски (только при инверсии управления)
pub fn unidirectionality_sign(velocity: Vec3, forward: Vec3, invert_input_backwards: bool) -> f32 {
    if invert_input_backwards {
        sign(velocity.dot(forward))
    } else {
        1.0
    }
}

pub fn calculate_force(state: &ForceState, parameters: &PhysicsParameters) -> ForceOutput {
    let slope = state.slope;
    let alpha = slope.slope_angle.to_radians();
    let (sin_a, cos_a) = alpha.sin_cos();
    let sin_phi = state.tilt.to_radians().sin();
    let (sin_b, cos_b) = slope.deviation.to_radians().sin_cos();

    let g = GRAVITY;
    let mass = parameters.rider_mass;

    let edge_coefficient = if state.edge_friction_static {
        parameters.edge_static_friction
    } else {
        parameters.edge_dynamic_friction
    };

    let mut mu = edge_coefficient * sin_phi.abs();
    if state.edge_friction_static {
        // Статика канта не держит сильнее, чем нужно для покоя на склоне
        mu = mu.min(alpha.tan());
    }

    // *** GRAVITY *** //
    let a_gravity = if state.is_slowing_down && !state.edge_friction_static {
        Vec3::ZERO
    } else {
        Vec3::new(0.0, 0.0, g * sin_a)
    };

    // *** EDGE FRICTION *** //
    let a_edge = Vec3::new(
        -g * cos_a * mu * sin_b * sign(state.right.dot(state.velocity)),
        0.0,
        -g * cos_a * mu * cos_b.abs(),
    );

    // *** SNOW FRICTION *** //
    let theta = (angle_deg(slope.equipotential, project_on_plane(state.velocity, slope.normal))
        * sign(state.velocity.dot(slope.slope_vector)))
    .to_radians();
    let (sin_t, cos_t) = theta.sin_cos();

    let snow_coefficient = if state.snow_friction_static {
        parameters.snow_static_friction
    } else {
        parameters.snow_dynamic_friction
    };
    let friction = g * cos_a * snow_coefficient;
    let a_snow = Vec3::new(-friction * cos_t, 0.0, -friction * sin_t);

    let local = a_gravity + a_edge + a_snow;
    let mut acceleration = slope.local_to_world() * local;

    // *** BOOST *** // (в мировых осях)
    let heading = state.forward * state.direction_sign;
    let slope_falloff = ((BOOST_MAX_SLOPE - slope.slope_angle) / BOOST_MAX_SLOPE).clamp(0.0, 1.0).powf(1.5);
    let downhill_gate = sign(heading.dot(Vec3::NEG_Y)).clamp(0.0, 1.0);
    acceleration += heading.normalize_or_zero() * state.rotation_ratio * slope_falloff * parameters.boost * downhill_gate;

    let forward_speed = project(state.velocity, state.forward).length();
    let carving = if state.contact == Contact::Full {
        let direction = unidirectionality_sign(state.velocity, state.forward, parameters.invert_input_backwards);
        let radius = turn_radius(state.tilt, state.velocity.length(), direction, parameters);
        carving_angular_velocity(forward_speed, radius)
    } else {
        0.0
    };

    let gravity = Vec3::NEG_Y * g;
    let net = match state.contact {
        Contact::None => gravity,
        Contact::Half => acceleration / 2.0 + gravity / 2.0,
        Contact::Full => acceleration,
    };

    ForceOutput {
        force: net * mass,
        carving_angular_velocity: carving,
    }
}

/// Аэродинамическое сопротивление: −v̂·C·ρ·|v|²·S/2, S = рост × ширина доски
pub fn air_resistance(velocity: Vec3, parameters: &PhysicsParameters) -> Vec3 {
    -velocity.normalize_or_zero()
        * parameters.form_factor
        * parameters.air_density
        * velocity.length_squared()
        * parameters.rider_height
        * parameters.board_width
        / 2.0
}

/// Не даём тормозящему ускорению "перелететь" через ноль вдоль оси скорости
pub fn limit_overshoot(delta_velocity: Vec3, velocity: Vec3) -> Vec3 {
    if delta_velocity.dot(velocity) >= 0.0 {
        return delta_velocity;
    }

    let along = project(delta_velocity, velocity).length_squared();
    if along > velocity.length_squared() {
        return delta_velocity * (velocity.length_squared() / along).sqrt();
    }

    delta_velocity
}

/// Статика/динамика канта после интегрирования (только Full contact)
pub fn edge_friction_static(was_static: bool, velocity: Vec3, forward: Vec3, right: Vec3, slope_normal: Vec3) -> bool {
    let on_forward = project(velocity, project_on_plane(forward, slope_normal));
    let on_right = project(velocity, project_on_plane(right, slope_normal));

    if !was_static && on_forward.length_squared() > EDGE_SPEED_EPSILON_SQR && Vec3::Y.dot(on_right) >= 0.0 {
        return true;
    }

    project(velocity, right).length_squared() < EDGE_SPEED_EPSILON_SQR
}

/// Смешивание карвинга и заноса (Full contact, без торможения)
///
/// Скорость тянется к своей проекции на forward с весом
/// (min(|v|, v_pure) / v_pure)² × blend: на малой скорости / большом blend - занос,
/// на большой скорости / малом blend - чистый карвинг. Вращение слегка съедает
/// продольную скорость.
pub fn carve_blend(velocity: Vec3, forward: Vec3, angular_velocity: f32, parameters: &PhysicsParameters) -> Vec3 {
    let pure_speed = parameters.pure_curved_turn_min_speed.max(1e-6);
    let spin_loss = lerp(1.0, 0.98, angular_velocity.abs() / (2.3 * std::f32::consts::PI));
    let carved = project(velocity, forward) * spin_loss;

    let weight = (velocity.length().clamp(0.0, pure_speed) / pure_speed).powi(2) * parameters.carving_skidding_blend;

    lerp_vec(velocity, carved, weight)
}

/// Наклон, ограниченный для визуала: крутизной поверхности и скоростью
pub fn visual_tilt(tilt: f32, max_surface_tilt: f32, speed_sqr: f32) -> f32 {
    let by_surface = tilt.abs() * (max_surface_tilt / MAX_TILT).clamp(0.0, 1.0);
    let by_speed = MAX_TILT * ((speed_sqr + 10.0) / 100.0).clamp(0.0, 1.0);

    sign(tilt) * by_surface.min(by_speed)
}
