//! Векторные helpers с "безопасной" семантикой для вырожденной геометрии
//!
//! glam паникует/даёт NaN на нулевых векторах в angle_between/project_onto.
//! Здесь нулевые входы дают нулевой угол / нулевую проекцию.

use bevy::prelude::*;

const EPSILON_SQR: f32 = 1e-15;

/// Знак с sign(0) = 1 (не путать с f32::signum, у которого signum(-0.0) = -1)
#[inline]
pub fn sign(value: f32) -> f32 {
    if value >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Линейная интерполяция с t, зажатым в [0, 1]
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

#[inline]
pub fn lerp_vec(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Неориентированный угол между векторами в градусах, [0, 180]
pub fn angle_deg(a: Vec3, b: Vec3) -> f32 {
    let denominator = (a.length_squared() * b.length_squared()).sqrt();
    if denominator < EPSILON_SQR {
        return 0.0;
    }

    let cos = (a.dot(b) / denominator).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Проекция `vector` на направление `onto` (ноль если onto вырожден)
pub fn project(vector: Vec3, onto: Vec3) -> Vec3 {
    let sqr = onto.length_squared();
    if sqr < EPSILON_SQR {
        return Vec3::ZERO;
    }

    onto * (vector.dot(onto) / sqr)
}

/// Проекция на плоскость с нормалью `normal` (вектор без изменений если нормаль вырождена)
pub fn project_on_plane(vector: Vec3, normal: Vec3) -> Vec3 {
    let sqr = normal.length_squared();
    if sqr < EPSILON_SQR {
        return vector;
    }

    vector - normal * (vector.dot(normal) / sqr)
}
