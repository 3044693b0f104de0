//! Оценка склона под доской
//!
//! Центральный луч + три кольца по четыре луча (вперёд/назад/вправо/влево).
//! Нормаль - взвешенное среднее: центр 0.2, кольцо - weight × (hits / 4).
//! Сглаживает шум меша на масштабе footprint'а доски.

use bevy::prelude::*;

use super::{cast_down, LayerMask, TerrainQuery};
use crate::config::PhysicsParameters;
use crate::math::{angle_deg, sign};

/// Вес центрального луча
pub const CENTRAL_INTERPOLATION_RATIO: f32 = 0.2;

const PRIMARY_RAY_HEIGHT: f32 = 10.0;
const PRIMARY_RAY_LENGTH: f32 = 20.0;

/// Локальная геометрия склона на текущий тик (не сохраняется между тиками)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeFrame {
    /// Точка попадания центрального луча
    pub point: Vec3,
    /// Сглаженная нормаль (не обязательно unit; ноль - склон не найден)
    pub normal: Vec3,
    /// Горизонталь склона: cross(up, normal), либо right доски если вырождено
    pub equipotential: Vec3,
    /// Линия падения (вниз по склону): normal, повёрнутая на 90° вокруг equipotential
    pub slope_vector: Vec3,
    /// α - угол склона, градусы
    pub slope_angle: f32,
    /// β - отклонение forward от горизонтали склона, градусы (со знаком)
    pub deviation: f32,
}

impl SlopeFrame {
    /// Склон не найден: доска в воздухе, без влияния склона
    pub fn untracked() -> Self {
        Self {
            point: Vec3::ZERO,
            normal: Vec3::ZERO,
            equipotential: Vec3::ZERO,
            slope_vector: Vec3::ZERO,
            slope_angle: 0.0,
            deviation: 0.0,
        }
    }

    pub fn is_tracked(&self) -> bool {
        self.normal != Vec3::ZERO
    }

    /// Геометрия склона из готовой нормали (используется и сэмплером, и тестами)
    pub fn from_normal(point: Vec3, normal: Vec3, forward: Vec3, right: Vec3) -> Self {
        let raw_equipotential = Vec3::Y.cross(normal);
        let equipotential = if raw_equipotential.length_squared() <= 1e-6 {
            right
        } else {
            raw_equipotential
        };

        let axis = equipotential.normalize_or_zero();
        let slope_vector = if axis == Vec3::ZERO {
            Vec3::ZERO
        } else {
            Quat::from_axis_angle(axis, std::f32::consts::FRAC_PI_2) * normal
        };

        // β считается по "сырой" горизонтали: на ровном месте она нулевая → β = 0
        let deviation = angle_deg(forward, raw_equipotential) * sign(forward.dot(slope_vector));

        Self {
            point,
            normal,
            equipotential,
            slope_vector,
            slope_angle: angle_deg(normal, Vec3::Y),
            deviation,
        }
    }

    /// Поворот локальных осей склона в мир: X → горизонталь, Y → нормаль, Z → линия падения
    ///
    /// Базис строится целиком (не кратчайшей дугой от +Z), иначе на склонах в сторону −Z
    /// локальный X уходит против горизонтали.
    pub fn local_to_world(&self) -> Quat {
        let z = self.slope_vector.normalize_or_zero();
        let x = self.normal.cross(z).normalize_or_zero();
        if z == Vec3::ZERO || x == Vec3::ZERO {
            return Quat::IDENTITY;
        }

        let y = z.cross(x);
        Quat::from_mat3(&Mat3::from_cols(x, y, z))
    }
}

/// Сэмплер склона поверх произвольного TerrainQuery
pub struct SlopeSampler<'a> {
    terrain: &'a dyn TerrainQuery,
    layers: LayerMask,
    rings: [(f32, f32); 3],
}

impl<'a> SlopeSampler<'a> {
    pub fn new(terrain: &'a dyn TerrainQuery, parameters: &PhysicsParameters) -> Self {
        Self {
            terrain,
            layers: parameters.terrain_layers,
            rings: parameters.interpolation_rings(),
        }
    }

    /// Взвешенная нормаль под `position`; None если центральный луч промахнулся
    pub fn interpolate_normal(&self, position: Vec3, forward: Vec3, right: Vec3) -> Option<(Vec3, Vec3)> {
        let hit = cast_down(self.terrain, position, PRIMARY_RAY_HEIGHT, PRIMARY_RAY_LENGTH, self.layers)?;

        let mut normal = hit.normal * CENTRAL_INTERPOLATION_RATIO;
        let mut total_ratio = CENTRAL_INTERPOLATION_RATIO;

        for (radius, weight) in self.rings {
            let subs = [
                position + forward * radius,
                position - forward * radius,
                position + right * radius,
                position - right * radius,
            ];

            let mut sub_count = 0;
            let mut sub_normals = Vec3::ZERO;

            for sub in subs {
                if let Some(sub_hit) = cast_down(self.terrain, sub, radius + 1.0, 2.0 * (radius + 1.0), self.layers) {
                    sub_normals += sub_hit.normal;
                    sub_count += 1;
                }
            }

            if sub_count > 0 {
                let ratio = weight * sub_count as f32 / subs.len() as f32;
                total_ratio += ratio;
                normal += sub_normals / sub_count as f32 * ratio;
            }
        }

        Some((hit.point, normal / total_ratio))
    }

    pub fn sample(&self, position: Vec3, forward: Vec3, right: Vec3) -> Option<SlopeFrame> {
        let (point, normal) = self.interpolate_normal(position, forward, right)?;
        Some(SlopeFrame::from_normal(point, normal, forward, right))
    }
}
