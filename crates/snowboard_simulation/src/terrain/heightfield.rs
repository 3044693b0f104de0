//! Heightfield террейн (регулярная сетка высот)
//!
//! Высоты - bilinear, нормаль - central differences.
//! Raycast: шаг по лучу в полклетки + бисекция на пересечении.

use bevy::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{LayerMask, RaycastHit, TerrainQuery};
use crate::error::TerrainError;

const REFINE_ITERATIONS: usize = 16;

#[derive(Debug, Clone)]
pub struct HeightFieldTerrain {
    /// Мировая позиция узла (0, 0)
    pub origin: Vec3,
    /// nx, nz (узлы по x и по z)
    pub dims: UVec2,
    /// Размер клетки по x, z (метры)
    pub cell: Vec2,
    pub heights: Vec<f32>,
    pub layer: LayerMask,
}

impl HeightFieldTerrain {
    /// Сетка nx × nz, высоты построчно по z (индекс `x + z·nx`)
    pub fn from_heights(origin: Vec3, dims: UVec2, cell: Vec2, heights: Vec<f32>) -> Result<Self, TerrainError> {
        check_dims(dims)?;

        let expected = (dims.x as usize) * (dims.y as usize);
        if heights.len() != expected {
            return Err(TerrainError::HeightCount {
                expected,
                actual: heights.len(),
            });
        }

        Ok(Self {
            origin,
            dims,
            cell,
            heights,
            layer: LayerMask::ALL,
        })
    }

    /// Склон вдоль +Z с угловым наклоном `slope_deg` и случайными буграми
    ///
    /// Детерминирован по seed (ChaCha8): одинаковый seed - одинаковый склон.
    pub fn procedural_slope(
        seed: u64,
        dims: UVec2,
        cell: Vec2,
        slope_deg: f32,
        bump_amplitude: f32,
    ) -> Result<Self, TerrainError> {
        check_dims(dims)?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let drop_per_meter = slope_deg.to_radians().tan();

        // Несколько гладких "бугров" (гауссианы) поверх наклонной плоскости
        let width = (dims.x - 1) as f32 * cell.x;
        let length = (dims.y - 1) as f32 * cell.y;
        let bumps: Vec<(Vec2, f32, f32)> = (0..12)
            .map(|_| {
                let center = Vec2::new(rng.gen_range(0.0..width), rng.gen_range(0.0..length));
                let radius = rng.gen_range(3.0..12.0);
                let height = rng.gen_range(-1.0..1.0) * bump_amplitude;
                (center, radius, height)
            })
            .collect();

        let mut heights = Vec::with_capacity((dims.x * dims.y) as usize);
        for z in 0..dims.y {
            for x in 0..dims.x {
                let local = Vec2::new(x as f32 * cell.x, z as f32 * cell.y);
                let mut h = -local.y * drop_per_meter;
                for (center, radius, height) in &bumps {
                    let d2 = local.distance_squared(*center) / (radius * radius);
                    h += height * (-d2).exp();
                }
                heights.push(h);
            }
        }

        let origin = Vec3::new(-width / 2.0, 0.0, 0.0);
        Self::from_heights(origin, dims, cell, heights)
    }

    #[inline]
    fn h(&self, x: u32, z: u32) -> f32 {
        self.heights[(x + z * self.dims.x) as usize]
    }

    /// Находится ли мировая точка (x, z) над сеткой
    pub fn contains(&self, x: f32, z: f32) -> bool {
        let lx = x - self.origin.x;
        let lz = z - self.origin.z;
        let max_x = (self.dims.x - 1) as f32 * self.cell.x;
        let max_z = (self.dims.y - 1) as f32 * self.cell.y;
        (0.0..=max_x).contains(&lx) && (0.0..=max_z).contains(&lz)
    }

    /// Bilinear высота в мировых (x, z); за краем сетки - высота ближайшего края
    pub fn sample_height(&self, x: f32, z: f32) -> f32 {
        let nx = self.dims.x;
        let nz = self.dims.y;
        let fx = ((x - self.origin.x) / self.cell.x).clamp(0.0, (nx - 1) as f32 - 1e-5);
        let fz = ((z - self.origin.z) / self.cell.y).clamp(0.0, (nz - 1) as f32 - 1e-5);
        let x0 = fx.floor() as u32;
        let z0 = fz.floor() as u32;
        let x1 = (x0 + 1).min(nx - 1);
        let z1 = (z0 + 1).min(nz - 1);
        let tx = fx - x0 as f32;
        let tz = fz - z0 as f32;

        let a = self.h(x0, z0) * (1.0 - tx) + self.h(x1, z0) * tx;
        let b = self.h(x0, z1) * (1.0 - tx) + self.h(x1, z1) * tx;
        self.origin.y + a * (1.0 - tz) + b * tz
    }

    /// Central-diff нормаль (unit)
    pub fn sample_normal(&self, x: f32, z: f32) -> Vec3 {
        let hx0 = self.sample_height(x - self.cell.x, z);
        let hx1 = self.sample_height(x + self.cell.x, z);
        let hz0 = self.sample_height(x, z - self.cell.y);
        let hz1 = self.sample_height(x, z + self.cell.y);

        let ddx = (hx1 - hx0) / (2.0 * self.cell.x.max(1e-6));
        let ddz = (hz1 - hz0) / (2.0 * self.cell.y.max(1e-6));

        Vec3::new(-ddx, 1.0, -ddz).normalize_or_zero()
    }

    /// Расстояние над поверхностью (отрицательное - под ней)
    fn clearance(&self, point: Vec3) -> f32 {
        point.y - self.sample_height(point.x, point.z)
    }
}

impl TerrainQuery for HeightFieldTerrain {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, layers: LayerMask) -> Option<RaycastHit> {
        if !self.layer.intersects(layers) || max_distance <= 0.0 {
            return None;
        }

        // Старт под поверхностью - лицевую сторону не пересекаем
        if self.clearance(origin) < 0.0 {
            return None;
        }

        let step = 0.5 * self.cell.x.min(self.cell.y).max(1e-3);
        let mut previous = 0.0;
        let mut travelled = 0.0;

        while travelled < max_distance {
            travelled = (travelled + step).min(max_distance);
            let point = origin + direction * travelled;

            if !self.contains(point.x, point.z) {
                previous = travelled;
                continue;
            }

            if self.clearance(point) <= 0.0 {
                let (mut lo, mut hi) = (previous, travelled);
                for _ in 0..REFINE_ITERATIONS {
                    let mid = 0.5 * (lo + hi);
                    if self.clearance(origin + direction * mid) > 0.0 {
                        lo = mid;
                    } else {
                        hi = mid;
                    }
                }

                let hit_point = origin + direction * hi;
                return Some(RaycastHit {
                    point: Vec3::new(hit_point.x, self.sample_height(hit_point.x, hit_point.z), hit_point.z),
                    normal: self.sample_normal(hit_point.x, hit_point.z),
                });
            }

            previous = travelled;
        }

        None
    }
}

fn check_dims(dims: UVec2) -> Result<(), TerrainError> {
    if dims.x < 2 || dims.y < 2 {
        return Err(TerrainError::TooSmall { nx: dims.x, nz: dims.y });
    }

    Ok(())
}
