//! Аналитические террейны: бесконечная плоскость и пустота

use bevy::prelude::*;

use super::{LayerMask, RaycastHit, TerrainQuery};

/// Бесконечная плоскость (горизонтальная или наклонная)
///
/// Лучи бьют только в лицевую сторону (как mesh-коллайдеры движка):
/// луч, идущий из-под плоскости, промахивается.
#[derive(Debug, Clone, Copy)]
pub struct PlaneTerrain {
    pub point: Vec3,
    pub normal: Vec3,
    pub layer: LayerMask,
}

impl PlaneTerrain {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize_or_zero(),
            layer: LayerMask::ALL,
        }
    }

    pub fn horizontal(height: f32) -> Self {
        Self::new(Vec3::new(0.0, height, 0.0), Vec3::Y)
    }

    /// Склон, спускающийся в направлении +Z под углом `angle_deg`
    pub fn slope(angle_deg: f32) -> Self {
        let angle = angle_deg.to_radians();
        Self::new(Vec3::ZERO, Vec3::new(0.0, angle.cos(), angle.sin()))
    }

    pub fn with_layer(mut self, layer: LayerMask) -> Self {
        self.layer = layer;
        self
    }

    /// Высота плоскости над точкой (x, z)
    pub fn height_at(&self, x: f32, z: f32) -> f32 {
        if self.normal.y.abs() < 1e-6 {
            return self.point.y;
        }

        self.point.y - (self.normal.x * (x - self.point.x) + self.normal.z * (z - self.point.z)) / self.normal.y
    }
}

impl TerrainQuery for PlaneTerrain {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, layers: LayerMask) -> Option<RaycastHit> {
        if !self.layer.intersects(layers) {
            return None;
        }

        let denominator = direction.dot(self.normal);
        if denominator >= -1e-6 {
            return None;
        }

        let distance = (self.point - origin).dot(self.normal) / denominator;
        if !(0.0..=max_distance).contains(&distance) {
            return None;
        }

        Some(RaycastHit {
            point: origin + direction * distance,
            normal: self.normal,
        })
    }
}

/// Террейн без единого коллайдера - все лучи промахиваются
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyTerrain;

impl TerrainQuery for EmptyTerrain {
    fn raycast(&self, _origin: Vec3, _direction: Vec3, _max_distance: f32, _layers: LayerMask) -> Option<RaycastHit> {
        None
    }
}
