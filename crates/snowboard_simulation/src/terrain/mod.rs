//! Terrain queries - внешний raycast-провайдер
//!
//! Физика доски видит террейн только через `TerrainQuery::raycast`.
//! Встроенные реализации (плоскость, heightfield, пустота) нужны headless
//! прогонам и тестам; в движке подключается адаптер к коллайдерам (feature "rapier").
//!
//! Запросы синхронные, без побочных эффектов и без кэша между тиками.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub mod heightfield;
pub mod plane;
pub mod sampler;

#[cfg(feature = "rapier")]
pub mod rapier;

pub use heightfield::HeightFieldTerrain;
pub use plane::{EmptyTerrain, PlaneTerrain};
pub use sampler::{SlopeFrame, SlopeSampler};

/// Bitmask слоёв террейна (фильтр raycast'ов)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const ALL: LayerMask = LayerMask(u32::MAX);
    pub const NONE: LayerMask = LayerMask(0);

    pub fn layer(index: u32) -> Self {
        LayerMask(1 << index)
    }

    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Результат raycast'а по террейну
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaycastHit {
    pub point: Vec3,
    /// Unit нормаль поверхности в точке попадания
    pub normal: Vec3,
}

/// Raycast-провайдер террейна
pub trait TerrainQuery {
    /// Луч из `origin` по `direction` (unit) не дальше `max_distance`.
    /// None - промах (в том числе когда слой террейна не входит в `layers`).
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, layers: LayerMask) -> Option<RaycastHit>;
}

impl<T: TerrainQuery + ?Sized> TerrainQuery for &T {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, layers: LayerMask) -> Option<RaycastHit> {
        (**self).raycast(origin, direction, max_distance, layers)
    }
}

impl<T: TerrainQuery + ?Sized> TerrainQuery for Box<T> {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, layers: LayerMask) -> Option<RaycastHit> {
        (**self).raycast(origin, direction, max_distance, layers)
    }
}

/// Луч строго вниз из точки на `height` выше `position`
pub fn cast_down(
    terrain: &dyn TerrainQuery,
    position: Vec3,
    height: f32,
    max_distance: f32,
    layers: LayerMask,
) -> Option<RaycastHit> {
    terrain.raycast(position + Vec3::Y * height, Vec3::NEG_Y, max_distance, layers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_mask() {
        let ground = LayerMask::layer(3);
        assert!(ground.intersects(LayerMask::ALL));
        assert!(!ground.intersects(LayerMask::layer(4)));
        assert!(!ground.intersects(LayerMask::NONE));
    }

    #[test]
    fn test_cast_down_hits_plane() {
        let terrain = PlaneTerrain::horizontal(2.0);
        let hit = cast_down(&terrain, Vec3::new(5.0, 3.0, -1.0), 10.0, 20.0, LayerMask::ALL)
            .expect("plane below must be hit");

        assert!((hit.point - Vec3::new(5.0, 2.0, -1.0)).length() < 1e-5);
        assert!((hit.normal - Vec3::Y).length() < 1e-6);
    }
}
