//! Классификация контакта доски с террейном
//!
//! По лучу вниз из каждого tip'а (front/rear). Tip в контакте, если луч попал
//! и вертикальный зазор ≤ takeoff limit. Оба → Full, один → Half, ни одного → None.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::terrain::{cast_down, LayerMask, RaycastHit, TerrainQuery};

/// Высота старта контактного луча над tip'ом (луч длиной в два раза больше)
pub const CONTACT_SEARCHING_RAYCAST_DEPTH: f32 = 50.0;

/// Вычитаемое в гиперболе потери скорости при приземлении
const LANDING_DAMPING_OFFSET: f32 = 0.44;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Contact {
    /// Оба tip'а далеко от земли
    #[default]
    None,
    /// Ровно один tip в контакте
    Half,
    /// Оба tip'а в контакте
    Full,
}

impl Contact {
    pub fn from_tips(front: bool, rear: bool) -> Self {
        match (front, rear) {
            (true, true) => Contact::Full,
            (true, false) | (false, true) => Contact::Half,
            (false, false) => Contact::None,
        }
    }

    pub fn is_grounded(self) -> bool {
        self != Contact::None
    }
}

/// Переход контакта между тиками (только None ↔ не-None)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactTransition {
    Lost,
    Found,
}

/// Пара (previous, current) для детекта переходов
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactTracker {
    pub previous: Contact,
    pub current: Contact,
}

impl ContactTracker {
    pub fn set(&mut self, contact: Contact) {
        self.previous = self.current;
        self.current = contact;
    }

    /// Half ↔ Full переходом не считается
    pub fn transition(&self) -> Option<ContactTransition> {
        match (self.previous.is_grounded(), self.current.is_grounded()) {
            (true, false) => Some(ContactTransition::Lost),
            (false, true) => Some(ContactTransition::Found),
            _ => None,
        }
    }
}

/// Результат классификации за тик
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactSample {
    pub contact: Contact,
    /// Попадание под front tip (только если tip в контакте)
    pub front_hit: Option<RaycastHit>,
    pub rear_hit: Option<RaycastHit>,
}

/// Tip в контакте ⇔ попадание есть и зазор ≤ takeoff limit (под землёй - тоже контакт)
pub fn tip_contact(
    terrain: &dyn TerrainQuery,
    tip: Vec3,
    takeoff_limit: f32,
    layers: LayerMask,
) -> Option<RaycastHit> {
    let hit = cast_down(
        terrain,
        tip,
        CONTACT_SEARCHING_RAYCAST_DEPTH,
        CONTACT_SEARCHING_RAYCAST_DEPTH * 2.0,
        layers,
    )?;

    (tip.y - hit.point.y <= takeoff_limit).then_some(hit)
}

pub fn classify(
    terrain: &dyn TerrainQuery,
    front_point: Vec3,
    rear_point: Vec3,
    takeoff_limit: f32,
    layers: LayerMask,
) -> ContactSample {
    let front_hit = tip_contact(terrain, front_point, takeoff_limit, layers);
    let rear_hit = tip_contact(terrain, rear_point, takeoff_limit, layers);

    ContactSample {
        contact: Contact::from_tips(front_hit.is_some(), rear_hit.is_some()),
        front_hit,
        rear_hit,
    }
}

/// Коэффициент потери скорости при приземлении
///
/// `1 / (angle_rad + k) − 0.44`, зажатый в [0, 1]: чем круче угол между
/// скоростью до и после приземления, тем больше потеря. Отрицательные значения
/// (разворот скорости) отсекаются нулём.
pub fn landing_damping(velocity_before: Vec3, velocity_after: Vec3, impact_coefficient: f32) -> f32 {
    let angle = crate::math::angle_deg(velocity_before, velocity_after).to_radians();
    let coefficient = 1.0 / (angle + impact_coefficient) - LANDING_DAMPING_OFFSET;

    coefficient.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::PlaneTerrain;

    #[test]
    fn test_contact_from_tips() {
        assert_eq!(Contact::from_tips(true, true), Contact::Full);
        assert_eq!(Contact::from_tips(true, false), Contact::Half);
        assert_eq!(Contact::from_tips(false, true), Contact::Half);
        assert_eq!(Contact::from_tips(false, false), Contact::None);
    }

    #[test]
    fn test_classify_by_gap() {
        let terrain = PlaneTerrain::horizontal(0.0);
        let limit = 0.1;

        let full = classify(&terrain, Vec3::new(0.0, 0.05, 0.6), Vec3::new(0.0, 0.09, -0.6), limit, LayerMask::ALL);
        assert_eq!(full.contact, Contact::Full);
        assert!(full.front_hit.is_some() && full.rear_hit.is_some());

        let half = classify(&terrain, Vec3::new(0.0, 0.5, 0.6), Vec3::new(0.0, 0.0, -0.6), limit, LayerMask::ALL);
        assert_eq!(half.contact, Contact::Half);
        assert!(half.front_hit.is_none());
        assert!(half.rear_hit.is_some());

        let none = classify(&terrain, Vec3::new(0.0, 0.5, 0.6), Vec3::new(0.0, 0.2, -0.6), limit, LayerMask::ALL);
        assert_eq!(none.contact, Contact::None);
    }

    #[test]
    fn test_tip_below_ground_is_in_contact() {
        let terrain = PlaneTerrain::horizontal(0.0);
        assert!(tip_contact(&terrain, Vec3::new(0.0, -0.3, 0.0), 0.1, LayerMask::ALL).is_some());
    }

    #[test]
    fn test_tracker_transitions() {
        let mut tracker = ContactTracker::default();
        assert_eq!(tracker.transition(), None);

        tracker.set(Contact::Half);
        assert_eq!(tracker.transition(), Some(ContactTransition::Found));

        tracker.set(Contact::Full);
        assert_eq!(tracker.transition(), None);

        tracker.set(Contact::None);
        assert_eq!(tracker.transition(), Some(ContactTransition::Lost));

        tracker.set(Contact::None);
        assert_eq!(tracker.transition(), None);
    }

    #[test]
    fn test_landing_damping_bounds() {
        // Прямое приземление: angle = 0 → 1/0.9 − 0.44 ≈ 0.67
        let straight = landing_damping(Vec3::Z, Vec3::Z * 2.0, 0.9);
        assert!((straight - (1.0 / 0.9 - 0.44)).abs() < 1e-4);

        // Маленький k → коэффициент упирается в 1
        assert_eq!(landing_damping(Vec3::Z, Vec3::Z, 0.1), 1.0);

        // Монотонно падает с ростом угла и не уходит ниже нуля
        let mut previous = f32::MAX;
        for step in 0..=18 {
            let angle = (step as f32 * 10.0).to_radians();
            let after = Vec3::new(angle.sin(), 0.0, angle.cos());
            let coefficient = landing_damping(Vec3::Z, after, 0.9);

            assert!(coefficient <= 1.0);
            assert!(coefficient >= 0.0);
            assert!(coefficient <= previous + 1e-6);
            previous = coefficient;
        }
        assert_eq!(previous, 0.0);
    }
}
