//! Физика доски: контакт, силы, skid relaxation, интегратор

pub mod contact;
pub mod controller;
pub mod events;
pub mod forces;
pub mod landing;
pub mod skidding;

pub use contact::{Contact, ContactTracker, ContactTransition};
pub use controller::BoardPhysics;
pub use events::{ContactEvent, ContactEvents, MAX_PENDING_EVENTS};
pub use landing::{assess_landing, LandingOutcome};
pub use skidding::SkidState;

/// Максимальный наклон доски (градусы)
pub const MAX_TILT: f32 = 60.0;

/// Ускорение свободного падения (м/с²), мировая вертикаль +Y
pub const GRAVITY: f32 = 9.81;

/// |v|², ниже которого направление движения не считается значимым
pub const MIN_SIGNIFICANT_SPEED_SQR: f32 = 0.1;

/// |v|², ниже которого трение базы статическое (и доска останавливается)
pub const MIN_DYNAMIC_SPEED_SQR: f32 = 1e-2;

/// Сколько секунд после прыжка контакт не сэмплится
pub const JUMP_CONTACT_GRACE: f32 = 0.2;
