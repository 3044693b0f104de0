//! Snowboard Simulation Core
//!
//! Аркадная физика сноуборда: одна доска как точечная масса, ориентированная по
//! склону, без rigid body solver'а.
//!
//! Слои:
//! - `board` - контакт, силы, интегратор (`BoardPhysics`)
//! - `model` - `Snowboard`: параметры + input + физика
//! - `terrain` - raycast-провайдеры и оценка склона
//! - `systems` - Bevy ECS glue (доски как entities)
//!
//! Детерминизм: fixed timestep (60Hz), никакого глобального mutable state кроме logger'а.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// Публичные модули
pub mod board;
pub mod config;
pub mod error;
pub mod input;
pub mod logger;
pub mod math;
pub mod model;
pub mod scheduler;
pub mod systems;
pub mod terrain;

// Re-export основного API
pub use board::{BoardPhysics, Contact, ContactEvent, LandingOutcome, MAX_TILT};
pub use config::{derive, ModelParameters, PhysicsParameters};
pub use error::{ParameterError, TerrainError};
pub use input::{BoardCommand, BoardInput};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel, LogPrinter};
pub use model::Snowboard;
pub use systems::{
    spawn_board, Board, BoardContactFound, BoardContactLost, TerrainResource, UnsafeLanding,
};
pub use terrain::{EmptyTerrain, HeightFieldTerrain, LayerMask, PlaneTerrain, RaycastHit, TerrainQuery};

#[cfg(feature = "rapier")]
pub use terrain::rapier::{RapierTerrain, RapierTerrainPlugin};

/// Частота fixed-rate шага (силы, интегрирование)
pub const FIXED_HZ: f64 = 60.0;

/// Главный plugin симуляции досок
pub struct SnowboardPlugin;

impl Plugin for SnowboardPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для сил и интегрирования
            .insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
            .register_type::<BoardCommand>()
            .add_event::<BoardContactLost>()
            .add_event::<BoardContactFound>()
            .add_event::<UnsafeLanding>()
            .add_systems(
                Update,
                (
                    systems::update_boards.run_if(resource_exists::<TerrainResource>),
                    systems::sync_board_transforms,
                )
                    .chain(),
            )
            .add_systems(FixedUpdate, systems::fixed_update_boards);
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Процедурная трасса: склон ~20° с буграми, seed берётся из RNG
pub fn procedural_course(rng: &mut DeterministicRng) -> Result<HeightFieldTerrain, TerrainError> {
    let terrain_seed: u64 = rng.rng.gen();
    HeightFieldTerrain::procedural_slope(terrain_seed, UVec2::new(41, 161), Vec2::splat(1.0), 20.0, 0.6)
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время шагает вручную по 1/60 сек на `app.update()` - один fixed tick на update.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / FIXED_HZ)))
        .add_plugins(SnowboardPlugin);

    app
}

/// Состояние одной доски для сравнения прогонов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub entity: u32,
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub velocity: [f32; 3],
    pub contact: Contact,
}

impl BoardSnapshot {
    pub fn capture(entity: Entity, snowboard: &Snowboard) -> Self {
        Self {
            entity: entity.index(),
            position: snowboard.position().to_array(),
            rotation: snowboard.rotation().to_array(),
            velocity: snowboard.velocity().to_array(),
            contact: snowboard.contact(),
        }
    }
}

/// Snapshot всех досок мира (JSON, отсортирован по Entity ID)
pub fn world_snapshot(world: &mut World) -> Result<Vec<u8>, serde_json::Error> {
    let mut query = world.query::<(Entity, &Board)>();
    let mut boards: Vec<BoardSnapshot> = query
        .iter(world)
        .map(|(entity, board)| BoardSnapshot::capture(entity, &board.snowboard))
        .collect();

    // Сортируем по Entity ID для детерминизма
    boards.sort_by_key(|snapshot| snapshot.entity);

    serde_json::to_vec(&boards)
}
