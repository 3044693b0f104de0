//! ECS glue: доски как entities
//!
//! - `update_boards` (Update): input → Snowboard::update, события контакта → Bevy events
//! - `fixed_update_boards` (FixedUpdate): силы и интегрирование
//! - `sync_board_transforms` (Update, после update_boards): pose → Transform
//!
//! Каждая доска - независимое состояние, общего mutable state между досками нет.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::board::{ContactEvent, LandingOutcome};
use crate::config::ModelParameters;
use crate::input::BoardCommand;
use crate::logger::{log, log_warning};
use crate::model::Snowboard;
use crate::terrain::TerrainQuery;

/// Доска (состояние симуляции целиком)
#[derive(Component, Debug, Clone)]
pub struct Board {
    pub snowboard: Snowboard,
}

/// Террейн для headless/ECS прогонов
///
/// В движке с коллайдерами вместо него работает RapierTerrainPlugin (feature "rapier").
#[derive(Resource)]
pub struct TerrainResource {
    pub query: Box<dyn TerrainQuery + Send + Sync>,
}

impl TerrainResource {
    pub fn new(query: impl TerrainQuery + Send + Sync + 'static) -> Self {
        Self { query: Box::new(query) }
    }
}

/// Event: доска оторвалась от земли (в том числе прыжок)
#[derive(Event, Debug, Clone)]
pub struct BoardContactLost {
    pub entity: Entity,
}

/// Event: доска приземлилась; `velocity_delta` = v_after − v_before
#[derive(Event, Debug, Clone)]
pub struct BoardContactFound {
    pub entity: Entity,
    pub velocity_delta: Vec3,
}

/// Event: опасное приземление (реакция - на стороне хоста)
#[derive(Event, Debug, Clone)]
pub struct UnsafeLanding {
    pub entity: Entity,
    pub outcome: LandingOutcome,
}

#[derive(SystemParam)]
pub struct BoardEventWriters<'w> {
    contact_lost: EventWriter<'w, BoardContactLost>,
    contact_found: EventWriter<'w, BoardContactFound>,
    unsafe_landing: EventWriter<'w, UnsafeLanding>,
}

/// Один variable-rate шаг доски + публикация событий
///
/// Общий для TerrainResource и rapier-адаптера. Jump - one-shot команда,
/// сбрасывается после применения.
pub fn step_board(
    entity: Entity,
    board: &mut Board,
    command: &mut BoardCommand,
    terrain: &dyn TerrainQuery,
    dt: f32,
    writers: &mut BoardEventWriters,
) {
    board.snowboard.update(terrain, &*command, dt);
    command.jump = false;

    for event in board.snowboard.drain_events() {
        match event {
            ContactEvent::Lost => {
                writers.contact_lost.write(BoardContactLost { entity });
            }
            ContactEvent::Found { velocity_delta } => {
                writers.contact_found.write(BoardContactFound { entity, velocity_delta });

                let outcome = board.snowboard.assess_landing(velocity_delta);
                if !outcome.is_safe() {
                    log_warning(&format!("Unsafe landing of {:?}: {:?}", entity, outcome));
                    writers.unsafe_landing.write(UnsafeLanding { entity, outcome });
                }
            }
        }
    }
}

/// Система: variable-rate шаг всех досок
pub fn update_boards(
    terrain: Res<TerrainResource>,
    time: Res<Time>,
    mut boards: Query<(Entity, &mut Board, &mut BoardCommand)>,
    mut writers: BoardEventWriters,
) {
    let dt = time.delta_secs();

    for (entity, mut board, mut command) in boards.iter_mut() {
        step_board(entity, &mut board, &mut command, &*terrain.query, dt, &mut writers);
    }
}

/// Система: fixed-rate шаг всех досок
pub fn fixed_update_boards(mut boards: Query<&mut Board>, time: Res<Time<Fixed>>) {
    let dt = time.delta_secs();

    for mut board in boards.iter_mut() {
        board.snowboard.fixed_update(dt);
    }
}

/// Система: pose доски → Transform
pub fn sync_board_transforms(mut boards: Query<(&Board, &mut Transform)>) {
    for (board, mut transform) in boards.iter_mut() {
        transform.translation = board.snowboard.position();
        transform.rotation = board.snowboard.rotation();
    }
}

/// Spawn helper: доска с reset'ом на стартовую скорость из параметров
pub fn spawn_board(commands: &mut Commands, position: Vec3, rotation: Quat, parameters: ModelParameters) -> Entity {
    let mut snowboard = Snowboard::new(position, rotation, parameters);
    let start_speed = snowboard.physics_parameters().start_speed;
    snowboard.reset(position, rotation, start_speed);

    let entity = commands
        .spawn((
            Board { snowboard },
            BoardCommand::default(),
            Transform::from_translation(position).with_rotation(rotation),
        ))
        .id();

    log(&format!("Spawned board {:?} at {:?}", entity, position));
    entity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::PlaneTerrain;

    #[test]
    fn test_terrain_resource_wraps_query() {
        let resource = TerrainResource::new(PlaneTerrain::horizontal(1.0));
        let hit = crate::terrain::cast_down(&*resource.query, Vec3::new(0.0, 5.0, 0.0), 1.0, 20.0, Default::default());

        assert!(hit.is_some());
        assert!((hit.map(|hit| hit.point.y).unwrap_or_default() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_sync_board_transforms() {
        let mut world = World::new();
        let snowboard = Snowboard::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_y(0.3), ModelParameters::default());
        let entity = world.spawn((Board { snowboard }, Transform::default())).id();

        let mut schedule = Schedule::default();
        schedule.add_systems(sync_board_transforms);
        schedule.run(&mut world);

        let transform = world.get::<Transform>(entity).copied().unwrap_or_default();
        assert!((transform.translation - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
        assert!(transform.rotation.angle_between(Quat::from_rotation_y(0.3)) < 1e-5);
    }
}
