//! Террейн поверх коллайдеров Rapier (feature "rapier")
//!
//! LayerMask → CollisionGroups: луч видит коллайдер, если memberships коллайдера
//! пересекаются с маской. Доски коллайдеров не имеют - физика своя, Rapier
//! используется только как raycast-провайдер.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::{LayerMask, RaycastHit, TerrainQuery};
use crate::input::BoardCommand;
use crate::logger::log_warning;
use crate::systems::{step_board, sync_board_transforms, Board, BoardEventWriters};

/// Raycast'ы по query pipeline текущего RapierContext
pub struct RapierTerrain<'a, 'c> {
    context: &'a RapierContext<'c>,
}

impl<'a, 'c> RapierTerrain<'a, 'c> {
    pub fn new(context: &'a RapierContext<'c>) -> Self {
        Self { context }
    }
}

/// Фильтр запроса для маски слоёв террейна
pub fn terrain_filter(layers: LayerMask) -> QueryFilter<'static> {
    QueryFilter::default().groups(CollisionGroups::new(Group::ALL, Group::from_bits_truncate(layers.0)))
}

impl TerrainQuery for RapierTerrain<'_, '_> {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, layers: LayerMask) -> Option<RaycastHit> {
        let (_, intersection) =
            self.context
                .cast_ray_and_get_normal(origin, direction, max_distance, true, terrain_filter(layers))?;

        Some(RaycastHit {
            point: intersection.point,
            normal: intersection.normal,
        })
    }
}

/// Система: variable-rate шаг досок по коллайдерам Rapier
pub fn update_boards_on_colliders(
    context: ReadRapierContext,
    time: Res<Time>,
    mut boards: Query<(Entity, &mut Board, &mut BoardCommand)>,
    mut writers: BoardEventWriters,
) {
    let context = match context.single() {
        Ok(context) => context,
        Err(error) => {
            log_warning(&format!("Boards skipped: no rapier context ({:?})", error));
            return;
        }
    };

    let terrain = RapierTerrain::new(&context);
    let dt = time.delta_secs();

    for (entity, mut board, mut command) in boards.iter_mut() {
        step_board(entity, &mut board, &mut command, &terrain, dt, &mut writers);
    }
}

/// Доски на коллайдерах Rapier
///
/// Добавляется вместе с SnowboardPlugin (события, fixed step) и без
/// TerrainResource: тогда встроенный update_boards не запускается.
pub struct RapierTerrainPlugin;

impl Plugin for RapierTerrainPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            update_boards_on_colliders.before(sync_board_transforms),
        );
    }
}
