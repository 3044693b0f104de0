//! Сценарные тесты модели доски (без ECS)
//!
//! Доска гоняется напрямую через Snowboard с фиксированным dt: update + fixed_update
//! на каждый кадр, как в хосте с 60 FPS.

use bevy::prelude::*;
use snowboard_simulation::{
    procedural_course, BoardCommand, Contact, ContactEvent, DeterministicRng, LayerMask, ModelParameters,
    PlaneTerrain, Snowboard, TerrainQuery,
};

const DT: f32 = 1.0 / 60.0;

/// Итоги прогона
#[derive(Debug, Default)]
struct RunStats {
    grounded_ticks: usize,
    contact_lost: usize,
    contact_found: usize,
    landing_deltas: Vec<Vec3>,
}

fn run(
    snowboard: &mut Snowboard,
    terrain: &dyn TerrainQuery,
    ticks: usize,
    mut command: impl FnMut(usize) -> BoardCommand,
) -> RunStats {
    let mut stats = RunStats::default();

    for tick in 0..ticks {
        snowboard.update(terrain, &command(tick), DT);
        snowboard.fixed_update(DT);

        if snowboard.contact().is_grounded() {
            stats.grounded_ticks += 1;
        }

        for event in snowboard.drain_events() {
            match event {
                ContactEvent::Lost => stats.contact_lost += 1,
                ContactEvent::Found { velocity_delta } => {
                    stats.contact_found += 1;
                    stats.landing_deltas.push(velocity_delta);
                }
            }
        }
    }

    stats
}

fn board_on_slope(terrain: &PlaneTerrain, z: f32, speed: f32) -> Snowboard {
    let position = Vec3::new(0.0, terrain.height_at(0.0, z), z);
    let mut snowboard = Snowboard::new(position, Quat::IDENTITY, ModelParameters::default());
    snowboard.reset(position, Quat::IDENTITY, speed);
    snowboard
}

#[test]
fn test_straight_run_down_procedural_course() {
    let mut rng = DeterministicRng::new(7);
    let terrain = procedural_course(&mut rng).expect("course grid is valid");
    let start = Vec3::new(0.0, terrain.sample_height(0.0, 2.0) + 0.05, 2.0);

    let mut snowboard = Snowboard::new(start, Quat::IDENTITY, ModelParameters::default());
    snowboard.reset(start, Quat::IDENTITY, 5.0);

    let stats = run(&mut snowboard, &terrain, 300, |_| BoardCommand::default());

    assert!(stats.grounded_ticks > 150, "grounded only {} of 300 ticks", stats.grounded_ticks);
    assert!(snowboard.position().z > start.z + 20.0);
    assert!(snowboard.position().y < start.y - 5.0);
    assert!(snowboard.velocity().length() > 5.0);
}

#[test]
fn test_carving_turns_toward_tilt() {
    let terrain = PlaneTerrain::slope(20.0);

    for (turning, side) in [(1.0, 1.0), (-1.0, -1.0)] {
        let mut snowboard = board_on_slope(&terrain, 0.0, 6.0);
        run(&mut snowboard, &terrain, 60, |_| BoardCommand {
            turning,
            ..Default::default()
        });

        let forward = snowboard.physics().forward();
        assert!(forward.x * side > 0.1, "turning {} forward {:?}", turning, forward);
        assert_eq!(snowboard.contact(), Contact::Full);
    }
}

#[test]
fn test_jump_and_land() {
    let terrain = PlaneTerrain::slope(15.0);
    let mut snowboard = board_on_slope(&terrain, 0.0, 6.0);

    // Встать на склон
    run(&mut snowboard, &terrain, 30, |_| BoardCommand::default());
    assert_eq!(snowboard.contact(), Contact::Full);

    let stats = run(&mut snowboard, &terrain, 180, |tick| BoardCommand {
        jump: tick == 0,
        ..Default::default()
    });

    assert_eq!(stats.contact_lost, 1);
    assert_eq!(stats.contact_found, 1);
    assert!(stats.grounded_ticks < 180);
    assert_eq!(snowboard.contact(), Contact::Full);

    // Приземление гасит нормальную к склону составляющую скорости
    let normal = terrain.normal;
    let delta = stats.landing_deltas[0];
    assert!(delta.dot(normal) > 0.0, "landing delta {:?}", delta);
}

#[test]
fn test_braking_is_slower_than_free_run() {
    let terrain = PlaneTerrain::slope(20.0);

    let mut free = board_on_slope(&terrain, 0.0, 8.0);
    run(&mut free, &terrain, 180, |_| BoardCommand::default());

    let mut braking = board_on_slope(&terrain, 0.0, 8.0);
    run(&mut braking, &terrain, 180, |_| BoardCommand {
        speeding: -1.0,
        ..Default::default()
    });

    assert!(
        braking.velocity().length() < free.velocity().length() * 0.5,
        "braking {} free {}",
        braking.velocity().length(),
        free.velocity().length()
    );
}

#[test]
fn test_stop_brings_board_to_rest() {
    let terrain = PlaneTerrain::slope(10.0);
    let mut snowboard = board_on_slope(&terrain, 0.0, 10.0);
    run(&mut snowboard, &terrain, 30, |_| BoardCommand::default());

    snowboard.stop();
    run(&mut snowboard, &terrain, 600, |_| BoardCommand {
        turning: 1.0,
        speeding: 1.0,
        ..Default::default()
    });

    assert!(snowboard.velocity().length() < 0.5, "speed {}", snowboard.velocity().length());
}

#[test]
fn test_terrain_on_other_layer_is_invisible() {
    let terrain = PlaneTerrain::horizontal(0.0).with_layer(LayerMask::layer(3));
    let parameters = ModelParameters {
        terrain_layers: LayerMask::layer(4),
        ..Default::default()
    };

    let mut snowboard = Snowboard::new(Vec3::Y * 0.05, Quat::IDENTITY, parameters);
    snowboard.reset(Vec3::Y * 0.05, Quat::IDENTITY, 0.0);

    let stats = run(&mut snowboard, &terrain, 30, |_| BoardCommand::default());

    assert_eq!(stats.grounded_ticks, 0);
    assert!(snowboard.position().y < -0.5);

    // Тот же террейн на нужном слое - доска стоит
    snowboard.model_parameters_mut().terrain_layers = LayerMask::layer(3);
    snowboard.reset(Vec3::Y * 0.05, Quat::IDENTITY, 0.0);
    let stats = run(&mut snowboard, &terrain, 30, |_| BoardCommand::default());

    assert_eq!(stats.grounded_ticks, 30);
    assert_eq!(stats.contact_found, 1);
}

#[test]
fn test_repeated_landings_fire_matching_events() {
    let terrain = PlaneTerrain::horizontal(0.0);
    let mut snowboard = Snowboard::new(Vec3::ZERO, Quat::IDENTITY, ModelParameters::default());
    snowboard.reset(Vec3::ZERO, Quat::IDENTITY, 3.0);

    // Прыжок каждую секунду, последний успевает приземлиться
    let stats = run(&mut snowboard, &terrain, 330, |tick| BoardCommand {
        jump: tick % 60 == 30,
        ..Default::default()
    });

    assert_eq!(stats.contact_lost, 5);
    // Первое касание после reset + по одному после каждого прыжка
    assert_eq!(stats.contact_found, 6);
}
