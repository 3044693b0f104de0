//! Headless симуляция сноуборда
//!
//! Одна доска на процедурном склоне, простой "райдер": змейка по склону,
//! прыжок раз в несколько секунд, торможение в конце.

use bevy::prelude::*;
use snowboard_simulation::{
    create_headless_app, logger, procedural_course, spawn_board, Board, BoardCommand, DeterministicRng,
    ModelParameters, TerrainError, TerrainResource,
};

const TICK_COUNT: u32 = 1200;

fn main() -> Result<(), TerrainError> {
    let seed = 42;
    println!("Starting snowboard headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    logger::set_log_level(logger::LogLevel::Info);

    let terrain = procedural_course(&mut app.world_mut().resource_mut::<DeterministicRng>())?;
    let start = Vec3::new(0.0, terrain.sample_height(0.0, 2.0) + 0.05, 2.0);
    app.insert_resource(TerrainResource::new(terrain));

    let board = {
        let mut commands = app.world_mut().commands();
        let entity = spawn_board(&mut commands, start, Quat::IDENTITY, ModelParameters::default());
        entity
    };
    app.world_mut().flush();

    for tick in 0..TICK_COUNT {
        let time = tick as f32 / 60.0;
        if let Some(mut command) = app.world_mut().get_mut::<BoardCommand>(board) {
            command.turning = (time * 0.8).sin();
            command.speeding = if tick > TICK_COUNT - 180 { -1.0 } else { 0.0 };
            command.jump = tick % 300 == 150;
        }

        app.update();

        if tick % 100 == 0 {
            if let Some(board) = app.world().get::<Board>(board) {
                let snowboard = &board.snowboard;
                println!(
                    "Tick {}: position {:.2?}, speed {:.2} m/s, contact {:?}",
                    tick,
                    snowboard.position(),
                    snowboard.velocity().length(),
                    snowboard.contact()
                );
            }
        }
    }

    println!("Simulation complete!");
    Ok(())
}
