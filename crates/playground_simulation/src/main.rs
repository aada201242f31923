//! Headless прогон песочницы
//!
//! Terrain, несколько ящиков, пара NPC и гранаты, брошенные в ящики.
//! 10 секунд симуляции (600 тиков при 60Hz) без рендера и wall clock.

use bevy::prelude::*;
use std::time::Duration;

use playground_simulation::spawn::{spawn_box, spawn_fire, spawn_grenade, spawn_npc, spawn_terrain};
use playground_simulation::{
    create_headless_app_with_config, log_error, log_info, step_simulation, AgentBehavior, DestructionController,
    ObjectKind, SimClock, SimulationConfig,
};

const TICK_COUNT: usize = 600;

fn main() {
    let config = SimulationConfig::default();
    let seed = config.seed;

    let mut app = match create_headless_app_with_config(config.clone()) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("Invalid simulation config: {}", err);
            std::process::exit(1);
        }
    };

    log_info(&format!("Starting playground headless simulation (seed: {})", seed));

    {
        let mut commands = app.world_mut().commands();
        spawn_terrain(&mut commands, 128.0);

        for i in 0..3 {
            spawn_box(&mut commands, &config, Vec3::new(18.0 + i as f32 * 2.5, 1.0, 0.0));
        }
        spawn_fire(&mut commands, Vec3::new(0.0, 0.0, 20.0));
        for i in 0..2 {
            spawn_npc(&mut commands, &config, Vec3::new(-5.0, 0.0, i as f32 * 4.0));
        }

        // Три гранаты между ящиками: ящики уходят в ноль и взрываются цепочкой
        for _ in 0..3 {
            spawn_grenade(&mut commands, &config, Duration::ZERO, Vec3::new(20.5, 1.0, 0.0), Vec3::ZERO);
        }
    }
    app.world_mut().flush();

    for tick in 0..TICK_COUNT {
        step_simulation(app.world_mut());

        if tick % 60 == 0 {
            report(app.world_mut(), tick);
        }
    }

    let remaining_boxes = count_kind(app.world_mut(), ObjectKind::Box);
    if remaining_boxes > 0 {
        log_error(&format!("{} boxes survived the grenades", remaining_boxes));
    }

    log_info("Simulation complete!");
}

fn report(world: &mut World, tick: usize) {
    let now = world.resource::<SimClock>().now();

    let mut healths = world.query::<(&ObjectKind, &DestructionController)>();
    let box_health: Vec<i32> = healths
        .iter(world)
        .filter(|(kind, _)| **kind == ObjectKind::Box)
        .filter_map(|(_, controller)| controller.display_health())
        .collect();

    let mut agents = world.query::<&AgentBehavior>();
    let walking = agents
        .iter(world)
        .filter(|behavior| behavior.movement() != Vec3::ZERO)
        .count();

    log_info(&format!(
        "Tick {} ({}ms): {} entities, boxes {:?}, {} agents walking",
        tick,
        now.as_millis(),
        world.entities().len(),
        box_health,
        walking
    ));
}

fn count_kind(world: &mut World, kind: ObjectKind) -> usize {
    let mut query = world.query::<&ObjectKind>();
    query.iter(world).filter(|k| **k == kind).count()
}
