//! Headless прогон encounter с боссом
//!
//! Запуск: `dimwick_simulation [seed] [ticks]`
//! Протагонист кружит вокруг босса и стреляет каждые полсекунды,
//! раз в секунду печатаем состояние босса.

use std::process::ExitCode;

use bevy::prelude::*;
use dimwick_simulation::{
    create_headless_app, run_fixed_tick, spawn_boss, spawn_protagonist, BossConfig, BossIntent,
    MusicPlaylist, PlayerProjectile, ProjectileContact, ProjectileDamage, ProjectileKind,
    Protagonist, SaveStore, ServicesPlugin, Velocity, Vitality, TICK_HZ,
};

const SAVE_PATH: &str = "savedata.json";
const BULLET_DAMAGE: f32 = 4.0;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let ticks: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(1800);
    let dt = (1.0 / TICK_HZ) as f32;

    println!("Starting Dimwick headless encounter (seed: {}, ticks: {})", seed, ticks);

    let save_store = SaveStore::load(SAVE_PATH).unwrap_or_else(|err| {
        dimwick_simulation::log_error(&format!("Save data unreadable ({}), using defaults", err));
        SaveStore::in_memory(SAVE_PATH)
    });

    let mut app = create_headless_app(seed);
    app.add_plugins(ServicesPlugin { save_store });
    app.world_mut()
        .resource_mut::<MusicPlaylist>()
        .set_tracks(vec!["boss_theme_a".to_string(), "boss_theme_b".to_string()]);

    spawn_protagonist(app.world_mut(), Vec2::new(6.0, 0.0));
    let boss = match spawn_boss(app.world_mut(), Vec2::ZERO, BossConfig::default()) {
        Ok(boss) => boss,
        Err(err) => {
            eprintln!("Failed to start encounter: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut intents_seen = 0usize;

    for tick in 0..ticks {
        let time = tick as f32 * dt;
        orbit_protagonist(app.world_mut(), time);

        // Выстрел каждые 30 тиков: collision subsystem сразу сообщает о попадании
        if tick % 30 == 0 {
            let bullet = app
                .world_mut()
                .spawn((
                    PlayerProjectile {
                        kind: ProjectileKind::Bullet,
                    },
                    ProjectileDamage {
                        amount: BULLET_DAMAGE,
                    },
                ))
                .id();
            app.world_mut().send_event(ProjectileContact {
                projectile: bullet,
                target: boss,
            });
        }

        run_fixed_tick(&mut app, dt);

        // Host забирает intents (в игре здесь спавн снарядов и animation triggers)
        let intents: Vec<BossIntent> = app
            .world_mut()
            .resource_mut::<Events<BossIntent>>()
            .drain()
            .collect();
        for intent in &intents {
            println!("Tick {}: {:?}", tick, intent);
        }
        intents_seen += intents.len();

        if tick % TICK_HZ as u32 == 0 {
            let world = app.world();
            let (Some(vitality), Some(velocity)) =
                (world.get::<Vitality>(boss), world.get::<Velocity>(boss))
            else {
                continue;
            };
            println!(
                "Tick {}: boss health {:.1}/{:.1} ({:.0}%), velocity {:?}",
                tick,
                vitality.current,
                vitality.max,
                vitality.ratio() * 100.0,
                velocity.0
            );
        }
    }

    // AppExit → flush save data (schedule Last)
    app.world_mut().send_event(AppExit::Success);
    app.update();

    println!("Encounter complete! {} intents emitted", intents_seen);
    ExitCode::SUCCESS
}

/// Протагонист кружит по окружности радиуса 6 вокруг центра арены
fn orbit_protagonist(world: &mut World, time: f32) {
    let mut query = world.query_filtered::<&mut Transform, With<Protagonist>>();
    for mut transform in query.iter_mut(world) {
        let angle = time * 0.5;
        transform.translation = Vec3::new(angle.cos() * 6.0, angle.sin() * 6.0, 0.0);
    }
}
