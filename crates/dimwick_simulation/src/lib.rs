//! Dimwick Simulation Core
//!
//! Headless ECS-симуляция босса на Bevy 0.16:
//! - MovementPlanner: wander / dash к протагонисту, сглаживание velocity
//! - CombatScheduler: cooldown + weighted policy (ranged, area effect, dash, heal)
//! - Vitality: урон от снарядов игрока, heal-over-time
//!
//! Host (движок/рендер) владеет Transform, collision detection и presentation;
//! core читает позиции, получает ProjectileContact и пишет Velocity + BossIntent.

use std::time::Duration;

use bevy::ecs::event::event_update_system;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod encounter;
pub mod error;
pub mod logger;
pub mod physics;
pub mod services;

// Re-export базовых типов для удобства
pub use ai::{BossAction, BossAiPlugin, CombatScheduler, DashRequested, MovementPlanner};
pub use combat::{
    BossIntent, CombatPlugin, DamageDealt, DamageEvent, DamageSource, PlayerProjectile,
    ProjectileContact, ProjectileDamage, ProjectileKind, VisualEffect, VitalityDepleted,
};
pub use components::*;
pub use encounter::{EncounterCleared, EncounterPlugin, ExitGate, GateOpened};
pub use error::{Result, SimulationError};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel,
    LogPrinter,
};
pub use physics::KinematicPlugin;
pub use services::{AudioService, MusicPlaylist, SaveStore, ServicesPlugin, SoundCue};

/// Частота fixed тика по умолчанию
pub const TICK_HZ: f64 = 60.0;

/// Фазы одного тика (FixedUpdate), выполняются строго по порядку
///
/// Combat перед Movement: DashRequested из Combat должен дойти до
/// MovementPlanner в том же тике.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    /// Contacts → DamageEvent → Vitality
    Intake,
    /// CombatScheduler + heal-over-time
    Combat,
    /// MovementPlanner
    Movement,
    /// Velocity → Transform (только headless)
    Physics,
    /// Популяция врагов → двери
    Encounter,
    /// Audio cues
    Services,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// KinematicPlugin и ServicesPlugin добавляются отдельно: в игре
/// позицию двигает host physics, а save store знает путь к файлу.
pub struct SimulationPlugin {
    pub seed: u64,
}

impl Default for SimulationPlugin {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            .insert_resource(DeterministicRng::new(self.seed))
            .configure_sets(
                FixedUpdate,
                (
                    TickSet::Intake,
                    TickSet::Combat,
                    TickSet::Movement,
                    TickSet::Physics,
                    TickSet::Encounter,
                    TickSet::Services,
                )
                    .chain(),
            )
            .register_type::<Boss>()
            .register_type::<Vitality>()
            .register_type::<Velocity>()
            .register_type::<BossConfig>()
            .add_plugins((CombatPlugin, BossAiPlugin, EncounterPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Все random draws симуляции идут через него: wander heading,
/// cooldown reseed, policy roll, поворот снаряда.
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

/// Создаёт headless App: MinimalPlugins + симуляция + kinematic physics
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins((SimulationPlugin { seed }, KinematicPlugin));

    app
}

/// Один тик симуляции с явным dt (секунды)
///
/// Для host'ов с собственным циклом (fixed или variable dt) и тестов:
/// не зависит от wall-clock, в отличие от `App::update`.
///
/// После FixedUpdate делает то же обслуживание, что `App::update`:
/// swap event буферов и очистка removal trackers. Без этого каждое
/// отправленное событие остаётся в `Events<T>` до конца encounter.
pub fn run_fixed_tick(app: &mut App, dt: f32) {
    let world = app.world_mut();
    world
        .resource_mut::<Time<Fixed>>()
        .advance_by(sanitize_dt(dt));
    world.run_schedule(FixedUpdate);

    if let Err(err) = world.run_system_cached(event_update_system) {
        log_error(&format!("run_fixed_tick: event update failed: {:?}", err));
    }
    world.clear_trackers();
}

/// NaN/inf/отрицательный или непредставимый dt → пустой тик (timers не двигаются)
fn sanitize_dt(dt: f32) -> Duration {
    if !dt.is_finite() || dt <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f32(dt).unwrap_or_else(|_| {
        log_warning(&format!("run_fixed_tick: dt {} out of range, skipping tick", dt));
        Duration::ZERO
    })
}

/// Спавнит протагониста (цель dash) в точке XY
pub fn spawn_protagonist(world: &mut World, position: Vec2) -> Entity {
    world
        .spawn((Protagonist, Transform::from_translation(position.extend(0.0))))
        .id()
}

/// Спавнит босса encounter
///
/// Fail fast: без единственного протагониста, с невалидным конфигом
/// или при уже существующем боссе новый не создаётся вовсе.
pub fn spawn_boss(world: &mut World, position: Vec2, config: BossConfig) -> Result<Entity> {
    config.validate()?;

    let existing = world
        .query_filtered::<Entity, With<Boss>>()
        .iter(world)
        .next();
    if let Some(existing) = existing {
        return Err(SimulationError::BossAlreadySpawned(existing));
    }

    let protagonists = world
        .query_filtered::<Entity, With<Protagonist>>()
        .iter(world)
        .count();
    match protagonists {
        0 => return Err(SimulationError::ProtagonistMissing),
        1 => {}
        n => return Err(SimulationError::AmbiguousProtagonist(n)),
    }

    let scheduler = match world.get_resource_mut::<DeterministicRng>() {
        Some(mut rng) => CombatScheduler::new(&config, &mut rng.rng),
        None => {
            log_warning("spawn_boss: no DeterministicRng resource, seeding scheduler from 0");
            CombatScheduler::new(&config, &mut ChaCha8Rng::seed_from_u64(0))
        }
    };

    let boss = world
        .spawn((
            Boss,
            Transform::from_translation(position.extend(0.0)),
            Vitality::new(config.max_health),
            Velocity::default(),
            MovementPlanner::new(&config),
            scheduler,
            config,
        ))
        .id();

    log_info(&format!("Boss {:?} spawned at {:?}", boss, position));
    Ok(boss)
}

/// Snapshot мира для сравнения детерминизма
///
/// Entities сортируются по index, компонент сериализуется через Debug.
pub fn world_snapshot<T: Component + std::fmt::Debug>(world: &mut World) -> Vec<u8> {
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
