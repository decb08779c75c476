//! Boss encounter integration test
//!
//! Полный тик (Intake → Combat → Movement → Physics) на headless App.
//!
//! Проверяем:
//! - dash доходит до MovementPlanner в том же тике
//! - heal-over-time через Vitality
//! - intents (снаряд, darkWave pulse)
//! - инварианты HP/скорости на длинном прогоне

use bevy::prelude::*;
use dimwick_simulation::ai::{ActionTable, ActionWeight, MoveMode};
use dimwick_simulation::*;

const DT: f32 = 1.0 / 60.0;

/// Helper: конфиг, где policy всегда выбирает одно действие
fn config_with_only(action: BossAction) -> BossConfig {
    BossConfig {
        action_weights: ActionTable::new(vec![ActionWeight {
            action,
            weight: 1.0,
        }])
        .expect("valid table"),
        ..Default::default()
    }
}

/// Helper: App с протагонистом и боссом
fn setup(seed: u64, config: BossConfig) -> (App, Entity, Entity) {
    let mut app = create_headless_app(seed);
    let protagonist = spawn_protagonist(app.world_mut(), Vec2::new(3.0, 4.0));
    let boss = spawn_boss(app.world_mut(), Vec2::ZERO, config).expect("boss spawns");
    (app, boss, protagonist)
}

fn expire_cooldown(app: &mut App, boss: Entity) {
    app.world_mut()
        .get_mut::<CombatScheduler>(boss)
        .expect("scheduler")
        .cooldown_timer = 0.0;
}

fn drain_intents(app: &mut App) -> Vec<BossIntent> {
    app.world_mut()
        .resource_mut::<Events<BossIntent>>()
        .drain()
        .collect()
}

#[test]
fn test_dash_reaches_planner_in_same_tick() {
    let (mut app, boss, _) = setup(1, config_with_only(BossAction::ArmDash));
    expire_cooldown(&mut app, boss);
    app.world_mut()
        .get_mut::<MovementPlanner>(boss)
        .unwrap()
        .replan_timer = 0.0;

    run_fixed_tick(&mut app, DT);

    let planner = app.world().get::<MovementPlanner>(boss).unwrap();
    assert_eq!(planner.mode, MoveMode::Dash, "dash must not lag a tick");
    assert!(!planner.dash_armed);
    assert!((planner.target_velocity.length() - 8.0).abs() < 1e-4);

    // Протагонист в (3, 4) → направление (0.6, 0.8)
    let direction = planner.target_velocity.normalize();
    assert!((direction - Vec2::new(0.6, 0.8)).length() < 1e-5);
}

#[test]
fn test_armed_dash_waits_for_replan() {
    let (mut app, boss, _) = setup(2, config_with_only(BossAction::ArmDash));
    expire_cooldown(&mut app, boss);

    run_fixed_tick(&mut app, DT);

    // replan_timer ещё 5 секунд - dash взведён, но не исполнен
    let planner = app.world().get::<MovementPlanner>(boss).unwrap();
    assert!(planner.dash_armed);
    assert_eq!(planner.mode, MoveMode::Wander);
}

#[test]
fn test_heal_over_time_restores_fixed_share() {
    let (mut app, boss, _) = setup(3, config_with_only(BossAction::Heal));
    app.world_mut().get_mut::<Vitality>(boss).unwrap().current = 100.0;
    expire_cooldown(&mut app, boss);

    // max 200, ratio 0.1, duration 2s, dt 0.1 × 20
    let mut intents = Vec::new();
    for _ in 0..20 {
        run_fixed_tick(&mut app, 0.1);
        intents.extend(drain_intents(&mut app));
    }

    let vitality = app.world().get::<Vitality>(boss).unwrap();
    assert!(
        (vitality.current - 120.0).abs() < 1e-3,
        "health = {}",
        vitality.current
    );

    let scheduler = app.world().get::<CombatScheduler>(boss).unwrap();
    assert!(!scheduler.is_healing() || scheduler.heal_timer < 1e-4);

    assert!(intents.contains(&BossIntent::HealStarted { boss }));
}

#[test]
fn test_heal_never_exceeds_max_health() {
    let (mut app, boss, _) = setup(4, config_with_only(BossAction::Heal));
    app.world_mut().get_mut::<Vitality>(boss).unwrap().current = 195.0;
    expire_cooldown(&mut app, boss);

    for _ in 0..30 {
        run_fixed_tick(&mut app, 0.1);
    }

    let vitality = app.world().get::<Vitality>(boss).unwrap();
    assert_eq!(vitality.current, 200.0);
}

#[test]
fn test_area_effect_is_a_pulse() {
    let (mut app, boss, _) = setup(5, config_with_only(BossAction::AreaEffect));
    expire_cooldown(&mut app, boss);

    run_fixed_tick(&mut app, DT);
    assert_eq!(
        drain_intents(&mut app),
        vec![BossIntent::TriggerVisualEffect {
            boss,
            effect: VisualEffect::DarkWave
        }]
    );

    run_fixed_tick(&mut app, DT);
    assert_eq!(
        drain_intents(&mut app),
        vec![BossIntent::ClearVisualEffect {
            boss,
            effect: VisualEffect::DarkWave
        }]
    );

    run_fixed_tick(&mut app, DT);
    assert!(drain_intents(&mut app).is_empty());
}

#[test]
fn test_ranged_attack_spawns_at_boss_position() {
    let (mut app, boss, _) = setup(6, config_with_only(BossAction::RangedAttack));
    app.world_mut()
        .get_mut::<Transform>(boss)
        .unwrap()
        .translation = Vec3::new(-2.0, 7.0, 0.0);
    expire_cooldown(&mut app, boss);

    run_fixed_tick(&mut app, DT);

    let intents = drain_intents(&mut app);
    assert_eq!(intents.len(), 1);
    let BossIntent::SpawnProjectile {
        boss: owner,
        position,
        rotation_deg,
    } = intents[0]
    else {
        panic!("expected projectile, got {:?}", intents[0]);
    };
    assert_eq!(owner, boss);
    assert_eq!(position, Vec2::new(-2.0, 7.0));
    assert!((0.0..360.0).contains(&rotation_deg));
}

#[test]
fn test_no_action_while_cooling_down() {
    let (mut app, boss, _) = setup(7, BossConfig::default());
    app.world_mut()
        .get_mut::<CombatScheduler>(boss)
        .unwrap()
        .cooldown_timer = 1.0;

    // 0.9 секунды: cooldown не истекает
    for _ in 0..9 {
        let before = app.world().get::<CombatScheduler>(boss).unwrap().cooldown_timer;
        run_fixed_tick(&mut app, 0.1);
        let after = app.world().get::<CombatScheduler>(boss).unwrap().cooldown_timer;
        assert!((after - (before - 0.1)).abs() < 1e-5);
    }

    assert!(drain_intents(&mut app).is_empty());
    let planner = app.world().get::<MovementPlanner>(boss).unwrap();
    assert!(!planner.dash_armed);
}

#[test]
fn test_projectile_hit_lands_before_ai() {
    let (mut app, boss, _) = setup(8, BossConfig::default());
    let bullet = app
        .world_mut()
        .spawn((
            PlayerProjectile {
                kind: ProjectileKind::FlameSlash,
            },
            ProjectileDamage { amount: 25.0 },
        ))
        .id();
    app.world_mut().send_event(ProjectileContact {
        projectile: bullet,
        target: boss,
    });

    run_fixed_tick(&mut app, DT);

    let vitality = app.world().get::<Vitality>(boss).unwrap();
    assert_eq!(vitality.current, 175.0);
    assert!((vitality.ratio() - 0.875).abs() < 1e-6);
    assert!(!app.world().entities().contains(bullet));
}

#[test]
fn test_long_run_invariants() {
    let (mut app, boss, _) = setup(9, BossConfig::default());
    let config = BossConfig::default();
    let max_speed = config.base_speed.max(config.dash_speed) + 1e-3;

    // 60 секунд боя, попадание раз в секунду
    for tick in 0..3600 {
        if tick % 60 == 0 {
            let bullet = app
                .world_mut()
                .spawn((
                    PlayerProjectile {
                        kind: ProjectileKind::Bullet,
                    },
                    ProjectileDamage { amount: 2.0 },
                ))
                .id();
            app.world_mut().send_event(ProjectileContact {
                projectile: bullet,
                target: boss,
            });
        }

        run_fixed_tick(&mut app, DT);
        drain_intents(&mut app);

        let world = app.world();
        let vitality = world.get::<Vitality>(boss).unwrap();
        assert!(
            vitality.current >= 0.0 && vitality.current <= vitality.max,
            "Tick {}: health {} out of [0, {}]",
            tick,
            vitality.current,
            vitality.max
        );

        let velocity = world.get::<Velocity>(boss).unwrap();
        assert!(velocity.0.is_finite());
        assert!(
            velocity.0.length() <= max_speed,
            "Tick {}: speed {} above {}",
            tick,
            velocity.0.length(),
            max_speed
        );

        let scheduler = world.get::<CombatScheduler>(boss).unwrap();
        assert!(scheduler.cooldown_timer <= config.max_cooldown);
    }
}

fn buffered<E: Event>(app: &App) -> usize {
    app.world().resource::<Events<E>>().len()
}

#[test]
fn test_event_buffers_stay_bounded() {
    let (mut app, boss, _) = setup(12, BossConfig::default());

    // 100 секунд: попадание и убитый Enemy каждые 10 тиков, intents не дренируем
    for tick in 0..6000 {
        if tick % 10 == 0 {
            let bullet = app
                .world_mut()
                .spawn((
                    PlayerProjectile {
                        kind: ProjectileKind::Bullet,
                    },
                    ProjectileDamage { amount: 0.5 },
                ))
                .id();
            app.world_mut().send_event(ProjectileContact {
                projectile: bullet,
                target: boss,
            });

            let enemy = app.world_mut().spawn(Enemy).id();
            app.world_mut().despawn(enemy);
        }

        run_fixed_tick(&mut app, DT);

        // Double buffer: не больше двух тиков событий
        assert!(buffered::<ProjectileContact>(&app) <= 2, "Tick {}", tick);
        assert!(buffered::<DamageEvent>(&app) <= 2, "Tick {}", tick);
        assert!(buffered::<DamageDealt>(&app) <= 2, "Tick {}", tick);
        assert!(buffered::<DashRequested>(&app) <= 2, "Tick {}", tick);
        assert!(buffered::<EncounterCleared>(&app) <= 2, "Tick {}", tick);
        // Clear + новое действие в одном тике → максимум 2 intent за тик
        assert!(buffered::<BossIntent>(&app) <= 4, "Tick {}", tick);
        assert!(app.world().removed::<Enemy>().count() <= 2, "Tick {}", tick);
    }

    // Все снаряды поглощены, swap буферов не потерял contacts
    let world = app.world_mut();
    let leftover = world.query::<&PlayerProjectile>().iter(world).count();
    assert_eq!(leftover, 0);
}

#[test]
fn test_protagonist_despawn_does_not_crash() {
    let (mut app, boss, protagonist) = setup(10, BossConfig::default());

    for _ in 0..30 {
        run_fixed_tick(&mut app, DT);
    }
    let velocity_before = *app.world().get::<Velocity>(boss).unwrap();

    app.world_mut().despawn(protagonist);
    for _ in 0..30 {
        run_fixed_tick(&mut app, DT);
    }

    // Без цели планировщик стоит, velocity не трогаем
    assert_eq!(*app.world().get::<Velocity>(boss).unwrap(), velocity_before);
}

#[test]
fn test_boss_moves_after_first_wander_replan() {
    let (mut app, boss, _) = setup(11, BossConfig::default());

    // 5 секунд wander_period + пара тиков на replan
    for _ in 0..(5 * 60 + 5) {
        run_fixed_tick(&mut app, DT);
    }

    let planner = app.world().get::<MovementPlanner>(boss).unwrap();
    assert!(planner.target_velocity.length() > 0.0);

    let transform = app.world().get::<Transform>(boss).unwrap();
    assert!(transform.translation.truncate().length() > 0.0);
}
