//! Boss AI systems (один тик = один вызов из FixedUpdate)

use bevy::prelude::*;

use crate::ai::{CombatScheduler, DashRequested, MovementPlanner, PlannerInput, ScheduledAction};
use crate::combat::{BossIntent, VisualEffect};
use crate::components::{Boss, BossConfig, Protagonist, Velocity, Vitality};
use crate::DeterministicRng;

/// Система: CombatScheduler
///
/// Cooldown → policy draw → intents. Heal-over-time применяется к Vitality здесь же,
/// dash уходит в MovementPlanner через DashRequested.
pub fn run_combat_scheduler(
    mut bosses: Query<
        (Entity, &mut CombatScheduler, &mut Vitality, &BossConfig, &Transform),
        With<Boss>,
    >,
    mut rng: ResMut<DeterministicRng>,
    mut intents: EventWriter<BossIntent>,
    mut dash_requests: EventWriter<DashRequested>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (boss, mut scheduler, mut vitality, config, transform) in bosses.iter_mut() {
        let tick = scheduler.tick(delta, vitality.max, config, &mut rng.rng);

        if tick.clear_area_effect {
            intents.write(BossIntent::ClearVisualEffect {
                boss,
                effect: VisualEffect::DarkWave,
            });
        }

        match tick.action {
            Some(ScheduledAction::RangedAttack { rotation_deg }) => {
                let position = transform.translation.truncate();
                crate::log(&format!(
                    "Boss {:?}: ranged attack at {:?}, rotation {:.1}°",
                    boss, position, rotation_deg
                ));
                intents.write(BossIntent::SpawnProjectile {
                    boss,
                    position,
                    rotation_deg,
                });
            }
            Some(ScheduledAction::AreaEffect) => {
                crate::log(&format!("Boss {:?}: area effect", boss));
                intents.write(BossIntent::TriggerVisualEffect {
                    boss,
                    effect: VisualEffect::DarkWave,
                });
            }
            Some(ScheduledAction::ArmDash) => {
                crate::log(&format!("Boss {:?}: dash armed", boss));
                dash_requests.write(DashRequested { boss });
            }
            Some(ScheduledAction::StartHeal) => {
                crate::log(&format!(
                    "Boss {:?}: heal started ({:.1} HP over {:.1}s)",
                    boss,
                    config.heal_ratio * vitality.max,
                    config.heal_duration
                ));
                intents.write(BossIntent::HealStarted { boss });
            }
            None => {}
        }

        if tick.heal_amount > 0.0 {
            vitality.apply_heal(tick.heal_amount);
        }
    }
}

/// Система: MovementPlanner
///
/// Читает DashRequested этого тика, позицию протагониста, пишет Velocity.
/// Нет протагониста (despawn посреди encounter) → босс не планирует, velocity не трогаем.
pub fn run_movement_planner(
    mut bosses: Query<
        (Entity, &mut MovementPlanner, &mut Velocity, &BossConfig, &Transform),
        With<Boss>,
    >,
    protagonist: Query<&Transform, (With<Protagonist>, Without<Boss>)>,
    mut dash_requests: EventReader<DashRequested>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for request in dash_requests.read() {
        match bosses.get_mut(request.boss) {
            Ok((_, mut planner, ..)) => planner.arm_dash(),
            Err(_) => crate::log_warning(&format!(
                "DashRequested for {:?}, but it has no MovementPlanner",
                request.boss
            )),
        }
    }

    let protagonist_position = match protagonist.single() {
        Ok(transform) => transform.translation.truncate(),
        Err(err) => {
            crate::log_error(&format!("MovementPlanner: protagonist lookup failed: {}", err));
            return;
        }
    };

    for (boss, mut planner, mut velocity, config, transform) in bosses.iter_mut() {
        let input = PlannerInput {
            boss_position: transform.translation.truncate(),
            protagonist_position,
        };

        let output = planner.tick(delta, input, velocity.0, config, &mut rng.rng);
        velocity.0 = output.velocity;

        if output.dash_consumed {
            crate::log(&format!(
                "Boss {:?}: dashing toward {:?} at {:?}",
                boss, protagonist_position, planner.target_velocity
            ));
        }
    }
}
