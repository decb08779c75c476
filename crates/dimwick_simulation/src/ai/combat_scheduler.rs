//! CombatScheduler - cooldown-gated random policy + heal-over-time
//!
//! Cooldown:
//! - timer > 0 → timer -= dt
//! - timer ≤ 0 → один draw из ActionTable, reseed timer ∈ [min_cooldown, max_cooldown]
//!
//! Area effect прошлого тика снимается в начале следующего (single-tick pulse).
//!
//! Heal идёт независимо от cooldown: пока heal_timer > 0, за тик
//! добавляется rate · min(dt, heal_timer). Сумма за окно ровно
//! heal_ratio · max_health, даже если последний тик перелетает окно.

use bevy::prelude::*;
use rand::Rng;

use crate::ai::BossAction;
use crate::components::BossConfig;

#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CombatScheduler {
    /// До следующего действия (секунды)
    pub cooldown_timer: f32,
    /// Остаток heal окна; 0 = не лечимся
    pub heal_timer: f32,
    /// AreaEffect был выпущен и ещё не снят
    pub area_effect_latched: bool,
}

impl Default for CombatScheduler {
    fn default() -> Self {
        Self {
            cooldown_timer: BossConfig::default().max_cooldown,
            heal_timer: 0.0,
            area_effect_latched: false,
        }
    }
}

/// Действие, выбранное в этом тике (с payload для intent)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScheduledAction {
    /// Поворот снаряда в градусах, [0, 360)
    RangedAttack { rotation_deg: f32 },
    AreaEffect,
    ArmDash,
    StartHeal,
}

impl ScheduledAction {
    pub fn kind(&self) -> BossAction {
        match self {
            ScheduledAction::RangedAttack { .. } => BossAction::RangedAttack,
            ScheduledAction::AreaEffect => BossAction::AreaEffect,
            ScheduledAction::ArmDash => BossAction::ArmDash,
            ScheduledAction::StartHeal => BossAction::Heal,
        }
    }
}

/// Результат одного тика scheduler'а
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CombatTick {
    pub action: Option<ScheduledAction>,
    /// Снять latched area effect (single-tick pulse)
    pub clear_area_effect: bool,
    /// HP для VitalityTracker::apply_heal
    pub heal_amount: f32,
    pub healing_active: bool,
}

impl CombatScheduler {
    /// Первый cooldown сэмплируется сразу, как и все последующие
    pub fn new<R: Rng + ?Sized>(config: &BossConfig, rng: &mut R) -> Self {
        Self {
            cooldown_timer: sample_cooldown(config, rng),
            heal_timer: 0.0,
            area_effect_latched: false,
        }
    }

    pub fn is_healing(&self) -> bool {
        self.heal_timer > 0.0
    }

    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        max_health: f32,
        config: &BossConfig,
        rng: &mut R,
    ) -> CombatTick {
        let mut result = CombatTick::default();

        // Latch держится ровно один тик, даже при нулевом cooldown
        if self.area_effect_latched {
            self.area_effect_latched = false;
            result.clear_area_effect = true;
        }

        if self.cooldown_timer > 0.0 {
            self.cooldown_timer -= dt;
        } else {
            result.action = self.run_policy(config, rng);
            self.cooldown_timer = sample_cooldown(config, rng);
        }

        if self.heal_timer > 0.0 {
            let rate = config.heal_ratio * max_health / config.heal_duration;
            result.heal_amount = rate * dt.min(self.heal_timer);
            self.heal_timer -= dt;
            result.healing_active = true;
        }

        result
    }

    fn run_policy<R: Rng + ?Sized>(
        &mut self,
        config: &BossConfig,
        rng: &mut R,
    ) -> Option<ScheduledAction> {
        let action = match config.action_weights.sample(rng)? {
            BossAction::RangedAttack => ScheduledAction::RangedAttack {
                rotation_deg: rng.gen_range(0.0..360.0),
            },
            BossAction::AreaEffect => {
                self.area_effect_latched = true;
                ScheduledAction::AreaEffect
            }
            BossAction::ArmDash => ScheduledAction::ArmDash,
            BossAction::Heal => {
                self.heal_timer = config.heal_duration;
                ScheduledAction::StartHeal
            }
        };
        Some(action)
    }
}

/// Uniform [min_cooldown, max_cooldown]; вырожденный диапазон → min
pub fn sample_cooldown<R: Rng + ?Sized>(config: &BossConfig, rng: &mut R) -> f32 {
    if config.max_cooldown > config.min_cooldown {
        rng.gen_range(config.min_cooldown..=config.max_cooldown)
    } else {
        config.min_cooldown
    }
}
