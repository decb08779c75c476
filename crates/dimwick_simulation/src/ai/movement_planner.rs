//! MovementPlanner - куда и как быстро движется босс
//!
//! Два режима на одной паре (target_velocity, replan_timer):
//! - Wander: случайное направление × base_speed на wander_period
//! - Dash: направление на протагониста × dash_speed на dash_duration
//!
//! Режим определяется только тем, чем был засеян таймер. Фактическая
//! velocity подтягивается к target экспоненциально: alpha = 1 − e^(−sharpness·dt),
//! результат не зависит от того, как dt нарезан на тики.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::components::BossConfig;

/// Чем был засеян последний replan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum MoveMode {
    #[default]
    Wander,
    Dash,
}

/// Состояние планировщика движения босса
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementPlanner {
    pub target_velocity: Vec2,
    /// Считает вниз; ≤ 0 → replan на следующем тике
    pub replan_timer: f32,
    /// Dash взведён combat policy, ждёт истечения replan_timer
    pub dash_armed: bool,
    pub mode: MoveMode,
}

impl Default for MovementPlanner {
    fn default() -> Self {
        Self::new(&BossConfig::default())
    }
}

/// Входы одного тика (позиции читаются из Transform снаружи)
#[derive(Debug, Clone, Copy)]
pub struct PlannerInput {
    pub boss_position: Vec2,
    pub protagonist_position: Vec2,
}

/// Результат тика: velocity command + был ли израсходован dash
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannerOutput {
    pub velocity: Vec2,
    pub dash_consumed: bool,
}

impl MovementPlanner {
    /// Состояние на старте encounter: стоим, первый replan через wander_period
    pub fn new(config: &BossConfig) -> Self {
        Self {
            target_velocity: Vec2::ZERO,
            replan_timer: config.wander_period,
            dash_armed: false,
            mode: MoveMode::Wander,
        }
    }

    /// Принять dash запрос от CombatScheduler
    pub fn arm_dash(&mut self) {
        self.dash_armed = true;
    }

    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        input: PlannerInput,
        velocity: Vec2,
        config: &BossConfig,
        rng: &mut R,
    ) -> PlannerOutput {
        let mut dash_consumed = false;

        if self.replan_timer <= 0.0 {
            if self.dash_armed {
                self.start_dash(input, config);
                dash_consumed = true;
            } else {
                self.start_wander(config, rng);
            }
        } else {
            self.replan_timer -= dt;
        }

        PlannerOutput {
            velocity: smooth_velocity(velocity, self.target_velocity, config.sharpness, dt),
            dash_consumed,
        }
    }

    fn start_dash(&mut self, input: PlannerInput, config: &BossConfig) {
        // Протагонист ровно в позиции босса → нулевое направление, стоим весь dash
        let direction = (input.protagonist_position - input.boss_position).normalize_or_zero();
        self.target_velocity = direction * config.dash_speed;
        self.replan_timer = config.dash_duration;
        self.dash_armed = false;
        self.mode = MoveMode::Dash;
    }

    fn start_wander<R: Rng + ?Sized>(&mut self, config: &BossConfig, rng: &mut R) {
        let heading = rng.gen_range(0.0..TAU);
        self.target_velocity = Vec2::from_angle(heading) * config.base_speed;
        self.replan_timer = config.wander_period;
        self.mode = MoveMode::Wander;
    }
}

/// Экспоненциальное сглаживание velocity → target
///
/// Двойной шаг dt/2 даёт ровно тот же результат, что один шаг dt
/// (с точностью float), в отличие от lerp с фиксированным t.
pub fn smooth_velocity(current: Vec2, target: Vec2, sharpness: f32, dt: f32) -> Vec2 {
    let alpha = 1.0 - (-sharpness * dt).exp();
    current.lerp(target, alpha)
}
