//! Участники encounter: Boss, Protagonist, Enemy + Vitality

use bevy::prelude::*;

use crate::ai::{CombatScheduler, MovementPlanner};
use crate::components::{BossConfig, Velocity};

/// Босс encounter (singleton)
///
/// Required Components дают рабочие defaults, но `spawn_boss` всегда
/// вставляет значения из провалидированного BossConfig.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Vitality, Velocity, MovementPlanner, CombatScheduler, BossConfig, Transform)]
pub struct Boss;

/// Протагонист - цель для dash. Позиция читается из Transform.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Protagonist;

/// Обычный враг комнаты (для encounter::detect_encounter_cleared)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Enemy;

/// Здоровье босса (VitalityTracker)
///
/// Инвариант: 0.0 ≤ current ≤ max, ratio() ∈ [0, 1].
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Vitality {
    pub current: f32,
    pub max: f32,
}

impl Default for Vitality {
    fn default() -> Self {
        Self::new(BossConfig::default().max_health)
    }
}

impl Vitality {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Вычитает урон, возвращает сколько реально снято
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        let before = self.current;
        self.current = (self.current - amount).max(0.0);
        before - self.current
    }

    /// Добавляет heal, возвращает сколько реально добавлено
    pub fn apply_heal(&mut self, delta: f32) -> f32 {
        let before = self.current;
        self.current = (self.current + delta).min(self.max);
        self.current - before
    }

    /// current / max, для UI health bar
    pub fn ratio(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        self.current / self.max
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }
}
