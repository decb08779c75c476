//! BossConfig - tunables босса
//!
//! Defaults = значения из боевого баланса первой версии encounter.
//! Host может загрузить свой конфиг из JSON (`BossConfig::from_json_str`),
//! `spawn_boss` всегда валидирует перед использованием.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::ActionTable;
use crate::error::{Result, SimulationError};

#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct BossConfig {
    /// Максимальный HP
    pub max_health: f32,
    /// Доля max_health, которую восстанавливает один heal (0.1 = 10%)
    pub heal_ratio: f32,
    /// Окно heal-over-time (секунды)
    pub heal_duration: f32,

    /// Wander: период смены направления (секунды)
    pub wander_period: f32,
    /// Wander: скорость (м/с)
    pub base_speed: f32,
    /// Dash: сколько держится dash velocity (секунды)
    pub dash_duration: f32,
    /// Dash: скорость (м/с)
    pub dash_speed: f32,
    /// Скорость сглаживания velocity → target (1/сек)
    pub sharpness: f32,

    /// Cooldown между действиями: uniform [min, max] секунд
    pub min_cooldown: f32,
    pub max_cooldown: f32,

    /// Веса действий combat policy
    pub action_weights: ActionTable,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            max_health: 200.0,
            heal_ratio: 0.1,
            heal_duration: 2.0,
            wander_period: 5.0,
            base_speed: 2.0,
            dash_duration: 1.5,
            dash_speed: 8.0,
            sharpness: 10.0,
            min_cooldown: 3.0,
            max_cooldown: 8.0,
            action_weights: ActionTable::default(),
        }
    }
}

impl BossConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Проверяет что все tunables пригодны для тика
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("max_health", self.max_health),
            ("heal_duration", self.heal_duration),
            ("wander_period", self.wander_period),
            ("dash_duration", self.dash_duration),
            ("sharpness", self.sharpness),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "{} must be a positive finite number, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("heal_ratio", self.heal_ratio),
            ("base_speed", self.base_speed),
            ("dash_speed", self.dash_speed),
            ("min_cooldown", self.min_cooldown),
            ("max_cooldown", self.max_cooldown),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "{} must be a non-negative finite number, got {}",
                    name, value
                )));
            }
        }

        if self.min_cooldown > self.max_cooldown {
            return Err(SimulationError::InvalidConfig(format!(
                "min_cooldown ({}) is greater than max_cooldown ({})",
                self.min_cooldown, self.max_cooldown
            )));
        }

        self.action_weights.validate()
    }

    /// HP в секунду во время heal window
    pub fn heal_rate(&self) -> f32 {
        self.heal_ratio * self.max_health / self.heal_duration
    }
}
