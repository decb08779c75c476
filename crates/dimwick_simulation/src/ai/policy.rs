//! Combat policy: weighted choice таблица действий
//!
//! Один uniform roll в [0, total_weight), действие = первый bucket,
//! чья накопленная граница строго больше roll (bucket'ы half-open).
//! Default таблица - четыре равных веса, т.е. bucket'ы [0,1) [1,2) [2,3) [3,4).

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Действие, которое combat policy выбирает по истечении cooldown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum BossAction {
    /// Снаряд из позиции босса со случайным поворотом
    RangedAttack,
    /// Area effect ("darkWave"), держится до следующего тика cooldown
    AreaEffect,
    /// Взвести dash к протагонисту (исполняет MovementPlanner)
    ArmDash,
    /// Heal-over-time на heal_duration
    Heal,
}

impl BossAction {
    pub const ALL: [BossAction; 4] = [
        BossAction::RangedAttack,
        BossAction::AreaEffect,
        BossAction::ArmDash,
        BossAction::Heal,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
pub struct ActionWeight {
    pub action: BossAction,
    pub weight: f32,
}

/// Таблица {action → weight}, порядок записей = порядок bucket'ов
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionTable {
    entries: Vec<ActionWeight>,
}

impl Default for ActionTable {
    fn default() -> Self {
        Self {
            entries: BossAction::ALL
                .iter()
                .map(|&action| ActionWeight {
                    action,
                    weight: 1.0,
                })
                .collect(),
        }
    }
}

impl ActionTable {
    pub fn new(entries: Vec<ActionWeight>) -> Result<Self> {
        let table = Self { entries };
        table.validate()?;
        Ok(table)
    }

    pub fn entries(&self) -> &[ActionWeight] {
        &self.entries
    }

    pub fn total_weight(&self) -> f32 {
        self.entries.iter().map(|entry| entry.weight).sum()
    }

    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(SimulationError::InvalidConfig(
                "action table has no entries".to_string(),
            ));
        }

        for entry in &self.entries {
            if !entry.weight.is_finite() || entry.weight <= 0.0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "weight of {:?} must be positive and finite, got {}",
                    entry.action, entry.weight
                )));
            }
        }

        Ok(())
    }

    /// Действие для roll ∈ [0, total_weight)
    ///
    /// Roll за верхней границей (float погрешность суммы) попадает в последний bucket.
    pub fn select(&self, roll: f32) -> Option<BossAction> {
        let mut upper = 0.0;
        for entry in &self.entries {
            upper += entry.weight;
            if roll < upper {
                return Some(entry.action);
            }
        }
        self.entries.last().map(|entry| entry.action)
    }

    /// Один uniform draw из rng → действие. None только для пустой/нулевой таблицы.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<BossAction> {
        let total = self.total_weight();
        if total <= 0.0 || !total.is_finite() {
            return None;
        }
        let roll = rng.gen_range(0.0..total);
        self.select(roll)
    }
}
