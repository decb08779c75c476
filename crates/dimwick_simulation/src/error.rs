//! Ошибки симуляции
//!
//! Fatal только на инициализации (spawn босса, загрузка конфига/save data).
//! Во время тиков ошибки логируются и пропускаются.

use bevy::prelude::Entity;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    /// Босс не может тикать без цели для dash
    #[error("no protagonist entity found; spawn one before the boss")]
    ProtagonistMissing,

    #[error("expected exactly one protagonist, found {0}")]
    AmbiguousProtagonist(usize),

    /// Один босс на encounter
    #[error("boss {0:?} already spawned in this encounter")]
    BossAlreadySpawned(Entity),

    #[error("invalid boss config: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
