//! Boss intents - сигналы для presentation/gameplay слоя
//!
//! Core не спавнит снаряды и не играет анимации: он пишет BossIntent,
//! host превращает его в объект сцены / animation trigger.

use bevy::prelude::*;

/// Именованный presentation сигнал (animation trigger на стороне host)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum VisualEffect {
    DarkWave,
}

impl VisualEffect {
    /// Имя trigger'а в animator host'а
    pub fn name(&self) -> &'static str {
        match self {
            VisualEffect::DarkWave => "darkWave",
        }
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum BossIntent {
    /// Заспавнить снаряд (fire-and-forget)
    SpawnProjectile {
        boss: Entity,
        position: Vec2,
        /// Поворот вокруг Z, градусы [0, 360)
        rotation_deg: f32,
    },
    /// Взвести presentation сигнал
    TriggerVisualEffect { boss: Entity, effect: VisualEffect },
    /// Снять сигнал (следующий тик cooldown после Trigger)
    ClearVisualEffect { boss: Entity, effect: VisualEffect },
    /// Начался heal-over-time (для VFX/звука)
    HealStarted { boss: Entity },
}

impl BossIntent {
    pub fn boss(&self) -> Entity {
        match self {
            BossIntent::SpawnProjectile { boss, .. }
            | BossIntent::TriggerVisualEffect { boss, .. }
            | BossIntent::ClearVisualEffect { boss, .. }
            | BossIntent::HealStarted { boss } => *boss,
        }
    }
}
