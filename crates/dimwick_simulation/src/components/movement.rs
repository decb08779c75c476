//! Movement компоненты

use bevy::prelude::*;

/// Фактическая скорость entity (м/с, плоскость XY)
///
/// Пишет MovementPlanner каждый тик, читает host physics
/// (или `physics::integrate_velocity` в headless режиме).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Velocity(pub Vec2);
