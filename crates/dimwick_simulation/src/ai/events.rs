//! AI Events

use bevy::prelude::*;

/// Event: CombatScheduler выбрал dash (CombatScheduler → MovementPlanner)
///
/// Пишется в Combat фазе тика, читается в Movement фазе того же тика.
/// MovementPlanner держит запрос взведённым до следующего replan.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashRequested {
    pub boss: Entity,
}
