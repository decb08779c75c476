//! Boss AI: MovementPlanner + CombatScheduler
//!
//! Порядок внутри тика (FixedUpdate):
//! 1. run_combat_scheduler - cooldown, policy draw, heal-over-time, DashRequested
//! 2. run_movement_planner - принимает DashRequested того же тика, replan, smoothing
//!
//! Combat строго перед Movement, иначе dash опаздывает на тик.

use bevy::prelude::*;

pub mod combat_scheduler;
pub mod events;
pub mod movement_planner;
pub mod policy;
pub mod systems;


pub use combat_scheduler::{sample_cooldown, CombatScheduler, CombatTick, ScheduledAction};
pub use events::DashRequested;
pub use movement_planner::{smooth_velocity, MoveMode, MovementPlanner, PlannerInput, PlannerOutput};
pub use policy::{ActionTable, ActionWeight, BossAction};
pub use systems::{run_combat_scheduler, run_movement_planner};

use crate::TickSet;

/// Boss AI Plugin
pub struct BossAiPlugin;

impl Plugin for BossAiPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DashRequested>()
            .register_type::<MovementPlanner>()
            .register_type::<CombatScheduler>()
            .add_systems(FixedUpdate, run_combat_scheduler.in_set(TickSet::Combat))
            .add_systems(FixedUpdate, run_movement_planner.in_set(TickSet::Movement));
    }
}
