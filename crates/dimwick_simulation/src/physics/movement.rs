//! Kinematic интеграция velocity → position
//!
//! Детерминизм: тот же fixed dt, что у AI, никаких forces/collisions.

use bevy::prelude::*;

use crate::components::Velocity;
use crate::TickSet;

/// Plugin: integrate_velocity в TickSet::Physics (после Movement)
pub struct KinematicPlugin;

impl Plugin for KinematicPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, integrate_velocity.in_set(TickSet::Physics));
    }
}

/// Система: translation.xy += velocity · dt
pub fn integrate_velocity(mut query: Query<(&Velocity, &mut Transform)>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for (velocity, mut transform) in query.iter_mut() {
        transform.translation += (velocity.0 * delta).extend(0.0);
    }
}
