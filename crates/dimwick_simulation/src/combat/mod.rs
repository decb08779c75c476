//! Combat: damage intake + boss intents
//!
//! ECS ответственность:
//! - Vitality босса (урон, heal-over-time через CombatScheduler)
//! - Events: DamageEvent, DamageDealt, VitalityDepleted, BossIntent
//!
//! Host ответственность:
//! - collision detection → ProjectileContact
//! - BossIntent → spawn снаряда / animation trigger

use bevy::prelude::*;

pub mod damage;
pub mod intents;


pub use damage::{
    apply_damage_events, resolve_projectile_contacts, DamageDealt, DamageEvent, DamageSource,
    PlayerProjectile, ProjectileContact, ProjectileDamage, ProjectileKind, VitalityDepleted,
};
pub use intents::{BossIntent, VisualEffect};

use crate::TickSet;

/// Combat Plugin
///
/// Регистрирует events и intake системы в FixedUpdate:
/// 1. resolve_projectile_contacts - contacts → DamageEvent, despawn снарядов
/// 2. apply_damage_events - DamageEvent → Vitality
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ProjectileContact>()
            .add_event::<DamageEvent>()
            .add_event::<DamageDealt>()
            .add_event::<VitalityDepleted>()
            .add_event::<BossIntent>()
            .register_type::<PlayerProjectile>()
            .register_type::<ProjectileDamage>();

        app.add_systems(
            FixedUpdate,
            (resolve_projectile_contacts, apply_damage_events)
                .chain()
                .in_set(TickSet::Intake),
        );
    }
}
