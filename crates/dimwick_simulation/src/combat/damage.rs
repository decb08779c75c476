//! Damage intake
//!
//! Collision subsystem → ProjectileContact → resolve_projectile_contacts
//! → DamageEvent → apply_damage_events → Vitality + DamageDealt.
//!
//! Оба шага идут в начале тика (TickSet::Intake), поэтому AI никогда
//! не видит наполовину применённый урон.

use std::collections::HashSet;

use bevy::prelude::*;

use crate::components::{Boss, Vitality};

/// Какой атакой игрока был нанесён урон
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum ProjectileKind {
    Bullet,
    /// Trigger collider, сам не двигается
    FlameSlash,
}

/// Маркер: этот collider наносит урон боссу при контакте
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PlayerProjectile {
    pub kind: ProjectileKind,
}

/// Damage metadata снаряда. Без неё contact считается аномалией.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ProjectileDamage {
    pub amount: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
    Projectile(ProjectileKind),
    /// Урон от host'а напрямую (ловушки, скрипты)
    External,
}

/// Event: collider пересёк trigger volume цели (collision subsystem → core)
#[derive(Event, Debug, Clone, Copy)]
pub struct ProjectileContact {
    pub projectile: Entity,
    pub target: Entity,
}

/// Event: урон к применению (один event = одно применение)
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    pub target: Entity,
    pub amount: f32,
    pub source: DamageSource,
}

/// Event: урон применён (для UI, звуков, эффектов)
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageDealt {
    pub target: Entity,
    /// Сколько HP реально снято (после clamp)
    pub amount: f32,
    pub health_ratio: f32,
    pub source: DamageSource,
}

/// Event: Vitality дошла до 0. Game over обрабатывает внешний collaborator.
#[derive(Event, Debug, Clone, Copy)]
pub struct VitalityDepleted {
    pub entity: Entity,
}

fn is_valid_amount(amount: f32) -> bool {
    amount.is_finite() && amount >= 0.0
}

/// Система: ProjectileContact → DamageEvent
///
/// - Contact не с боссом или от collider'а без PlayerProjectile → игнор
/// - PlayerProjectile без валидной ProjectileDamage → log error, здоровье не трогаем
/// - Иначе DamageEvent + despawn снаряда (один снаряд = одно попадание,
///   даже если collision прислал несколько contacts за тик)
pub fn resolve_projectile_contacts(
    mut commands: Commands,
    mut contacts: EventReader<ProjectileContact>,
    mut damage_events: EventWriter<DamageEvent>,
    projectiles: Query<(&PlayerProjectile, Option<&ProjectileDamage>)>,
    bosses: Query<(), With<Boss>>,
) {
    let mut consumed = HashSet::new();

    for contact in contacts.read() {
        if !bosses.contains(contact.target) {
            continue;
        }

        let Ok((projectile, damage)) = projectiles.get(contact.projectile) else {
            continue;
        };

        if consumed.contains(&contact.projectile) {
            continue;
        }

        match damage {
            Some(damage) if is_valid_amount(damage.amount) => {
                damage_events.write(DamageEvent {
                    target: contact.target,
                    amount: damage.amount,
                    source: DamageSource::Projectile(projectile.kind),
                });
                consumed.insert(contact.projectile);
                commands.entity(contact.projectile).despawn();
            }
            _ => {
                crate::log_error(&format!(
                    "Invalid player projectile collision: {:?} ({:?}) has no valid damage metadata ({:?})",
                    contact.projectile, projectile.kind, damage
                ));
            }
        }
    }
}

/// Система: DamageEvent → Vitality
pub fn apply_damage_events(
    mut damage_events: EventReader<DamageEvent>,
    mut damage_dealt: EventWriter<DamageDealt>,
    mut depleted_events: EventWriter<VitalityDepleted>,
    mut targets: Query<&mut Vitality>,
) {
    for event in damage_events.read() {
        if !is_valid_amount(event.amount) {
            crate::log_warning(&format!(
                "Discarding damage event for {:?}: invalid amount {}",
                event.target, event.amount
            ));
            continue;
        }

        let Ok(mut vitality) = targets.get_mut(event.target) else {
            crate::log_warning(&format!(
                "Discarding damage event: {:?} has no Vitality",
                event.target
            ));
            continue;
        };

        let was_alive = !vitality.is_depleted();
        let applied = vitality.apply_damage(event.amount);

        crate::log(&format!(
            "Damage: {:?} took {:.1} ({:?}), health {:.1}/{:.1}",
            event.target, applied, event.source, vitality.current, vitality.max
        ));

        damage_dealt.write(DamageDealt {
            target: event.target,
            amount: applied,
            health_ratio: vitality.ratio(),
            source: event.source,
        });

        if was_alive && vitality.is_depleted() {
            crate::log_info(&format!("Entity {:?} vitality depleted", event.target));
            depleted_events.write(VitalityDepleted {
                entity: event.target,
            });
        }
    }
}
