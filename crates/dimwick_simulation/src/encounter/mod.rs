//! Encounter: популяция врагов комнаты → выход
//!
//! Вместо per-frame polling числа врагов: detect_encounter_cleared реагирует
//! только на удаление Enemy (или появление новой двери) и пишет
//! EncounterCleared, когда врагов не осталось. Открытая дверь остаётся
//! открытой, поэтому guard-флаг "уже сработало" не нужен.

use bevy::prelude::*;

use crate::components::Enemy;
use crate::services::SoundCue;
use crate::TickSet;

/// Дверь/решётка, которая открывается после зачистки комнаты
#[derive(Component, Debug, Clone, Default)]
pub struct ExitGate {
    pub opened: bool,
    /// Звук открытия (опционально)
    pub open_cue: Option<SoundCue>,
}

/// Event: в комнате не осталось Enemy
#[derive(Event, Debug, Clone, Copy)]
pub struct EncounterCleared;

/// Event: дверь открылась (для анимации и перехода между сценами на стороне host)
#[derive(Event, Debug, Clone, Copy)]
pub struct GateOpened {
    pub gate: Entity,
}

pub struct EncounterPlugin;

impl Plugin for EncounterPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EncounterCleared>()
            .add_event::<GateOpened>()
            .add_event::<SoundCue>()
            .add_systems(
                FixedUpdate,
                (detect_encounter_cleared, open_exit_gates)
                    .chain()
                    .in_set(TickSet::Encounter),
            );
    }
}

/// Система: Enemy удалён (или появилась дверь) и врагов 0 → EncounterCleared
pub fn detect_encounter_cleared(
    mut removed: RemovedComponents<Enemy>,
    new_gates: Query<(), Added<ExitGate>>,
    remaining: Query<(), With<Enemy>>,
    mut cleared: EventWriter<EncounterCleared>,
) {
    let removed_count = removed.read().count();
    if removed_count == 0 && new_gates.is_empty() {
        return;
    }

    if remaining.is_empty() {
        crate::log_info(&format!(
            "Encounter cleared ({} enemies removed this tick)",
            removed_count
        ));
        cleared.write(EncounterCleared);
    }
}

/// Система: EncounterCleared → открыть все закрытые двери
pub fn open_exit_gates(
    mut cleared: EventReader<EncounterCleared>,
    mut gates: Query<(Entity, &mut ExitGate)>,
    mut opened_events: EventWriter<GateOpened>,
    mut cues: EventWriter<SoundCue>,
) {
    if cleared.is_empty() {
        return;
    }
    cleared.clear();

    for (gate, mut exit_gate) in gates.iter_mut() {
        if exit_gate.opened {
            continue;
        }

        exit_gate.opened = true;
        opened_events.write(GateOpened { gate });
        if let Some(cue) = &exit_gate.open_cue {
            cues.write(cue.clone());
        }

        crate::log(&format!("Gate {:?} opened", gate));
    }
}
