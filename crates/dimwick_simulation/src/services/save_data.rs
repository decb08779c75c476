//! Save data игрока (persisted между сессиями)
//!
//! Lifecycle:
//! 1. SaveStore::load(path) на старте процесса
//! 2. Res<SaveStore>/ResMut<SaveStore> из систем во время игры
//! 3. flush() на AppExit: temp файл + atomic rename
//!
//! Каждый запуск начинает новый run: из файла переживает только difficulty.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const MAX_PLAYER_HP: u32 = 8;
pub const MAX_PLAYER_FLAME: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Demo,
    Hard,
}

/// Экипировка игрока по слотам (None = слот пуст)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Loadout {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub utility: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerData {
    pub health: u32,
    pub flame: f32,
    pub loadout: Loadout,
    pub difficulty: Difficulty,
}

impl Default for PlayerData {
    fn default() -> Self {
        Self {
            health: MAX_PLAYER_HP,
            flame: MAX_PLAYER_FLAME,
            loadout: Loadout::default(),
            difficulty: Difficulty::Demo,
        }
    }
}

impl PlayerData {
    /// Сброс перед новым run; difficulty меняется только явно
    pub fn reset_run(&mut self) {
        let difficulty = self.difficulty;
        *self = Self {
            difficulty,
            ..Self::default()
        };
    }
}

#[derive(Resource, Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
    data: PlayerData,
}

impl SaveStore {
    /// Нет файла → defaults (Demo). Есть файл → его difficulty + свежий run.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let data = if path.exists() {
            let json = fs::read_to_string(&path)?;
            let mut data: PlayerData = serde_json::from_str(&json)?;
            data.reset_run();
            crate::log_info(&format!(
                "Loaded save data from {} (difficulty {:?})",
                path.display(),
                data.difficulty
            ));
            data
        } else {
            crate::log_info(&format!(
                "No save data at {}, starting with defaults",
                path.display()
            ));
            PlayerData::default()
        };

        Ok(Self { path, data })
    }

    /// Store без файла на диске (до первого flush)
    pub fn in_memory(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            data: PlayerData::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &PlayerData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut PlayerData {
        &mut self.data
    }

    pub fn reset_run(&mut self) {
        self.data.reset_run();
    }

    pub fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let temp_path = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(&self.data)?;
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;

        crate::log_info(&format!("Saved player data to {}", self.path.display()));
        Ok(())
    }
}

/// Система: flush save data при выходе из приложения
pub fn flush_save_on_exit(mut exit_events: EventReader<AppExit>, store: Option<Res<SaveStore>>) {
    if exit_events.is_empty() {
        return;
    }
    // Несколько AppExit за кадр → один flush
    exit_events.clear();

    let Some(store) = store else {
        return;
    };

    if let Err(err) = store.flush() {
        crate::log_error(&format!("Failed to flush save data: {}", err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = SaveStore::load(dir.path().join("savedata.json")).unwrap();

        assert_eq!(store.data(), &PlayerData::default());
        assert_eq!(store.data().health, MAX_PLAYER_HP);
        assert_eq!(store.data().difficulty, Difficulty::Demo);
    }

    #[test]
    fn test_flush_then_load_keeps_difficulty_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("savedata.json");

        let mut store = SaveStore::in_memory(&path);
        {
            let data = store.data_mut();
            data.health = 3;
            data.flame = 12.5;
            data.loadout.primary = Some("ember_pistol".to_string());
            data.difficulty = Difficulty::Hard;
        }
        store.flush().unwrap();
        assert!(path.exists());

        let reloaded = SaveStore::load(&path).unwrap();
        assert_eq!(reloaded.data().difficulty, Difficulty::Hard);
        assert_eq!(reloaded.data().health, MAX_PLAYER_HP);
        assert_eq!(reloaded.data().flame, MAX_PLAYER_FLAME);
        assert_eq!(reloaded.data().loadout, Loadout::default());
    }

    #[test]
    fn test_reset_run_keeps_difficulty() {
        let mut data = PlayerData {
            health: 1,
            flame: 0.0,
            loadout: Loadout {
                utility: Some("lantern".to_string()),
                ..Default::default()
            },
            difficulty: Difficulty::Hard,
        };
        data.reset_run();

        assert_eq!(data.health, MAX_PLAYER_HP);
        assert_eq!(data.loadout.utility, None);
        assert_eq!(data.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_corrupted_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("savedata.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            SaveStore::load(&path),
            Err(crate::SimulationError::Json(_))
        ));
    }

    #[test]
    fn test_flush_on_app_exit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("savedata.json");

        let mut app = App::new();
        app.add_event::<AppExit>()
            .insert_resource(SaveStore::in_memory(&path))
            .add_systems(Last, flush_save_on_exit);

        app.world_mut().run_schedule(Last);
        assert!(!path.exists(), "no exit yet");

        app.world_mut().send_event(AppExit::Success);
        app.world_mut().run_schedule(Last);
        assert!(path.exists());
    }
}
