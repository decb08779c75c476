//! Process-wide services: audio, музыка, save data
//!
//! Вместо глобального singleton - явные Resource'ы:
//! - init один раз (ServicesPlugin / SaveStore::load)
//! - доступ через Res/ResMut из любых систем
//! - flush save data на AppExit

use bevy::prelude::*;

use crate::TickSet;

pub mod audio;
pub mod music;
pub mod save_data;

pub use audio::{play_sound_cues, AudioBackend, AudioService, LoggingAudio, SoundCue};
pub use music::{advance_music_playlist, MusicPlaylist, DEFAULT_MUSIC_VOLUME};
pub use save_data::{
    flush_save_on_exit, Difficulty, Loadout, PlayerData, SaveStore, MAX_PLAYER_FLAME,
    MAX_PLAYER_HP,
};

/// Services Plugin
///
/// Save store передаётся снаружи (путь к файлу знает host).
/// AudioService по умолчанию только логирует cues, host ставит свой backend.
/// Cues и playlist обслуживаются в конце тика, save data пишется на AppExit
/// (schedule Last). Playlist берёт случайность из DeterministicRng, поэтому
/// plugin добавляется поверх SimulationPlugin.
pub struct ServicesPlugin {
    pub save_store: SaveStore,
}

impl Plugin for ServicesPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SoundCue>()
            .insert_resource(self.save_store.clone())
            .init_resource::<AudioService>()
            .init_resource::<MusicPlaylist>()
            .add_systems(
                FixedUpdate,
                (play_sound_cues, advance_music_playlist).in_set(TickSet::Services),
            )
            .add_systems(Last, flush_save_on_exit);
    }
}
