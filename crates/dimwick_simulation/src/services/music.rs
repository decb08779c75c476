//! Фоновая музыка: случайный трек из playlist, по кругу
//!
//! Сцена ставит свой набор треков (`set_tracks`), когда канал музыки
//! простаивает, следующий трек выбирается через DeterministicRng.

use bevy::prelude::*;
use rand::Rng;

use crate::services::AudioService;
use crate::DeterministicRng;

pub const DEFAULT_MUSIC_VOLUME: f32 = 0.3;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MusicPlaylist {
    tracks: Vec<String>,
    pub volume: f32,
}

impl Default for MusicPlaylist {
    fn default() -> Self {
        Self {
            tracks: Vec::new(),
            volume: DEFAULT_MUSIC_VOLUME,
        }
    }
}

impl MusicPlaylist {
    pub fn tracks(&self) -> &[String] {
        &self.tracks
    }

    /// Новый набор треков; текущий трек доигрывает
    pub fn set_tracks(&mut self, tracks: Vec<String>) {
        self.tracks = tracks;
    }

    /// Пустой playlist: после stop_music тишина
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Случайный трек или None для пустого playlist
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        if self.tracks.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.tracks.len());
        Some(self.tracks[index].as_str())
    }
}

/// Система: канал музыки свободен → следующий случайный трек
pub fn advance_music_playlist(
    playlist: Res<MusicPlaylist>,
    audio: Res<AudioService>,
    mut rng: ResMut<DeterministicRng>,
) {
    if audio.is_music_playing() {
        return;
    }

    if let Some(track) = playlist.pick(&mut rng.rng) {
        audio.play_music(track, playlist.volume);
    }
}
