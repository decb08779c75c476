//! One-shot audio cues
//!
//! Core только пишет SoundCue; реальное воспроизведение - AudioBackend host'а.

use std::sync::Mutex;

use bevy::prelude::*;

/// Event: сыграть clip один раз
#[derive(Event, Debug, Clone, PartialEq)]
pub struct SoundCue {
    /// Id clip'а в asset storage host'а
    pub clip: String,
    /// 0.0..=1.0, за границами clamp
    pub volume: f32,
}

impl SoundCue {
    pub fn new(clip: impl Into<String>, volume: f32) -> Self {
        Self {
            clip: clip.into(),
            volume,
        }
    }
}

/// Воспроизведение (fire-and-forget)
///
/// Два канала: one-shot cues и один музыкальный трек.
pub trait AudioBackend: Send + Sync {
    fn play(&self, clip: &str, volume: f32);

    fn play_music(&self, clip: &str, volume: f32);

    fn stop_music(&self);

    /// Играет ли сейчас музыкальный трек (host знает, когда клип кончился)
    fn is_music_playing(&self) -> bool;
}

/// Backend по умолчанию: только лог
///
/// Клипов нет, поэтому "трек" играет до stop_music.
#[derive(Default)]
pub struct LoggingAudio {
    music: Mutex<Option<String>>,
}

impl AudioBackend for LoggingAudio {
    fn play(&self, clip: &str, volume: f32) {
        crate::log(&format!("🔊 {} (volume {:.2})", clip, volume));
    }

    fn play_music(&self, clip: &str, volume: f32) {
        crate::log(&format!("🎵 {} (volume {:.2})", clip, volume));
        if let Ok(mut music) = self.music.lock() {
            *music = Some(clip.to_string());
        }
    }

    fn stop_music(&self) {
        if let Ok(mut music) = self.music.lock() {
            if let Some(clip) = music.take() {
                crate::log(&format!("🎵 {} stopped", clip));
            }
        }
    }

    fn is_music_playing(&self) -> bool {
        self.music.lock().map(|music| music.is_some()).unwrap_or(false)
    }
}

#[derive(Resource)]
pub struct AudioService {
    backend: Box<dyn AudioBackend>,
    /// Звук клика по UI (None = без звука)
    ui_click: Option<SoundCue>,
}

impl Default for AudioService {
    fn default() -> Self {
        Self::new(Box::new(LoggingAudio::default()))
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_finite() {
        volume.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

impl AudioService {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            ui_click: None,
        }
    }

    pub fn with_ui_click(mut self, cue: SoundCue) -> Self {
        self.ui_click = Some(cue);
        self
    }

    pub fn play_sound(&self, clip: &str, volume: f32) {
        self.backend.play(clip, clamp_volume(volume));
    }

    pub fn ui_click_sound(&self) {
        if let Some(cue) = &self.ui_click {
            self.play_sound(&cue.clip, cue.volume);
        }
    }

    pub fn play_music(&self, clip: &str, volume: f32) {
        self.backend.play_music(clip, clamp_volume(volume));
    }

    /// Останавливает текущий трек. С непустым MusicPlaylist на следующем
    /// тике начнётся другой случайный трек; тишина = пустой playlist.
    pub fn stop_music(&self) {
        self.backend.stop_music();
    }

    pub fn is_music_playing(&self) -> bool {
        self.backend.is_music_playing()
    }
}

/// Система: SoundCue → AudioService
pub fn play_sound_cues(mut cues: EventReader<SoundCue>, audio: Res<AudioService>) {
    for cue in cues.read() {
        audio.play_sound(&cue.clip, cue.volume);
    }
}
