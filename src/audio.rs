//! Audio collaborator
//!
//! Stub playback: the sim emits discrete [`GameEvent`] tags and this
//! manager consumes them fire-and-forget. Wire a real backend here when one
//! is available; the interface stays the same.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    sound_enabled: bool,
    music_enabled: bool,
    sound_volume: f32,
    music_volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
            sound_volume: 0.7,
            music_volume: 0.5,
        }
    }

    /// Adopt the player's audio preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sound_enabled = settings.sound_enabled;
        self.music_enabled = settings.music_enabled;
        self.sound_volume = settings.sound_volume.clamp(0.0, 1.0);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    pub fn set_music_enabled(&mut self, enabled: bool) {
        self.music_enabled = enabled;
    }

    pub fn set_sound_volume(&mut self, volume: f32) {
        self.sound_volume = volume.clamp(0.0, 1.0);
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
    }

    pub fn is_sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn is_music_enabled(&self) -> bool {
        self.music_enabled
    }

    /// Play the sound for a game event. No return value, no failure surface.
    pub fn play(&self, event: GameEvent) {
        if !self.sound_enabled {
            return;
        }

        let name = match event {
            GameEvent::BallHit => "ball_hit",
            GameEvent::BrickBreak => "brick_break",
            GameEvent::PowerUp => "power_up",
            GameEvent::LoseLife => "lose_life",
            GameEvent::GameOver => "game_over",
            GameEvent::Victory => "victory",
        };
        log::debug!("audio: {name} at volume {:.2}", self.sound_volume);
    }

    pub fn play_background_music(&self) {
        if !self.music_enabled {
            return;
        }
        log::debug!("audio: background music at volume {:.2}", self.music_volume);
    }

    pub fn stop_background_music(&self) {
        log::debug!("audio: background music stopped");
    }
}
