//! Game settings and preferences
//!
//! Persisted as JSON next to the other save files; load failures fall back
//! to defaults so the game always starts.

use serde::{Deserialize, Serialize};

/// Player preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    // === Visual effects ===
    /// Screen shake on impacts
    pub screen_shake: bool,
    /// Ball trail
    pub trails: bool,
    /// Particle effects (brick bursts, pickup sparkles)
    pub particles: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    pub sound_enabled: bool,
    pub music_enabled: bool,
    /// Sound effects volume (0.0 - 1.0)
    pub sound_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Accessibility ===
    /// Reduced motion (minimize shake and flashes)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_shake: true,
            trails: true,
            particles: true,
            show_fps: true,
            sound_enabled: true,
            music_enabled: true,
            sound_volume: 0.7,
            music_volume: 0.5,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Clamp volumes into range after external edits
    pub fn sanitize(&mut self) {
        self.sound_volume = self.sound_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
    }

    /// Load settings from a JSON file, defaulting on any failure
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(mut settings) => {
                    settings.sanitize();
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Corrupt settings file, using defaults: {e}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("No settings file, using defaults");
                Self::default()
            }
        }
    }

    /// Save settings as JSON
    pub fn save_to(&self, path: &std::path::Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("Failed to save settings: {e}");
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::warn!("Failed to encode settings: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let settings = Settings::default();
        assert!(settings.sound_enabled);
        assert!(settings.effective_screen_shake());
        assert!(settings.sound_volume >= 0.0 && settings.sound_volume <= 1.0);
    }

    #[test]
    fn test_reduced_motion_overrides_shake() {
        let mut settings = Settings::default();
        settings.reduced_motion = true;
        assert!(settings.screen_shake);
        assert!(!settings.effective_screen_shake());
    }

    #[test]
    fn test_json_round_trip() {
        let mut settings = Settings::default();
        settings.music_enabled = false;
        settings.sound_volume = 0.25;

        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn test_sanitize_clamps_volumes() {
        let mut settings = Settings::default();
        settings.sound_volume = 4.2;
        settings.music_volume = -1.0;
        settings.sanitize();
        assert_eq!(settings.sound_volume, 1.0);
        assert_eq!(settings.music_volume, 0.0);
    }
}
