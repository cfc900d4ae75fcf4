//! Game settings and preferences
//!
//! Persisted separately from the leaderboard.

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};
use crate::platform::storage::KeyValueStore;

/// Difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Scale applied to asteroid spawn probability
    pub fn spawn_multiplier(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.75,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.5,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Mute while the window is in the background
    pub mute_on_blur: bool,

    // === Visual Effects ===
    /// Explosion particles
    pub particles: bool,
    /// Screen shake on hits
    pub screen_shake: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Controls ===
    /// Fire continuously whenever the cooldown allows
    pub auto_fire: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            master_volume: 0.3,
            mute_on_blur: true,
            particles: true,
            screen_shake: true,
            show_fps: false,
            auto_fire: false,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "asteroid_dodger_settings";

    /// Set master volume, clamped to 0-1
    pub fn set_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    /// Load settings, using defaults if none are stored
    pub fn load(store: &impl KeyValueStore) -> Self {
        let mut settings: Self = persistence::load_or_default(store, Self::STORAGE_KEY);
        // Hand-edited saves may carry out-of-range values
        settings.set_volume(settings.master_volume);
        settings
    }

    /// Save settings
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), PersistError> {
        persistence::save(store, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}
