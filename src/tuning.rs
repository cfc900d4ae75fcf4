//! Data-driven game balance
//!
//! Every knob that shapes "game feel" and is reasonable to tweak without a
//! rebuild. Missing JSON fields fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::consts::PLAYER_RADIUS;
use crate::settings::Settings;

/// Balance parameters consumed by the simulation and controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield size
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Player ===
    /// Initial movement per tick along each pressed axis
    pub player_speed: f32,

    // === Lasers ===
    pub laser_speed: f32,
    pub laser_radius: f32,
    /// Minimum time between shots (milliseconds, strict)
    pub laser_cooldown_ms: f64,

    // === Effects ===
    /// Particles emitted when an asteroid is destroyed
    pub explosion_particles: u32,
    /// Particles emitted when the player is hit
    pub player_hit_particles: u32,

    // === Spawning ===
    /// Spawn probability per tick at score 0
    pub spawn_base_rate: f32,
    /// Spawn probability added per point of score
    pub spawn_score_scale: f32,
    /// Chance a destroyed asteroid drops a power-up
    pub power_up_drop_chance: f32,

    // === Scoring ===
    /// Awarded when an asteroid leaves the playfield
    pub survival_bonus: u64,
    /// Base award for a laser kill, multiplied by the capped combo
    pub hit_points: u64,
    pub combo_cap: u32,
    pub points_per_level: u64,

    // === Leaderboard ===
    pub leaderboard_size: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: crate::consts::CANVAS_WIDTH,
            canvas_height: crate::consts::CANVAS_HEIGHT,

            player_speed: 5.0,

            laser_speed: 8.0,
            laser_radius: 3.0,
            laser_cooldown_ms: 150.0,

            explosion_particles: 15,
            player_hit_particles: 10,

            spawn_base_rate: 0.02,
            spawn_score_scale: 0.00001,
            power_up_drop_chance: 0.1,

            survival_bonus: 10,
            hit_points: 50,
            combo_cap: 5,
            points_per_level: 1000,

            leaderboard_size: crate::highscores::MAX_HIGH_SCORES,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Pull values the simulation cannot run with back into range
    pub fn sanitized(mut self) -> Self {
        // Room for the ship on both axes
        let min_side = 2.0 * PLAYER_RADIUS;
        if !(self.canvas_width >= min_side) || !(self.canvas_height >= min_side) {
            log::warn!(
                "Canvas {}x{} too small, raising to at least {}",
                self.canvas_width,
                self.canvas_height,
                min_side
            );
        }
        self.canvas_width = self.canvas_width.max(min_side);
        self.canvas_height = self.canvas_height.max(min_side);
        self.combo_cap = self.combo_cap.max(1);
        self.points_per_level = self.points_per_level.max(1);
        self
    }

    /// Parse tuning, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Invalid tuning JSON ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Apply player preferences (difficulty and particle toggle)
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        let scale = settings.difficulty.spawn_multiplier();
        self.spawn_base_rate *= scale;
        self.spawn_score_scale *= scale;
        if !settings.particles {
            self.explosion_particles = 0;
            self.player_hit_particles = 0;
        }
        self
    }

    /// Spawn probability for the current score
    pub fn spawn_rate(&self, score: u64) -> f32 {
        self.spawn_base_rate + score as f32 * self.spawn_score_scale
    }

    /// Points for one laser kill at the given (already incremented) combo
    pub fn hit_award(&self, combo: u32) -> u64 {
        self.hit_points * u64::from(combo.clamp(1, self.combo_cap.max(1)))
    }

    /// Level reached at a score (1-based)
    pub fn level_for_score(&self, score: u64) -> u32 {
        (score / self.points_per_level.max(1)) as u32 + 1
    }
}
