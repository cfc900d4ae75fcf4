//! Asteroid Dodger - a 2D arcade shooter
//!
//! Core modules:
//! - `sim`: Simulation core (entities, collisions, per-frame tick)
//! - `game`: Session controller and lifecycle state machine
//! - `platform`: Input mapping, frame timing and key-value storage
//! - `persistence`: Versioned save envelopes for settings and scores
//! - `tuning`: Data-driven game balance

pub mod achievements;
pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{Game, SessionPhase};
pub use highscores::HighScores;
pub use settings::{Difficulty, Settings};
pub use tuning::Tuning;

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Target display refresh (ticks per second)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const PLAYER_MAX_SPEED: f32 = 8.0;
    pub const INITIAL_LIVES: i32 = 3;

    /// Lasers are dropped once above this y
    pub const LASER_TOP_BOUND: f32 = -10.0;
    /// Recent positions kept per laser
    pub const LASER_TRAIL_LENGTH: usize = 5;

    /// Asteroids spawn this far outside an edge
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Tolerance beyond the playfield before pruning
    pub const OFF_SCREEN_MARGIN: f32 = 100.0;
    /// Splitting asteroids must be strictly larger than this to split
    pub const SPLIT_MIN_SIZE: f32 = 20.0;
    /// Child radius relative to parent
    pub const SPLIT_SIZE_FACTOR: f32 = 0.6;
    /// Per-axis velocity jitter applied to split children
    pub const SPLIT_JITTER: f32 = 2.0;

    /// Particle defaults
    pub const PARTICLE_LIFE: i32 = 30;
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    pub const PARTICLE_FRICTION: f32 = 0.98;
    pub const PARTICLE_MAX_SPEED: f32 = 5.0;

    /// Power-up defaults (300 ticks = 5 seconds)
    pub const POWER_UP_RADIUS: f32 = 12.0;
    pub const POWER_UP_LIFE: i32 = 300;
    pub const POWER_UP_PULSE_STEP: f32 = 0.2;
}

/// Palette used for decorative random colors
pub const PALETTE: [&str; 6] = [
    "#ff6b6b", "#4ecdc4", "#45b7d1", "#96ceb4", "#ffeaa7", "#dda0dd",
];

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Linear interpolation from `start` to `end`
#[inline]
pub fn lerp(start: f32, end: f32, factor: f32) -> f32 {
    start + (end - start) * factor
}

/// Pick a color from the palette
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    PALETTE[rng.random_range(0..PALETTE.len())]
}

/// Uniform angle in [0, 2π)
pub fn random_angle<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(0.0..std::f32::consts::TAU)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(2.0, 10.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 10.0, 1.0), 10.0);
        assert_eq!(lerp(2.0, 10.0, 0.5), 6.0);
    }

    #[test]
    fn test_distance() {
        let d = distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_random_draws_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..100 {
            assert!(PALETTE.contains(&random_color(&mut rng)));
            let a = random_angle(&mut rng);
            assert!((0.0..std::f32::consts::TAU).contains(&a));
        }
    }
}
