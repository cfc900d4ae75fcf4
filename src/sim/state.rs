//! Simulation state and entity types
//!
//! One `SimState` holds everything a session mutates. It is created fresh on
//! every (re)start and read by renderer/HUD collaborators between ticks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Collision radius
    pub size: f32,
    /// Movement per tick along each pressed axis
    pub speed: f32,
}

impl Player {
    /// Ship centered on the playfield
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.canvas_width / 2.0, tuning.canvas_height / 2.0),
            size: PLAYER_RADIUS,
            speed: tuning.player_speed,
        }
    }

    /// Keep the ship fully inside the playfield
    pub fn clamp_to(&mut self, width: f32, height: f32) {
        // A field narrower than the ship pins it to the low edge
        self.pos.x = self.pos.x.min(width - self.size).max(self.size);
        self.pos.y = self.pos.y.min(height - self.size).max(self.size);
    }
}

/// Asteroid variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AsteroidKind {
    Normal,
    /// 1.5x velocity, 0.8x size
    Fast,
    /// 1.5x size, two health
    Large,
    /// 0.9x size, breaks into two children when destroyed
    Splitting,
}

impl AsteroidKind {
    pub const ALL: [AsteroidKind; 4] = [
        AsteroidKind::Normal,
        AsteroidKind::Fast,
        AsteroidKind::Large,
        AsteroidKind::Splitting,
    ];

    /// (velocity scale, size scale, health)
    pub fn modifiers(&self) -> (f32, f32, u8) {
        match self {
            AsteroidKind::Normal => (1.0, 1.0, 1),
            AsteroidKind::Fast => (1.5, 0.8, 1),
            AsteroidKind::Large => (1.0, 1.5, 2),
            AsteroidKind::Splitting => (1.0, 0.9, 1),
        }
    }

    /// Fill and glow colors for the renderer
    pub fn colors(&self) -> (&'static str, &'static str) {
        match self {
            AsteroidKind::Normal => ("#aa4400", "#ff6600"),
            AsteroidKind::Fast => ("#aa0044", "#ff0066"),
            AsteroidKind::Large => ("#444400", "#ffff00"),
            AsteroidKind::Splitting => ("#440044", "#ff00ff"),
        }
    }
}

/// An asteroid entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub rot_speed: f32,
    pub health: u8,
    pub kind: AsteroidKind,
}

impl Asteroid {
    /// Advance position and spin by one tick
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.rotation += self.rot_speed;
    }

    /// Whether destroying this asteroid yields children
    pub fn splits(&self) -> bool {
        match self.kind {
            AsteroidKind::Splitting => self.size > SPLIT_MIN_SIZE,
            AsteroidKind::Normal | AsteroidKind::Fast | AsteroidKind::Large => false,
        }
    }
}

/// A laser shot travelling straight up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Laser {
    pub pos: Vec2,
    pub speed: f32,
    pub size: f32,
    /// Recent positions, oldest first
    pub trail: Vec<Vec2>,
}

impl Laser {
    /// Record current position to trail, evicting the oldest
    pub fn record_trail(&mut self) {
        self.trail.push(self.pos);
        if self.trail.len() > LASER_TRAIL_LENGTH {
            self.trail.remove(0);
        }
    }
}

/// Particle color tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleColor {
    /// Asteroid explosions
    Orange,
    /// Player hits
    Cyan,
    Red,
}

impl ParticleColor {
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            ParticleColor::Orange => (255, 165, 0),
            ParticleColor::Cyan => (0, 255, 255),
            ParticleColor::Red => (255, 100, 100),
        }
    }
}

/// A short-lived visual particle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: i32,
    pub max_life: i32,
    pub color: ParticleColor,
    pub size: f32,
    pub gravity: f32,
}

impl Particle {
    /// Remaining life as 0-1 (renderer alpha)
    pub fn alpha(&self) -> f32 {
        (self.life as f32 / self.max_life as f32).clamp(0.0, 1.0)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// One extra life
    Shield,
    /// Picked up but has no effect yet
    Multishot,
    /// +1 player speed, capped
    SpeedBoost,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Shield,
        PowerUpKind::Multishot,
        PowerUpKind::SpeedBoost,
    ];

    pub fn color(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "#00ff00",
            PowerUpKind::Multishot => "#ff0000",
            PowerUpKind::SpeedBoost => "#ffff00",
        }
    }
}

/// A collectible power-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub size: f32,
    /// Ticks remaining
    pub life: i32,
    pub pulse: f32,
}

impl PowerUp {
    /// Radius scale for the pulsing animation (0.4 - 1.0)
    pub fn pulse_scale(&self) -> f32 {
        self.pulse.sin() * 0.3 + 0.7
    }
}

/// Per-session counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub score: u64,
    /// Game ends at zero or below
    pub lives: i32,
    pub destroyed: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub level: u32,
}

impl Default for SessionStats {
    fn default() -> Self {
        Self {
            score: 0,
            lives: INITIAL_LIVES,
            destroyed: 0,
            combo: 0,
            max_combo: 0,
            level: 1,
        }
    }
}

/// Things that happened during a tick, drained by the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Laser kill; `points` already includes the combo multiplier
    AsteroidDestroyed {
        kind: AsteroidKind,
        points: u64,
        combo: u32,
    },
    /// Asteroid left the playfield
    AsteroidEscaped { bonus: u64 },
    PlayerHit { lives: i32 },
    PowerUpCollected(PowerUpKind),
    LevelUp(u32),
    GameOver,
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct SimState {
    /// Seed this session was created with
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub player: Player,
    pub asteroids: Vec<Asteroid>,
    pub lasers: Vec<Laser>,
    pub particles: Vec<Particle>,
    pub power_ups: Vec<PowerUp>,
    pub stats: SessionStats,
    /// Ticks simulated this session
    pub time_ticks: u64,
    /// Set when lives run out; the tick stops mutating afterwards
    pub game_over: bool,
    /// Pending events since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl SimState {
    /// Create a fresh session state
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(&tuning),
            tuning,
            asteroids: Vec::new(),
            lasers: Vec::new(),
            particles: Vec::new(),
            power_ups: Vec::new(),
            stats: SessionStats::default(),
            time_ticks: 0,
            game_over: false,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = SimState::new(Tuning::default(), 1);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.player.size, 15.0);
        assert_eq!(state.player.speed, 5.0);
        assert_eq!(state.stats.lives, 3);
        assert_eq!(state.stats.level, 1);
        assert!(state.asteroids.is_empty());
        assert!(!state.game_over);
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = SimState::new(Tuning::default(), 1);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_laser_trail_capped() {
        let mut laser = Laser {
            pos: Vec2::ZERO,
            speed: 8.0,
            size: 3.0,
            trail: Vec::new(),
        };
        for i in 0..8 {
            laser.pos.y = -(i as f32);
            laser.record_trail();
        }
        assert_eq!(laser.trail.len(), LASER_TRAIL_LENGTH);
        // Oldest evicted first
        assert_eq!(laser.trail[0].y, -3.0);
        assert_eq!(laser.trail[4].y, -7.0);
    }

    #[test]
    fn test_split_eligibility() {
        let mut asteroid = Asteroid {
            id: 1,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: 25.0,
            rotation: 0.0,
            rot_speed: 0.0,
            health: 1,
            kind: AsteroidKind::Splitting,
        };
        assert!(asteroid.splits());
        asteroid.size = 20.0;
        assert!(!asteroid.splits());
        asteroid.size = 30.0;
        asteroid.kind = AsteroidKind::Large;
        assert!(!asteroid.splits());
    }

    #[test]
    fn test_player_clamp() {
        let mut player = Player::new(&Tuning::default());
        player.pos = Vec2::new(-50.0, 900.0);
        player.clamp_to(800.0, 600.0);
        assert_eq!(player.pos, Vec2::new(15.0, 585.0));
    }

    #[test]
    fn test_player_clamp_narrow_field() {
        let mut player = Player::new(&Tuning::default());
        player.pos = Vec2::new(40.0, -3.0);
        player.clamp_to(20.0, 10.0);
        assert_eq!(player.pos, Vec2::new(15.0, 15.0));
    }
}
