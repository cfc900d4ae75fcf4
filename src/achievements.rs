//! Achievement tracking
//!
//! Checked by the controller after every tick against the live session.

use serde::{Deserialize, Serialize};

use crate::consts::TICKS_PER_SECOND;
use crate::persistence::{self, PersistError};
use crate::platform::storage::KeyValueStore;
use crate::sim::SessionStats;

/// Ticks alive for Survivor (5 minutes)
pub const SURVIVOR_TICKS: u64 = 5 * 60 * TICKS_PER_SECOND as u64;

/// Unlockable achievements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    FirstBlood,
    Sharpshooter,
    Survivor,
    Destroyer,
    Perfectionist,
}

impl Achievement {
    pub const ALL: [Achievement; 5] = [
        Achievement::FirstBlood,
        Achievement::Sharpshooter,
        Achievement::Survivor,
        Achievement::Destroyer,
        Achievement::Perfectionist,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Achievement::FirstBlood => "First Blood",
            Achievement::Sharpshooter => "Sharpshooter",
            Achievement::Survivor => "Survivor",
            Achievement::Destroyer => "Destroyer",
            Achievement::Perfectionist => "Perfectionist",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Achievement::FirstBlood => "Destroy your first asteroid",
            Achievement::Sharpshooter => "Achieve 10x combo",
            Achievement::Survivor => "Survive 5 minutes",
            Achievement::Destroyer => "Destroy 100 asteroids",
            Achievement::Perfectionist => "Complete a level without taking damage",
        }
    }
}

/// Per-level bookkeeping for Perfectionist
#[derive(Debug, Clone, Copy)]
struct LevelWatch {
    level: u32,
    damaged: bool,
}

impl Default for LevelWatch {
    fn default() -> Self {
        Self {
            level: 1,
            damaged: false,
        }
    }
}

/// Unlocked achievements plus the session watch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Achievements {
    unlocked: Vec<Achievement>,
    #[serde(skip)]
    watch: LevelWatch,
}

impl Achievements {
    /// Storage key
    const STORAGE_KEY: &'static str = "asteroid_dodger_achievements";

    pub fn is_unlocked(&self, achievement: Achievement) -> bool {
        self.unlocked.contains(&achievement)
    }

    pub fn unlocked(&self) -> &[Achievement] {
        &self.unlocked
    }

    /// Forget per-session progress (call on start/restart)
    pub fn begin_session(&mut self) {
        self.watch = LevelWatch::default();
    }

    /// The player lost a life during the current level
    pub fn record_damage(&mut self) {
        self.watch.damaged = true;
    }

    /// Evaluate the session; returns achievements unlocked by this call
    pub fn check(&mut self, stats: &SessionStats, time_ticks: u64) -> Vec<Achievement> {
        let mut earned = Vec::new();

        if stats.destroyed >= 1 {
            earned.push(Achievement::FirstBlood);
        }
        if stats.combo >= 10 {
            earned.push(Achievement::Sharpshooter);
        }
        if stats.destroyed >= 100 {
            earned.push(Achievement::Destroyer);
        }
        if time_ticks >= SURVIVOR_TICKS && stats.lives > 0 {
            earned.push(Achievement::Survivor);
        }
        if self.level_cleared_without_damage(stats) {
            earned.push(Achievement::Perfectionist);
        }

        earned.retain(|a| !self.unlocked.contains(a));
        for achievement in &earned {
            log::info!(
                "Achievement unlocked: {} - {}",
                achievement.name(),
                achievement.description()
            );
            self.unlocked.push(*achievement);
        }
        earned
    }

    fn level_cleared_without_damage(&mut self, stats: &SessionStats) -> bool {
        if stats.level <= self.watch.level {
            return false;
        }
        let clean = !self.watch.damaged;
        self.watch = LevelWatch {
            level: stats.level,
            damaged: false,
        };
        clean
    }

    /// Load unlocked achievements
    pub fn load(store: &impl KeyValueStore) -> Self {
        persistence::load_or_default(store, Self::STORAGE_KEY)
    }

    /// Save unlocked achievements
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), PersistError> {
        persistence::save(store, Self::STORAGE_KEY, self)
    }
}
