//! Session controller
//!
//! Owns one [`SimState`] and drives it through the session lifecycle:
//!
//! ```text
//! Ready ──start──▶ Running ◀──toggle──▶ Paused
//!                     │
//!                 lives = 0
//!                     ▼
//!                 GameOver ──restart──▶ Running
//! ```
//!
//! Everything outside the simulation (audio, leaderboard, achievements, HUD)
//! hangs off the events the tick leaves behind.

use glam::Vec2;
use rand::Rng;

use crate::achievements::{Achievement, Achievements};
use crate::audio::{AudioSink, SoundEffect};
use crate::highscores::{HighScoreEntry, HighScores};
use crate::persistence::PersistError;
use crate::platform::input::{Action, InputState, Platform};
use crate::platform::storage::KeyValueStore;
use crate::platform::time::FpsCounter;
use crate::settings::Settings;
use crate::sim::{GameEvent, SessionStats, SimState, create_laser, tick};
use crate::tuning::Tuning;

/// Frames the screen shakes after the player is hit
pub const SCREEN_SHAKE_TICKS: u32 = 12;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Configured, waiting for `start`
    #[default]
    Ready,
    Running,
    Paused,
    /// Terminal until `restart`
    GameOver,
}

/// Game controller
pub struct Game<A: AudioSink> {
    sim: SimState,
    /// Balance before settings are applied
    base_tuning: Tuning,
    settings: Settings,
    phase: SessionPhase,
    platform: Platform,
    input: InputState,
    audio: A,
    high_scores: HighScores,
    achievements: Achievements,
    /// Unlocked since the UI last looked
    pending_achievements: Vec<Achievement>,
    last_shot_ms: Option<f64>,
    score_submitted: bool,
    fps: FpsCounter,
    shake_ticks: u32,
}

impl<A: AudioSink> Game<A> {
    pub fn new(tuning: Tuning, settings: Settings, seed: u64, mut audio: A) -> Self {
        audio.set_master_volume(settings.master_volume);
        let high_scores = HighScores::with_capacity(tuning.leaderboard_size);
        Self {
            sim: SimState::new(tuning.clone().with_settings(&settings), seed),
            base_tuning: tuning,
            settings,
            phase: SessionPhase::Ready,
            platform: Platform::default(),
            input: InputState::default(),
            audio,
            high_scores,
            achievements: Achievements::default(),
            pending_achievements: Vec::new(),
            last_shot_ms: None,
            score_submitted: false,
            fps: FpsCounter::new(),
            shake_ticks: 0,
        }
    }

    /// Build a controller from whatever the store holds
    pub fn load(store: &impl KeyValueStore, tuning: Tuning, seed: u64, audio: A) -> Self {
        let settings = Settings::load(store);
        let capacity = tuning.leaderboard_size;
        let mut game = Self::new(tuning, settings, seed, audio);
        game.high_scores = HighScores::load(store);
        // Board size follows the tuning, not whatever was stored
        game.high_scores.set_capacity(capacity);
        game.achievements = Achievements::load(store);
        game
    }

    /// Write leaderboard and achievements
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), PersistError> {
        self.high_scores.save(store)?;
        self.achievements.save(store)?;
        Ok(())
    }

    // === Lifecycle ===

    /// Ready → Running
    pub fn start(&mut self, platform: Platform) -> bool {
        if self.phase != SessionPhase::Ready {
            return false;
        }
        self.platform = platform;
        self.achievements.begin_session();
        self.phase = SessionPhase::Running;
        log::info!(
            "Session started on {} (seed {})",
            platform.as_str(),
            self.sim.seed
        );
        true
    }

    /// Running ⇄ Paused; no-op elsewhere
    pub fn toggle_pause(&mut self) {
        match self.phase {
            SessionPhase::Running => {
                self.phase = SessionPhase::Paused;
                self.input.release_all();
                log::info!("Paused");
            }
            SessionPhase::Paused => {
                self.phase = SessionPhase::Running;
                log::info!("Resumed");
            }
            SessionPhase::Ready | SessionPhase::GameOver => {}
        }
    }

    /// Window blur or tab hidden
    pub fn focus_lost(&mut self) {
        if self.settings.mute_on_blur {
            self.audio.set_muted(true);
        }
        if self.phase == SessionPhase::Running {
            self.phase = SessionPhase::Paused;
            self.input.release_all();
            log::info!("Auto-paused (focus lost)");
        }
    }

    /// Focus back; the session stays paused until the player resumes
    pub fn focus_gained(&mut self) {
        self.audio.set_muted(false);
    }

    /// Throw the session away and start a fresh one
    pub fn restart(&mut self) {
        let seed = self.sim.rng.random::<u64>();
        let tuning = self.base_tuning.clone().with_settings(&self.settings);
        self.sim = SimState::new(tuning, seed);
        self.input.release_all();
        self.last_shot_ms = None;
        self.score_submitted = false;
        self.shake_ticks = 0;
        self.achievements.begin_session();
        self.phase = SessionPhase::Running;
        log::info!("Session restarted (seed {})", seed);
    }

    // === Input ===

    pub fn key_down(&mut self, action: Action) {
        self.key_event(action, true);
    }

    pub fn key_up(&mut self, action: Action) {
        self.key_event(action, false);
    }

    fn key_event(&mut self, action: Action, pressed: bool) {
        if action == Action::Pause {
            if pressed {
                self.toggle_pause();
            }
            return;
        }
        if self.phase == SessionPhase::Paused {
            return;
        }
        self.input.set(action, pressed);
    }

    /// Attempt a shot at `now_ms`; false while cooling down or not running
    pub fn fire(&mut self, now_ms: f64) -> bool {
        if self.phase != SessionPhase::Running {
            return false;
        }
        let cooldown = self.sim.tuning.laser_cooldown_ms;
        if let Some(last) = self.last_shot_ms {
            if now_ms - last <= cooldown {
                return false;
            }
        }

        let player = &self.sim.player;
        let origin = Vec2::new(player.pos.x, player.pos.y - player.size);
        let laser = create_laser(origin, &self.sim.tuning);
        self.sim.lasers.push(laser);
        self.last_shot_ms = Some(now_ms);
        self.audio.play(SoundEffect::Shoot);
        true
    }

    // === Frame ===

    /// Called once per display refresh; returns true if the simulation advanced
    pub fn frame(&mut self, now_ms: f64) -> bool {
        self.fps.frame(now_ms);
        if self.phase != SessionPhase::Running {
            return false;
        }
        self.shake_ticks = self.shake_ticks.saturating_sub(1);

        if self.input.fire || self.settings.auto_fire {
            self.fire(now_ms);
        }

        tick(&mut self.sim, &self.input.to_tick_input());

        for event in self.sim.drain_events() {
            self.dispatch(event);
        }

        let earned = self
            .achievements
            .check(&self.sim.stats, self.sim.time_ticks);
        self.pending_achievements.extend(earned);
        true
    }

    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::AsteroidDestroyed { .. } => self.audio.play(SoundEffect::Hit),
            GameEvent::PlayerHit { .. } => {
                self.audio.play(SoundEffect::Destroy);
                self.achievements.record_damage();
                if self.settings.screen_shake {
                    self.shake_ticks = SCREEN_SHAKE_TICKS;
                }
            }
            GameEvent::GameOver => {
                self.audio.play(SoundEffect::GameOver);
                self.phase = SessionPhase::GameOver;
                self.input.release_all();
                let stats = &self.sim.stats;
                log::info!(
                    "Game over: score {}, destroyed {}, best combo {}",
                    stats.score,
                    stats.destroyed,
                    stats.max_combo
                );
            }
            GameEvent::AsteroidEscaped { .. }
            | GameEvent::PowerUpCollected(_)
            | GameEvent::LevelUp(_) => {}
        }
    }

    // === Settings ===

    /// Replace preferences; balance changes apply to the running session
    pub fn apply_settings(&mut self, settings: Settings) {
        self.audio.set_master_volume(settings.master_volume);
        self.sim.tuning = self.base_tuning.clone().with_settings(&settings);
        self.settings = settings;
    }

    // === Leaderboard ===

    /// Game is over and the score would place on the board
    pub fn is_high_score(&self) -> bool {
        self.phase == SessionPhase::GameOver
            && !self.score_submitted
            && self.high_scores.qualifies(self.sim.stats.score)
    }

    /// Record the finished session once; returns the rank achieved
    pub fn submit_score(&mut self, name: &str, date: &str) -> Option<usize> {
        if self.phase != SessionPhase::GameOver || self.score_submitted {
            return None;
        }
        self.score_submitted = true;
        let stats = &self.sim.stats;
        let rank = self.high_scores.add_entry(HighScoreEntry {
            name: name.to_string(),
            score: stats.score,
            destroyed: stats.destroyed,
            max_combo: stats.max_combo,
            date: date.to_string(),
        });
        if let Some(rank) = rank {
            log::info!("High score #{}: {}", rank, stats.score);
        }
        rank
    }

    // === Accessors ===

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Read-only view for renderers and the HUD
    pub fn state(&self) -> &SimState {
        &self.sim
    }

    pub fn stats(&self) -> &SessionStats {
        &self.sim.stats
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn leaderboard(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn achievements(&self) -> &Achievements {
        &self.achievements
    }

    /// Achievements unlocked since the last call
    pub fn drain_achievements(&mut self) -> Vec<Achievement> {
        std::mem::take(&mut self.pending_achievements)
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    /// Remaining frames of hit shake; zero when off or disabled
    pub fn shake_ticks(&self) -> u32 {
        self.shake_ticks
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::platform::storage::MemoryStore;
    use crate::consts::{POWER_UP_LIFE, POWER_UP_RADIUS};
    use crate::sim::{Asteroid, AsteroidKind, PowerUp, PowerUpKind};

    fn quiet_tuning() -> Tuning {
        Tuning {
            spawn_base_rate: 0.0,
            spawn_score_scale: 0.0,
            power_up_drop_chance: 0.0,
            ..Tuning::default()
        }
    }

    fn running_game() -> Game<RecordingAudio> {
        let mut game = Game::new(
            quiet_tuning(),
            Settings::default(),
            7,
            RecordingAudio::default(),
        );
        assert!(game.start(Platform::Pc));
        game
    }

    fn drop_asteroid_on_player(game: &mut Game<RecordingAudio>) {
        let id = game.sim.next_entity_id();
        let pos = game.sim.player.pos;
        game.sim.asteroids.push(Asteroid {
            id,
            pos,
            vel: Vec2::ZERO,
            size: 20.0,
            rotation: 0.0,
            rot_speed: 0.0,
            health: 1,
            kind: AsteroidKind::Normal,
        });
    }

    #[test]
    fn test_start_only_from_ready() {
        let mut game = running_game();
        assert_eq!(game.phase(), SessionPhase::Running);
        assert!(!game.start(Platform::Mobile));
        assert_eq!(game.platform(), Platform::Pc);
    }

    #[test]
    fn test_ready_does_not_tick() {
        let mut game = Game::new(
            quiet_tuning(),
            Settings::default(),
            1,
            RecordingAudio::default(),
        );
        assert!(!game.frame(16.0));
        assert_eq!(game.state().time_ticks, 0);
    }

    #[test]
    fn test_pause_toggle() {
        let mut game = running_game();
        game.toggle_pause();
        assert_eq!(game.phase(), SessionPhase::Paused);
        assert!(!game.frame(16.0));
        game.key_down(Action::Pause);
        assert_eq!(game.phase(), SessionPhase::Running);
        assert!(game.frame(32.0));
        assert_eq!(game.state().time_ticks, 1);
    }

    #[test]
    fn test_pause_is_noop_outside_session() {
        let mut game = Game::new(
            quiet_tuning(),
            Settings::default(),
            1,
            RecordingAudio::default(),
        );
        game.toggle_pause();
        assert_eq!(game.phase(), SessionPhase::Ready);
    }

    #[test]
    fn test_focus_loss_pauses_without_auto_resume() {
        let mut game = running_game();
        game.focus_lost();
        assert_eq!(game.phase(), SessionPhase::Paused);
        assert!(game.audio().muted);
        game.focus_gained();
        assert_eq!(game.phase(), SessionPhase::Paused);
        assert!(!game.audio().muted);
    }

    #[test]
    fn test_movement_ignored_while_paused() {
        let mut game = running_game();
        game.toggle_pause();
        game.key_down(Action::Left);
        game.toggle_pause();
        let x = game.state().player.pos.x;
        game.frame(16.0);
        assert_eq!(game.state().player.pos.x, x);

        game.key_down(Action::Left);
        game.frame(32.0);
        assert_eq!(game.state().player.pos.x, x - 5.0);
        game.key_up(Action::Left);
        game.frame(48.0);
        assert_eq!(game.state().player.pos.x, x - 5.0);
    }

    #[test]
    fn test_fire_cooldown_is_strict() {
        let mut game = running_game();
        assert!(game.fire(1000.0));
        assert!(!game.fire(1100.0));
        assert!(!game.fire(1150.0));
        assert!(game.fire(1150.5));
        assert_eq!(game.state().lasers.len(), 2);
        assert_eq!(
            game.audio().played,
            vec![SoundEffect::Shoot, SoundEffect::Shoot]
        );
    }

    #[test]
    fn test_laser_spawns_above_player() {
        let mut game = running_game();
        game.fire(0.0);
        let laser = &game.state().lasers[0];
        assert_eq!(laser.pos, Vec2::new(400.0, 300.0 - 15.0));
    }

    #[test]
    fn test_fire_rejected_when_not_running() {
        let mut game = running_game();
        game.toggle_pause();
        assert!(!game.fire(0.0));
        assert!(game.state().lasers.is_empty());
    }

    #[test]
    fn test_held_fire_repeats_at_cooldown() {
        let mut game = running_game();
        game.key_down(Action::Fire);
        // 16 ms frames for just under half a second
        for i in 0..30 {
            game.frame(i as f64 * 16.0);
        }
        // Shots at 0, 160, 320 ms
        let shots = game
            .audio()
            .played
            .iter()
            .filter(|s| **s == SoundEffect::Shoot)
            .count();
        assert_eq!(shots, 3);
    }

    #[test]
    fn test_auto_fire_setting() {
        let mut game = running_game();
        game.apply_settings(Settings {
            auto_fire: true,
            ..Settings::default()
        });
        game.frame(0.0);
        assert_eq!(game.state().lasers.len(), 1);
    }

    #[test]
    fn test_player_hit_plays_destroy() {
        let mut game = running_game();
        drop_asteroid_on_player(&mut game);
        game.frame(16.0);
        assert_eq!(game.stats().lives, 2);
        assert_eq!(game.audio().played, vec![SoundEffect::Destroy]);
        assert_eq!(game.phase(), SessionPhase::Running);
    }

    #[test]
    fn test_last_life_ends_session() {
        let mut game = running_game();
        game.sim.stats.lives = 1;
        drop_asteroid_on_player(&mut game);
        game.frame(16.0);

        assert_eq!(game.phase(), SessionPhase::GameOver);
        assert_eq!(
            game.audio().played,
            vec![SoundEffect::Destroy, SoundEffect::GameOver]
        );

        // Frozen
        let ticks = game.state().time_ticks;
        game.key_down(Action::Right);
        assert!(!game.frame(32.0));
        assert_eq!(game.state().time_ticks, ticks);
        game.toggle_pause();
        assert_eq!(game.phase(), SessionPhase::GameOver);
    }

    #[test]
    fn test_laser_kill_plays_hit() {
        let mut game = running_game();
        let id = game.sim.next_entity_id();
        game.sim.asteroids.push(Asteroid {
            id,
            pos: Vec2::new(400.0, 100.0),
            vel: Vec2::ZERO,
            size: 20.0,
            rotation: 0.0,
            rot_speed: 0.0,
            health: 1,
            kind: AsteroidKind::Normal,
        });
        game.fire(0.0);
        for i in 1..40 {
            game.frame(i as f64 * 1000.0);
            if game.stats().destroyed > 0 {
                break;
            }
        }
        assert_eq!(game.stats().destroyed, 1);
        assert_eq!(game.stats().score, 50);
        assert!(game.audio().played.contains(&SoundEffect::Hit));
        assert_eq!(game.drain_achievements(), vec![Achievement::FirstBlood]);
        assert!(game.drain_achievements().is_empty());
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut game = running_game();
        game.sim.stats.lives = 1;
        game.sim.stats.score = 700;
        drop_asteroid_on_player(&mut game);
        game.frame(16.0);
        assert_eq!(game.phase(), SessionPhase::GameOver);

        game.restart();
        assert_eq!(game.phase(), SessionPhase::Running);
        assert_eq!(*game.stats(), SessionStats::default());
        assert!(game.state().asteroids.is_empty());
        assert_eq!(game.state().time_ticks, 0);
        assert!(game.fire(0.0));
    }

    #[test]
    fn test_submit_score_once() {
        let mut game = running_game();
        assert_eq!(game.submit_score("early", "today"), None);

        game.sim.stats.lives = 1;
        game.sim.stats.score = 1234;
        drop_asteroid_on_player(&mut game);
        game.frame(16.0);

        assert!(game.is_high_score());
        assert_eq!(game.submit_score("  ", "1/2/2026"), Some(1));
        assert!(!game.is_high_score());
        assert_eq!(game.submit_score("again", "1/2/2026"), None);

        let top = game.leaderboard().top(5);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].name, "Anonymous");
        assert_eq!(top[0].score, 1234);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let mut store = MemoryStore::new();
        let mut game = running_game();
        game.sim.stats.lives = 1;
        game.sim.stats.score = 90;
        drop_asteroid_on_player(&mut game);
        game.frame(16.0);
        game.submit_score("Ada", "1/2/2026");
        game.save(&mut store).unwrap();

        let loaded = Game::load(&store, quiet_tuning(), 3, RecordingAudio::default());
        assert_eq!(loaded.leaderboard().top_score(), Some(90));
        assert_eq!(loaded.phase(), SessionPhase::Ready);
    }

    #[test]
    fn test_hit_and_shield_in_one_tick_spoils_perfectionist() {
        let mut game = running_game();
        drop_asteroid_on_player(&mut game);
        let pos = game.sim.player.pos;
        game.sim.power_ups.push(PowerUp {
            pos,
            kind: PowerUpKind::Shield,
            size: POWER_UP_RADIUS,
            life: POWER_UP_LIFE,
            pulse: 0.0,
        });
        game.frame(16.0);
        assert_eq!(game.stats().lives, 3);

        game.sim.stats.score = 1000;
        game.frame(32.0);
        assert_eq!(game.stats().level, 2);
        assert!(game.drain_achievements().is_empty());

        game.sim.stats.score = 2000;
        game.frame(48.0);
        assert_eq!(game.drain_achievements(), vec![Achievement::Perfectionist]);
    }

    #[test]
    fn test_player_hit_shakes_screen() {
        let mut game = running_game();
        assert_eq!(game.shake_ticks(), 0);
        drop_asteroid_on_player(&mut game);
        game.frame(16.0);
        assert_eq!(game.shake_ticks(), SCREEN_SHAKE_TICKS);

        for i in 0..SCREEN_SHAKE_TICKS {
            game.frame(32.0 + f64::from(i) * 16.0);
        }
        assert_eq!(game.shake_ticks(), 0);

        drop_asteroid_on_player(&mut game);
        game.frame(1000.0);
        game.restart();
        assert_eq!(game.shake_ticks(), 0);
    }

    #[test]
    fn test_screen_shake_can_be_disabled() {
        let mut game = running_game();
        game.apply_settings(Settings {
            screen_shake: false,
            ..Settings::default()
        });
        drop_asteroid_on_player(&mut game);
        game.frame(16.0);
        assert_eq!(game.stats().lives, 2);
        assert_eq!(game.shake_ticks(), 0);
    }

    #[test]
    fn test_load_uses_tuned_leaderboard_size() {
        let mut store = MemoryStore::new();
        let mut scores = HighScores::with_capacity(10);
        for i in 1..=8 {
            scores.add_entry(HighScoreEntry {
                name: format!("p{}", i),
                score: i * 100,
                destroyed: 0,
                max_combo: 0,
                date: String::new(),
            });
        }
        scores.save(&mut store).unwrap();

        let tuning = Tuning {
            leaderboard_size: 5,
            ..quiet_tuning()
        };
        let game = Game::load(&store, tuning, 1, RecordingAudio::default());
        assert_eq!(game.leaderboard().capacity(), 5);
        assert_eq!(game.leaderboard().len(), 5);
        assert_eq!(game.leaderboard().top_score(), Some(800));
    }

    #[test]
    fn test_load_repairs_zero_capacity() {
        let mut store = MemoryStore::new();
        store
            .set(
                "asteroid_dodger_highscores",
                r#"{"version":1,"payload":{"entries":[],"capacity":0}}"#,
            )
            .unwrap();
        let game = Game::load(&store, quiet_tuning(), 1, RecordingAudio::default());
        assert_eq!(game.leaderboard().capacity(), 10);
        assert!(game.leaderboard().qualifies(1));
    }

    #[test]
    fn test_settings_volume_reaches_audio() {
        let settings = Settings {
            master_volume: 0.6,
            ..Settings::default()
        };
        let game = Game::new(quiet_tuning(), settings, 1, RecordingAudio::default());
        assert_eq!(game.audio().master_volume, 0.6);
    }
}
