//! Per-frame simulation tick
//!
//! Core game loop that advances the simulation by one display frame. Phases
//! run in a fixed order and each finishes before the next starts. Removals are
//! applied after a phase has walked its collection, never during.

use rand::Rng;

use super::collision::{intersects, is_off_screen};
use super::spawn::{create_asteroid, create_particle, create_power_up, split_asteroid};
use super::state::{Asteroid, GameEvent, ParticleColor, PowerUpKind, SimState};
use crate::consts::*;

/// Held directions for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Advance the simulation by one frame
pub fn tick(state: &mut SimState, input: &TickInput) {
    // Game over freezes the world
    if state.game_over {
        return;
    }

    state.time_ticks += 1;

    update_player(state, input);
    update_lasers(state);
    update_asteroids(state);
    update_particles(state);
    update_power_ups(state);

    if !state.game_over {
        spawn_asteroids(state);
    }

    update_level(state);
}

fn update_player(state: &mut SimState, input: &TickInput) {
    let (width, height) = (state.tuning.canvas_width, state.tuning.canvas_height);
    let player = &mut state.player;
    let speed = player.speed;

    if input.left {
        player.pos.x -= speed;
    }
    if input.right {
        player.pos.x += speed;
    }
    if input.up {
        player.pos.y -= speed;
    }
    if input.down {
        player.pos.y += speed;
    }
    player.clamp_to(width, height);
}

fn update_lasers(state: &mut SimState) {
    // Asteroid indices destroyed this phase, in hit order
    let mut hits: Vec<usize> = Vec::new();

    let asteroids = &state.asteroids;
    state.lasers.retain_mut(|laser| {
        laser.record_trail();
        laser.pos.y -= laser.speed;

        if laser.pos.y < LASER_TOP_BOUND {
            return false;
        }

        // One asteroid per laser; skip ones already claimed this tick
        let target = asteroids
            .iter()
            .enumerate()
            .find(|(i, asteroid)| !hits.contains(i) && intersects(&*laser, *asteroid))
            .map(|(i, _)| i);

        match target {
            Some(i) => {
                hits.push(i);
                false
            }
            None => true,
        }
    });

    if hits.is_empty() {
        return;
    }

    let mut children = Vec::new();
    for &i in &hits {
        let asteroid = state.asteroids[i].clone();
        resolve_asteroid_hit(state, &asteroid, &mut children);
    }

    let mut index = 0;
    state.asteroids.retain(|_| {
        let keep = !hits.contains(&index);
        index += 1;
        keep
    });
    state.asteroids.extend(children);
}

/// Explosion, optional split and drop, then combo scoring
fn resolve_asteroid_hit(state: &mut SimState, asteroid: &Asteroid, children: &mut Vec<Asteroid>) {
    for _ in 0..state.tuning.explosion_particles {
        let particle = create_particle(asteroid.pos, ParticleColor::Orange, None, &mut state.rng);
        state.particles.push(particle);
    }

    if asteroid.splits() {
        let ids = [state.next_entity_id(), state.next_entity_id()];
        children.extend(split_asteroid(asteroid, ids, &mut state.rng));
    }

    if state.rng.random::<f32>() < state.tuning.power_up_drop_chance {
        let power_up = create_power_up(asteroid.pos, &mut state.rng);
        state.power_ups.push(power_up);
    }

    let stats = &mut state.stats;
    stats.combo += 1;
    let points = state.tuning.hit_award(stats.combo);
    stats.max_combo = stats.max_combo.max(stats.combo);
    stats.score += points;
    stats.destroyed += 1;

    state.events.push(GameEvent::AsteroidDestroyed {
        kind: asteroid.kind,
        points,
        combo: stats.combo,
    });
}

fn update_asteroids(state: &mut SimState) {
    let (width, height) = (state.tuning.canvas_width, state.tuning.canvas_height);
    let mut asteroids = std::mem::take(&mut state.asteroids);

    asteroids.retain_mut(|asteroid| {
        asteroid.advance();

        if is_off_screen(asteroid.pos, width, height, OFF_SCREEN_MARGIN) {
            // Dodged: bonus without touching the combo
            if !state.game_over {
                let bonus = state.tuning.survival_bonus;
                state.stats.score += bonus;
                state.events.push(GameEvent::AsteroidEscaped { bonus });
            }
            return false;
        }

        if !state.game_over && intersects(&*asteroid, &state.player) {
            resolve_player_hit(state);
            return false;
        }

        true
    });

    state.asteroids = asteroids;
}

/// Lose a life and the combo; the asteroid is consumed by the caller
fn resolve_player_hit(state: &mut SimState) {
    let origin = state.player.pos;
    for _ in 0..state.tuning.player_hit_particles {
        let particle = create_particle(origin, ParticleColor::Cyan, None, &mut state.rng);
        state.particles.push(particle);
    }

    state.stats.lives -= 1;
    state.stats.combo = 0;
    state.events.push(GameEvent::PlayerHit {
        lives: state.stats.lives,
    });

    if state.stats.lives <= 0 {
        state.game_over = true;
        state.events.push(GameEvent::GameOver);
    }
}

fn update_particles(state: &mut SimState) {
    state.particles.retain_mut(|particle| {
        particle.pos += particle.vel;
        particle.vel.y += particle.gravity;
        particle.vel *= PARTICLE_FRICTION;
        particle.life -= 1;
        particle.life > 0
    });
}

fn update_power_ups(state: &mut SimState) {
    let mut power_ups = std::mem::take(&mut state.power_ups);

    power_ups.retain_mut(|power_up| {
        power_up.pulse += POWER_UP_PULSE_STEP;
        power_up.life -= 1;

        if power_up.life <= 0 {
            return false;
        }

        if !state.game_over && intersects(&*power_up, &state.player) {
            apply_power_up(state, power_up.kind);
            return false;
        }

        true
    });

    state.power_ups = power_ups;
}

fn apply_power_up(state: &mut SimState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Shield => state.stats.lives += 1,
        // Collected, but firing is unchanged
        PowerUpKind::Multishot => {}
        PowerUpKind::SpeedBoost => {
            state.player.speed = (state.player.speed + 1.0).min(PLAYER_MAX_SPEED);
        }
    }
    state.events.push(GameEvent::PowerUpCollected(kind));
}

fn spawn_asteroids(state: &mut SimState) {
    let rate = state.tuning.spawn_rate(state.stats.score);
    if state.rng.random::<f32>() < rate {
        let id = state.next_entity_id();
        let asteroid = create_asteroid(
            id,
            state.tuning.canvas_width,
            state.tuning.canvas_height,
            &mut state.rng,
        );
        state.asteroids.push(asteroid);
    }
}

fn update_level(state: &mut SimState) {
    let level = state.tuning.level_for_score(state.stats.score);
    if level > state.stats.level {
        state.stats.level = level;
        state.events.push(GameEvent::LevelUp(level));
        log::info!("Level {} reached at score {}", level, state.stats.score);
    }
}
