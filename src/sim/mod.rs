//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of platform code:
//! - One tick per display frame, no wall-clock time
//! - Randomness only through the session's seeded RNG
//! - No rendering, audio or storage dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Circle, intersects, is_off_screen};
pub use spawn::{SpawnEdge, create_asteroid, create_laser, create_particle, create_power_up, split_asteroid};
pub use state::{
    Asteroid, AsteroidKind, GameEvent, Laser, Particle, ParticleColor, Player, PowerUp,
    PowerUpKind, SessionStats, SimState,
};
pub use tick::{TickInput, tick};
