//! Entity factories
//!
//! Pure constructors: the only side effect is consuming the caller's RNG.

use glam::Vec2;
use rand::Rng;

use super::state::{
    Asteroid, AsteroidKind, Laser, Particle, ParticleColor, PowerUp, PowerUpKind,
};
use crate::consts::*;
use crate::tuning::Tuning;

/// Playfield edge an asteroid enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnEdge {
    Top,
    Right,
    Bottom,
    Left,
}

impl SpawnEdge {
    pub const ALL: [SpawnEdge; 4] = [
        SpawnEdge::Top,
        SpawnEdge::Right,
        SpawnEdge::Bottom,
        SpawnEdge::Left,
    ];

    /// Position just outside the edge and an inward-biased velocity
    fn entry<R: Rng + ?Sized>(&self, width: f32, height: f32, rng: &mut R) -> (Vec2, Vec2) {
        // Sideways drift in [-2, 2), inward speed in [1, 4)
        let along = rng.random::<f32>();
        let drift = (rng.random::<f32>() - 0.5) * 4.0;
        let inward = rng.random::<f32>() * 3.0 + 1.0;
        match self {
            SpawnEdge::Top => (
                Vec2::new(along * width, -SPAWN_MARGIN),
                Vec2::new(drift, inward),
            ),
            SpawnEdge::Right => (
                Vec2::new(width + SPAWN_MARGIN, along * height),
                Vec2::new(-inward, drift),
            ),
            SpawnEdge::Bottom => (
                Vec2::new(along * width, height + SPAWN_MARGIN),
                Vec2::new(drift, -inward),
            ),
            SpawnEdge::Left => (
                Vec2::new(-SPAWN_MARGIN, along * height),
                Vec2::new(inward, drift),
            ),
        }
    }
}

/// Create an asteroid entering from a random edge with a random variant
pub fn create_asteroid<R: Rng + ?Sized>(id: u32, width: f32, height: f32, rng: &mut R) -> Asteroid {
    let edge = SpawnEdge::ALL[rng.random_range(0..SpawnEdge::ALL.len())];
    let (pos, vel) = edge.entry(width, height, rng);
    let kind = AsteroidKind::ALL[rng.random_range(0..AsteroidKind::ALL.len())];

    let base_size = rng.random::<f32>() * 20.0 + 15.0;
    let rot_speed = (rng.random::<f32>() - 0.5) * 0.2;
    let (vel_scale, size_scale, health) = kind.modifiers();

    Asteroid {
        id,
        pos,
        vel: vel * vel_scale,
        size: base_size * size_scale,
        rotation: 0.0,
        rot_speed,
        health,
        kind,
    }
}

/// Two smaller, normal children of a destroyed splitting asteroid
pub fn split_asteroid<R: Rng + ?Sized>(parent: &Asteroid, ids: [u32; 2], rng: &mut R) -> [Asteroid; 2] {
    ids.map(|id| {
        let jitter = Vec2::new(
            rng.random_range(-SPLIT_JITTER..SPLIT_JITTER),
            rng.random_range(-SPLIT_JITTER..SPLIT_JITTER),
        );
        Asteroid {
            id,
            vel: parent.vel + jitter,
            size: parent.size * SPLIT_SIZE_FACTOR,
            kind: AsteroidKind::Normal,
            ..parent.clone()
        }
    })
}

/// Create a particle; velocity is drawn from [-5, 5]² when not given
pub fn create_particle<R: Rng + ?Sized>(
    pos: Vec2,
    color: ParticleColor,
    vel: Option<Vec2>,
    rng: &mut R,
) -> Particle {
    let vel = vel.unwrap_or_else(|| {
        Vec2::new(
            rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
            rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
        )
    });
    Particle {
        pos,
        vel,
        life: PARTICLE_LIFE,
        max_life: PARTICLE_LIFE,
        color,
        size: rng.random::<f32>() * 3.0 + 1.0,
        gravity: PARTICLE_GRAVITY,
    }
}

/// Create a power-up of a random kind
pub fn create_power_up<R: Rng + ?Sized>(pos: Vec2, rng: &mut R) -> PowerUp {
    let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
    PowerUp {
        pos,
        kind,
        size: POWER_UP_RADIUS,
        life: POWER_UP_LIFE,
        pulse: 0.0,
    }
}

/// Create a laser at the muzzle position
pub fn create_laser(origin: Vec2, tuning: &Tuning) -> Laser {
    Laser {
        pos: origin,
        speed: tuning.laser_speed,
        size: tuning.laser_radius,
        trail: Vec::with_capacity(LASER_TRAIL_LENGTH + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_asteroids_spawn_outside_and_head_inward() {
        let mut rng = Pcg32::seed_from_u64(42);
        for id in 0..500 {
            let a = create_asteroid(id, 800.0, 600.0, &mut rng);
            assert!(a.size > 0.0);
            assert!(a.health >= 1);
            let outside = a.pos.x < 0.0 || a.pos.x > 800.0 || a.pos.y < 0.0 || a.pos.y > 600.0;
            assert!(outside, "spawned inside playfield: {:?}", a.pos);

            // Velocity points back toward the playfield on the entry axis
            if a.pos.y < 0.0 {
                assert!(a.vel.y > 0.0);
            } else if a.pos.y > 600.0 {
                assert!(a.vel.y < 0.0);
            } else if a.pos.x < 0.0 {
                assert!(a.vel.x > 0.0);
            } else {
                assert!(a.vel.x < 0.0);
            }
        }
    }

    #[test]
    fn test_variant_modifiers() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut seen = [false; 4];
        for id in 0..400 {
            let a = create_asteroid(id, 800.0, 600.0, &mut rng);
            match a.kind {
                AsteroidKind::Normal => {
                    seen[0] = true;
                    assert!((15.0..35.0).contains(&a.size));
                    assert_eq!(a.health, 1);
                }
                AsteroidKind::Fast => {
                    seen[1] = true;
                    assert!((12.0..28.0).contains(&a.size));
                    assert_eq!(a.health, 1);
                }
                AsteroidKind::Large => {
                    seen[2] = true;
                    assert!((22.5..52.5).contains(&a.size));
                    assert_eq!(a.health, 2);
                }
                AsteroidKind::Splitting => {
                    seen[3] = true;
                    assert!((13.5..31.5).contains(&a.size));
                    assert_eq!(a.health, 1);
                }
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_split_children() {
        let mut rng = Pcg32::seed_from_u64(9);
        let parent = Asteroid {
            id: 1,
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::new(1.0, 2.0),
            size: 30.0,
            rotation: 0.5,
            rot_speed: 0.05,
            health: 1,
            kind: AsteroidKind::Splitting,
        };
        let children = split_asteroid(&parent, [2, 3], &mut rng);
        for child in &children {
            assert_eq!(child.kind, AsteroidKind::Normal);
            assert!((child.size - 18.0).abs() < 1e-4);
            assert_eq!(child.pos, parent.pos);
            assert_eq!(child.rotation, parent.rotation);
            assert!((child.vel.x - parent.vel.x).abs() <= 2.0);
            assert!((child.vel.y - parent.vel.y).abs() <= 2.0);
            assert!(!child.splits());
        }
        assert_ne!(children[0].id, children[1].id);
    }

    #[test]
    fn test_particle_defaults() {
        let mut rng = Pcg32::seed_from_u64(1);
        let p = create_particle(Vec2::new(5.0, 5.0), ParticleColor::Orange, None, &mut rng);
        assert_eq!(p.life, 30);
        assert_eq!(p.max_life, 30);
        assert!(p.vel.x.abs() <= 5.0 && p.vel.y.abs() <= 5.0);
        assert_eq!(p.gravity, PARTICLE_GRAVITY);

        let given = Vec2::new(1.0, -1.0);
        let p = create_particle(Vec2::ZERO, ParticleColor::Cyan, Some(given), &mut rng);
        assert_eq!(p.vel, given);
    }

    #[test]
    fn test_power_up_defaults() {
        let mut rng = Pcg32::seed_from_u64(1);
        let p = create_power_up(Vec2::new(10.0, 20.0), &mut rng);
        assert_eq!(p.life, 300);
        assert_eq!(p.size, 12.0);
        assert_eq!(p.pulse, 0.0);
    }

    #[test]
    fn test_laser_defaults() {
        let laser = create_laser(Vec2::new(400.0, 285.0), &Tuning::default());
        assert_eq!(laser.speed, 8.0);
        assert_eq!(laser.size, 3.0);
        assert!(laser.trail.is_empty());
    }
}
