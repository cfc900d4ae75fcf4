//! Collision detection
//!
//! Every gameplay entity is treated as a circle. Only overlap is detected;
//! there is no collision response.

use glam::Vec2;

use super::state::{Asteroid, Laser, Player, PowerUp};

/// Anything with a circular collision footprint
pub trait Circle {
    fn center(&self) -> Vec2;
    fn radius(&self) -> f32;
}

impl Circle for Player {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.size
    }
}

impl Circle for Asteroid {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.size
    }
}

impl Circle for Laser {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.size
    }
}

impl Circle for PowerUp {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.size
    }
}

/// Circle-circle overlap (touching is not a hit)
#[inline]
pub fn intersects(a: &impl Circle, b: &impl Circle) -> bool {
    a.center().distance(b.center()) < a.radius() + b.radius()
}

/// True once a point is more than `margin` outside the playfield on any side
#[inline]
pub fn is_off_screen(pos: Vec2, width: f32, height: f32, margin: f32) -> bool {
    pos.x < -margin || pos.x > width + margin || pos.y < -margin || pos.y > height + margin
}
