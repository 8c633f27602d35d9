//! Plain-data ECS components attached to entities.
//!
//! Components carry no behavior beyond small invariant-keeping helpers.
//! Storage lives in the simulation crate's registry.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::{normalize_degrees, Aabb};

/// Top-left corner of an entity's box, in screen pixels (Y down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn from_vec2(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Position that places a box of `size` centered on `center`.
    pub fn centered_on(center: Vec2, size: Size) -> Self {
        Self {
            x: center.x - size.width * 0.5,
            y: center.y - size.height * 0.5,
        }
    }

    /// Center of the box of `size` whose top-left is this position.
    pub fn center(&self, size: Size) -> Vec2 {
        Vec2::new(self.x + size.width * 0.5, self.y + size.height * 0.5)
    }
}

/// Linear kinematics. Velocity is in pixels per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub velocity: Vec2,
    pub max_speed: f32,
}

impl Movement {
    pub fn new(velocity: Vec2, max_speed: f32) -> Self {
        let mut movement = Self {
            velocity,
            max_speed,
        };
        movement.clamp_speed();
        movement
    }

    /// Rescale the velocity onto `max_speed` when it is longer, keeping its
    /// direction. Returns true when a rescale happened.
    pub fn clamp_speed(&mut self) -> bool {
        let speed = self.velocity.length();
        if speed > self.max_speed && speed > 0.0 {
            self.velocity *= self.max_speed / speed;
            true
        } else {
            false
        }
    }
}

/// Polar motion around a fixed center.
///
/// `orbital_angle` locates the entity on the circle; `facing_angle` is the
/// sprite heading. They are maintained independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Orbital {
    pub center: Vec2,
    pub radius: f32,
    orbital_angle: f32,
    facing_angle: f32,
}

impl Orbital {
    pub fn new(center: Vec2, radius: f32, orbital_angle: f32, facing_angle: f32) -> Self {
        Self {
            center,
            radius,
            orbital_angle: normalize_degrees(orbital_angle),
            facing_angle: normalize_degrees(facing_angle),
        }
    }

    /// Angle around the center, always in `[0, 360)`.
    pub fn orbital_angle(&self) -> f32 {
        self.orbital_angle
    }

    pub fn facing_angle(&self) -> f32 {
        self.facing_angle
    }

    pub fn set_orbital_angle(&mut self, degrees: f32) {
        self.orbital_angle = normalize_degrees(degrees);
    }

    pub fn set_facing_angle(&mut self, degrees: f32) {
        self.facing_angle = normalize_degrees(degrees);
    }

    pub fn rotate(&mut self, degrees: f32) {
        self.set_orbital_angle(self.orbital_angle + degrees);
    }

    pub fn turn(&mut self, degrees: f32) {
        self.set_facing_angle(self.facing_angle + degrees);
    }
}

/// Bounding-box extents; the box origin is the entity's `Position`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aabb_at(&self, position: Position) -> Aabb {
        Aabb::new(position.x, position.y, self.width, self.height)
    }
}

/// Hit points plus the damage-immunity window.
///
/// Invariants: `current <= maximum`, and `is_invincible` implies
/// `invincibility_remaining > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Health {
    current: u32,
    maximum: u32,
    is_invincible: bool,
    invincibility_remaining: f32,
    pub invincibility_duration: f32,
}

impl Health {
    pub fn new(maximum: u32, invincibility_duration: f32) -> Self {
        Self {
            current: maximum,
            maximum,
            is_invincible: false,
            invincibility_remaining: 0.0,
            invincibility_duration,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    pub fn is_invincible(&self) -> bool {
        self.is_invincible
    }

    pub fn invincibility_remaining(&self) -> f32 {
        self.invincibility_remaining
    }

    pub fn is_dead(&self) -> bool {
        self.current == 0
    }

    /// Subtract `amount`, flooring at zero. Returns the remaining health.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.current = self.current.saturating_sub(amount);
        self.current
    }

    /// Add `amount`, capped at `maximum`. Returns the new current value.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.current = self.current.saturating_add(amount).min(self.maximum);
        self.current
    }

    /// Grant one extra life: raises `maximum` and `current` together, so a
    /// bonus at full health still counts. Returns the new current value.
    pub fn add_life(&mut self) -> u32 {
        self.maximum = self.maximum.saturating_add(1);
        self.current = self.current.saturating_add(1).min(self.maximum);
        self.current
    }

    /// Start a fresh immunity window of `invincibility_duration`.
    /// A non-positive duration leaves the entity vulnerable.
    pub fn arm_invincibility(&mut self) {
        if self.invincibility_duration > 0.0 {
            self.is_invincible = true;
            self.invincibility_remaining = self.invincibility_duration;
        }
    }

    /// Count the immunity window down by `dt`. Returns true on the tick the
    /// window closes.
    pub fn tick_invincibility(&mut self, dt: f32) -> bool {
        if !self.is_invincible {
            return false;
        }
        self.invincibility_remaining -= dt;
        if self.invincibility_remaining <= 0.0 {
            self.invincibility_remaining = 0.0;
            self.is_invincible = false;
            return true;
        }
        false
    }
}

/// Scalar speed used by background objects (pixels per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Speed(pub f32);

/// Scalar heading used by background objects (degrees).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Angle(pub f32);

/// Render scale factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale(pub f32);

impl Default for Scale {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Zero-size query classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Player,
    Star,
    Enemy,
    Projectile,
    Boss,
}

impl Tag {
    pub const ALL: [Tag; 5] = [Tag::Player, Tag::Star, Tag::Enemy, Tag::Projectile, Tag::Boss];
}
