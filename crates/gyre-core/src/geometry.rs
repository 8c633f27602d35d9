//! Pure geometry helpers: boxes, angles, and orbit math.
//!
//! Screen space: X grows right, Y grows down. Angles are in degrees.
//! Orbital angle 0 is straight above the center and grows clockwise.
//! Facing angle 0 points right and grows counter-clockwise on screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }

    /// Open-interval overlap test: boxes that only share an edge do not
    /// overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }
}

/// Wrap any finite angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Point on the orbit circle at `orbital_angle`.
pub fn orbit_position(center: Vec2, radius: f32, orbital_angle: f32) -> Vec2 {
    let rad = orbital_angle.to_radians();
    center + radius * Vec2::new(rad.sin(), -rad.cos())
}

/// Inverse of [`orbit_position`]: the orbital angle of `point` around
/// `center`, in `[0, 360)`.
pub fn orbit_angle(center: Vec2, point: Vec2) -> f32 {
    let d = point - center;
    normalize_degrees(d.x.atan2(-d.y).to_degrees())
}

/// Unit vector for a facing angle: `(cos, -sin)` so positive angles turn
/// upward on screen.
pub fn heading_vector(facing_angle: f32) -> Vec2 {
    let rad = facing_angle.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

/// Facing angle that points from the orbit position at `orbital_angle`
/// toward the orbit center.
pub fn facing_toward_center(orbital_angle: f32) -> f32 {
    normalize_degrees(270.0 - orbital_angle)
}
