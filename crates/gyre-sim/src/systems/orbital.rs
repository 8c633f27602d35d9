use gyre_core::components::{Orbital, Position};
use gyre_core::geometry::orbit_position;

use crate::ecs::{Query, Signature, World};

/// Place every orbiting entity on its circle: `Position` (the box's
/// top-left) is the orbit point itself.
pub fn run(world: &mut World) {
    for id in world.query(Query::with(Signature::POSITION | Signature::ORBITAL)) {
        if let Some(orbital) = world.read::<Orbital>(id) {
            world.insert(id, placement(&orbital));
        }
    }
}

/// Where `orbital` puts its entity this frame.
pub fn placement(orbital: &Orbital) -> Position {
    Position::from_vec2(orbit_position(
        orbital.center,
        orbital.radius,
        orbital.orbital_angle(),
    ))
}
