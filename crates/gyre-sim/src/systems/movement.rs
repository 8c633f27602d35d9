use gyre_core::components::{Movement, Position};

use crate::ecs::{EntityId, Query, Signature, World};

/// Linear integration for everything not owned by a dedicated system.
/// Enemies and projectiles are integrated by their own systems.
pub fn run(world: &mut World, dt: f32) {
    let query = Query::with(Signature::POSITION | Signature::MOVEMENT)
        .without(Signature::ENEMY | Signature::PROJECTILE);
    for id in world.query(query) {
        integrate(world, id, dt);
    }
}

/// Advance the position by `velocity * dt`, then rescale an over-limit
/// velocity onto `max_speed`. Returns the new position.
pub fn integrate(world: &mut World, id: EntityId, dt: f32) -> Option<Position> {
    let step = world.read::<Movement>(id)?.velocity * dt;
    let position = world.get_mut::<Position>(id)?;
    position.x += step.x;
    position.y += step.y;
    let moved = *position;

    if let Some(movement) = world.get_mut::<Movement>(id) {
        movement.clamp_speed();
    }
    Some(moved)
}
