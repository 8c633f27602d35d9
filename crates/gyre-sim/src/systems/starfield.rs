use rand::Rng;
use rand_chacha::ChaCha8Rng;

use gyre_core::components::{Angle, Position, Speed, Tag};
use gyre_core::config::SimConfig;
use gyre_core::geometry::heading_vector;

use crate::ecs::{Query, Signature, World};
use crate::world_setup::star_scale;

/// Move stars outward from the center, growing them with distance.
/// A star that leaves the screen is re-seeded at the center on a fresh ray.
/// Returns how many stars were re-seeded.
pub fn run(world: &mut World, rng: &mut ChaCha8Rng, config: &SimConfig, dt: f32) -> usize {
    let center = config.center();
    let mut reseeded = 0;
    let query = Query::tagged(
        Tag::Star,
        Signature::POSITION | Signature::SPEED | Signature::ANGLE,
    );

    for id in world.query(query) {
        let (Some(pos), Some(Speed(speed)), Some(Angle(angle))) = (
            world.read::<Position>(id),
            world.read::<Speed>(id),
            world.read::<Angle>(id),
        ) else {
            continue;
        };

        let mut point = pos.as_vec2() + heading_vector(angle) * speed * dt;
        let mut angle = angle;
        let off_screen = point.x < 0.0
            || point.y < 0.0
            || point.x > config.screen_width
            || point.y > config.screen_height;
        if off_screen {
            point = center;
            angle = rng.gen_range(0.0..360.0_f32);
            world.insert(id, Angle(angle));
            reseeded += 1;
        }

        world.insert(id, Position::from_vec2(point));
        world.insert(id, star_scale(config, point.distance(center)));
    }
    reseeded
}
