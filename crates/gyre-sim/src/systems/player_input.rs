use gyre_core::components::{Orbital, Position, Size, Tag};
use gyre_core::enums::WeaponType;
use gyre_core::input::FrameInput;

use crate::ecs::{Query, Signature, World};
use crate::event_bus::EventBus;
use crate::systems::orbital::placement;
use crate::systems::weapon::WeaponSystem;

/// Apply one frame of player input: orbit rotation, counter-rotation of
/// the facing angle, and firing. Returns whether a shot was fired.
pub fn run(
    world: &mut World,
    bus: &mut EventBus,
    weapons: &mut WeaponSystem,
    weapon: WeaponType,
    input: &FrameInput,
    angle_step: f32,
) -> bool {
    let mut fired = false;
    for id in world.query(Query::tagged(Tag::Player, Signature::ORBITAL)) {
        let Some(orbital) = world.get_mut::<Orbital>(id) else {
            continue;
        };
        let turned = input.angle_delta != 0.0;
        if turned {
            let step = input.angle_delta * angle_step;
            orbital.rotate(step);
            // Keeps the ship pointed at the center as it slides around.
            orbital.turn(-step);
        }
        let facing = orbital.facing_angle();
        let moved_to = placement(orbital);
        if turned {
            // Shots this frame leave from where the ship now is.
            world.insert(id, moved_to);
        }

        if input.fire {
            let (Some(pos), Some(size)) = (world.read::<Position>(id), world.read::<Size>(id))
            else {
                continue;
            };
            fired |= weapons.fire_weapon(world, bus, weapon, pos.center(size), facing);
        }
    }
    fired
}
