//! Damage, invincibility windows, respawn and game over.
//!
//! Per entity: vulnerable -> invincible on damage -> vulnerable when the
//! window runs out; any state -> dead when health reaches zero.

use log::{debug, info, warn};

use gyre_core::components::{Health, Tag};
use gyre_core::events::{GameOver, PlayerDamaged};

use crate::ecs::{EntityId, Query, Signature, World};
use crate::event_bus::EventBus;
use crate::state::GameStateManager;
use crate::world_setup;

/// Damage the player. Ignored while invincible or when `id` has no
/// `Health`. Returns whether the damage landed.
///
/// A hit arms the invincibility window, resets the score multiplier and
/// emits `PlayerDamaged`. The player then respawns at the orbit bottom, or
/// the game ends if no health is left.
pub fn damage_player(
    world: &mut World,
    bus: &mut EventBus,
    game_state: &mut GameStateManager,
    id: EntityId,
    amount: u32,
) -> bool {
    let Some(health) = world.get_mut::<Health>(id) else {
        return false;
    };
    if health.is_invincible() {
        debug!("{id} is invincible, damage ignored");
        return false;
    }

    let remaining = health.take_damage(amount);
    health.arm_invincibility();
    bus.publish(PlayerDamaged {
        entity: id,
        damage: amount,
        remaining,
    });
    game_state.score_mut().reset_multiplier();
    debug!("{id} took {amount} damage, {remaining} left");

    if remaining > 0 {
        world_setup::reset_to_orbit_bottom(world, id);
    } else {
        signal_game_over(bus, game_state);
    }
    true
}

/// Count down invincibility windows, then check that a living player still
/// exists. Returns how many windows closed this tick.
pub fn update(
    world: &mut World,
    bus: &mut EventBus,
    game_state: &mut GameStateManager,
    dt: f32,
) -> usize {
    let mut expired = 0;
    for id in world.query(Query::with(Signature::HEALTH)) {
        if let Some(health) = world.get_mut::<Health>(id) {
            if health.tick_invincibility(dt) {
                expired += 1;
            }
        }
    }

    if !game_state.is_game_over() && !any_player_alive(world) {
        warn!("no living player left, forcing game over");
        signal_game_over(bus, game_state);
    }
    expired
}

fn any_player_alive(world: &World) -> bool {
    world
        .query(Query::tagged(Tag::Player, Signature::HEALTH))
        .ids()
        .iter()
        .any(|&id| world.get::<Health>(id).is_some_and(|h| !h.is_dead()))
}

fn signal_game_over(bus: &mut EventBus, game_state: &mut GameStateManager) {
    if game_state.set_game_over() {
        let final_score = game_state.score().score();
        info!("GAME OVER, final score {final_score}");
        bus.publish(GameOver { final_score });
    }
}
