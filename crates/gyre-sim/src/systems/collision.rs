use log::debug;

use gyre_core::components::{Health, Position, Size, Tag};
use gyre_core::events::{BossDefeated, EnemyDestroyed};
use gyre_core::geometry::Aabb;

use crate::ecs::{EntityId, Query, Signature, World};
use crate::event_bus::EventBus;
use crate::state::GameStateManager;
use crate::systems::health;
use crate::world_setup;

/// An enemy shot down this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kill {
    pub entity: EntityId,
    pub points: u32,
    pub boss: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionResult {
    pub kills: Vec<Kill>,
    pub projectiles_spent: u32,
    pub player_hits: u32,
}

/// Resolve projectile-vs-enemy hits, then player-vs-enemy contact.
///
/// A projectile hits at most one enemy (the lowest index it overlaps) and
/// is always consumed. Entities without `Position` and `Size` cannot
/// collide and are skipped.
pub fn run(
    world: &mut World,
    bus: &mut EventBus,
    game_state: &mut GameStateManager,
    contact_damage: u32,
) -> CollisionResult {
    let mut result = CollisionResult::default();
    resolve_projectile_hits(world, bus, &mut result);
    resolve_player_contact(world, bus, game_state, contact_damage, &mut result);
    result
}

fn box_of(world: &World, id: EntityId) -> Option<Aabb> {
    let pos = world.read::<Position>(id)?;
    let size = world.read::<Size>(id)?;
    Some(size.aabb_at(pos))
}

fn boxes(world: &World, tag: Tag) -> Vec<(EntityId, Aabb)> {
    world
        .query(Query::tagged(tag, Signature::POSITION | Signature::SIZE))
        .into_iter()
        .filter_map(|id| Some((id, box_of(world, id)?)))
        .collect()
}

fn resolve_projectile_hits(world: &mut World, bus: &mut EventBus, result: &mut CollisionResult) {
    let projectiles = boxes(world, Tag::Projectile);
    let enemies = boxes(world, Tag::Enemy);

    for (shot, shot_box) in projectiles {
        if !world.is_alive(shot) {
            continue;
        }
        let target = enemies
            .iter()
            .find(|(enemy, enemy_box)| world.is_alive(*enemy) && shot_box.overlaps(enemy_box));
        let Some(&(enemy, enemy_box)) = target else {
            continue;
        };

        world.remove(shot);
        result.projectiles_spent += 1;

        // An enemy without Health goes down in one hit.
        let remaining = world
            .get_mut::<Health>(enemy)
            .map_or(0, |h| h.take_damage(1));
        if remaining > 0 {
            debug!("{enemy} hit by {shot}, {remaining} left");
            continue;
        }

        let points = world_setup::points_for(world, enemy);
        let boss = world.has_tag(enemy, Tag::Boss);
        let center = enemy_box.center();
        world.remove(enemy);
        debug!("{enemy} destroyed by {shot} for {points}");

        bus.publish(EnemyDestroyed {
            entity: enemy,
            points,
            x: center.x,
            y: center.y,
            boss,
        });
        if boss {
            bus.publish(BossDefeated {
                entity: enemy,
                points,
            });
        }
        result.kills.push(Kill {
            entity: enemy,
            points,
            boss,
        });
    }
}

fn resolve_player_contact(
    world: &mut World,
    bus: &mut EventBus,
    game_state: &mut GameStateManager,
    contact_damage: u32,
    result: &mut CollisionResult,
) {
    let players = boxes(world, Tag::Player);
    let enemies = boxes(world, Tag::Enemy);

    for (player, mut player_box) in players {
        for &(enemy, enemy_box) in &enemies {
            if !world.is_alive(enemy) || !player_box.overlaps(&enemy_box) {
                continue;
            }
            world.remove(enemy);
            result.player_hits += 1;
            debug!("{player} rammed by {enemy}");
            if health::damage_player(world, bus, game_state, player, contact_damage) {
                if game_state.is_game_over() {
                    return;
                }
                // The hit respawned the player somewhere else.
                match box_of(world, player) {
                    Some(moved) => player_box = moved,
                    None => break,
                }
            }
        }
    }
}
