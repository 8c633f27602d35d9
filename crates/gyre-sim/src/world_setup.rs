//! Entity spawn factories.
//!
//! Creates the player, starfield, enemies, bosses and projectiles with
//! their component bundles.

use glam::Vec2;
use log::debug;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use gyre_core::components::*;
use gyre_core::config::SimConfig;
use gyre_core::constants::*;
use gyre_core::geometry::heading_vector;

use crate::ecs::{EntityBundle, EntityId, World};
use crate::systems::orbital::placement;

/// Set up a fresh run: the player at the orbit bottom plus the starfield.
pub fn setup_game(world: &mut World, rng: &mut ChaCha8Rng, config: &SimConfig) -> EntityId {
    spawn_stars(world, rng, config);
    spawn_player(world, config)
}

/// Spawn the player on the orbit bottom, facing the center.
pub fn spawn_player(world: &mut World, config: &SimConfig) -> EntityId {
    let center = config.center();
    let orbital = Orbital::new(
        center,
        config.orbit_radius,
        PLAYER_START_ORBITAL_ANGLE,
        PLAYER_START_FACING_ANGLE,
    );

    let id = world.create(
        EntityBundle::new()
            .position(placement(&orbital))
            .orbital(orbital)
            .size(config.player_size)
            .health(Health::new(config.player_lives, config.invincibility_duration))
            .tag(Tag::Player),
    );
    debug!("spawned player {id}");
    id
}

/// Put the player back on the orbit bottom, facing the center.
pub fn reset_to_orbit_bottom(world: &mut World, id: EntityId) {
    let Some(mut orbital) = world.read::<Orbital>(id) else {
        return;
    };
    orbital.set_orbital_angle(PLAYER_START_ORBITAL_ANGLE);
    orbital.set_facing_angle(PLAYER_START_FACING_ANGLE);
    world.insert(id, orbital);
    world.insert(id, placement(&orbital));
}

/// Spawn `config.star_count` stars scattered between the center and the
/// screen edge.
pub fn spawn_stars(world: &mut World, rng: &mut ChaCha8Rng, config: &SimConfig) {
    let reach = config.screen_width.max(config.screen_height) * 0.5;
    for _ in 0..config.star_count {
        let distance = rng.gen_range(0.0..reach);
        spawn_star(world, rng, config, distance);
    }
}

/// Spawn one star `distance` pixels out from the center on a random ray.
pub fn spawn_star(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    config: &SimConfig,
    distance: f32,
) -> EntityId {
    let angle = rng.gen_range(0.0..360.0_f32);
    let speed = config.star_speed * rng.gen_range(0.5..1.5_f32);
    let point = config.center() + heading_vector(angle) * distance;

    world.create(
        EntityBundle::new()
            .position(Position::from_vec2(point))
            .speed(Speed(speed))
            .angle(Angle(angle))
            .scale(star_scale(config, distance))
            .tag(Tag::Star),
    )
}

/// Stars grow from 1x at the center to `STAR_MAX_SCALE` at the edge.
pub fn star_scale(config: &SimConfig, distance: f32) -> Scale {
    let reach = config.screen_width.max(config.screen_height) * 0.5;
    let t = (distance / reach).clamp(0.0, 1.0);
    Scale(1.0 + (STAR_MAX_SCALE - 1.0) * t)
}

/// Spawn a regular enemy centered on the orbit center, heading outward
/// along `heading` (a facing angle in degrees).
pub fn spawn_enemy(world: &mut World, config: &SimConfig, heading: f32) -> EntityId {
    let velocity = heading_vector(heading) * config.enemy_speed;
    world.create(
        EntityBundle::new()
            .position(Position::centered_on(config.center(), config.enemy_size))
            .movement(Movement::new(velocity, config.enemy_speed))
            .size(config.enemy_size)
            .health(Health::new(ENEMY_HEALTH, 0.0))
            .tag(Tag::Enemy),
    )
}

/// Spawn a boss. Bosses are enemies too, so every enemy query sees them.
pub fn spawn_boss(world: &mut World, config: &SimConfig, heading: f32) -> EntityId {
    let speed = config.enemy_speed * BOSS_SPEED_FACTOR;
    world.create(
        EntityBundle::new()
            .position(Position::centered_on(config.center(), config.boss_size))
            .movement(Movement::new(heading_vector(heading) * speed, speed))
            .size(config.boss_size)
            .health(Health::new(BOSS_HEALTH, 0.0))
            .tag(Tag::Enemy)
            .tag(Tag::Boss),
    )
}

/// Spawn a projectile whose box is centered on `origin`.
pub fn spawn_projectile(world: &mut World, size: Size, origin: Vec2, velocity: Vec2) -> EntityId {
    world.create(
        EntityBundle::new()
            .position(Position::centered_on(origin, size))
            .movement(Movement::new(velocity, velocity.length()))
            .size(size)
            .tag(Tag::Projectile),
    )
}

/// Base score value of an enemy.
pub fn points_for(world: &World, id: EntityId) -> u32 {
    if world.has_tag(id, Tag::Boss) {
        BOSS_POINTS
    } else {
        ENEMY_POINTS
    }
}
