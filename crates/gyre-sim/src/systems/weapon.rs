use glam::Vec2;
use log::{debug, trace};

use gyre_core::components::{Position, Size, Tag};
use gyre_core::config::SimConfig;
use gyre_core::constants::{MUZZLE_OFFSET, PROJECTILE_MARGIN, TWIN_SPACING};
use gyre_core::enums::WeaponType;
use gyre_core::events::WeaponFired;
use gyre_core::geometry::heading_vector;

use crate::ecs::{Query, Signature, World};
use crate::event_bus::EventBus;
use crate::systems::movement;
use crate::world_setup;

/// How a weapon type lays out its projectiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponProfile {
    /// Multiplier on the configured projectile speed.
    pub speed_factor: f32,
    /// Distance from the shooter's center to the muzzle, along the heading.
    pub muzzle_offset: f32,
    pub barrels: u32,
    /// Gap between neighboring barrels, perpendicular to the heading.
    pub spacing: f32,
}

pub fn profile(weapon: WeaponType) -> WeaponProfile {
    match weapon {
        WeaponType::Single => WeaponProfile {
            speed_factor: 1.0,
            muzzle_offset: MUZZLE_OFFSET,
            barrels: 1,
            spacing: 0.0,
        },
        WeaponType::Twin => WeaponProfile {
            speed_factor: 0.9,
            muzzle_offset: MUZZLE_OFFSET,
            barrels: 2,
            spacing: TWIN_SPACING,
        },
    }
}

/// Rate-limited firing plus projectile flight and pruning.
#[derive(Debug, Clone)]
pub struct WeaponSystem {
    fire_timer: f32,
    fire_interval: f32,
    projectile_speed: f32,
    projectile_size: Size,
    screen: Vec2,
}

impl WeaponSystem {
    /// A fresh weapon is ready to fire immediately.
    pub fn new(config: &SimConfig) -> Self {
        Self {
            fire_timer: config.fire_interval,
            fire_interval: config.fire_interval,
            projectile_speed: config.projectile_speed,
            projectile_size: config.projectile_size,
            screen: Vec2::new(config.screen_width, config.screen_height),
        }
    }

    pub fn fire_timer(&self) -> f32 {
        self.fire_timer
    }

    pub fn fire_interval(&self) -> f32 {
        self.fire_interval
    }

    pub fn can_fire(&self) -> bool {
        self.fire_timer >= self.fire_interval
    }

    /// Fire from `origin` (the shooter's center) along `facing_angle`.
    /// Refused while the cooldown runs; returns whether a shot left.
    pub fn fire_weapon(
        &mut self,
        world: &mut World,
        bus: &mut EventBus,
        weapon: WeaponType,
        origin: Vec2,
        facing_angle: f32,
    ) -> bool {
        if !self.can_fire() {
            debug!(
                "fire rejected: cooldown {:.3}/{:.3}",
                self.fire_timer, self.fire_interval
            );
            return false;
        }

        let profile = profile(weapon);
        let heading = heading_vector(facing_angle);
        let velocity = heading * self.projectile_speed * profile.speed_factor;
        let muzzle = origin + heading * profile.muzzle_offset;
        // Perpendicular to the heading, for side-by-side barrels.
        let across = Vec2::new(-heading.y, heading.x);
        let half_span = (profile.barrels.saturating_sub(1)) as f32 * profile.spacing * 0.5;

        for barrel in 0..profile.barrels {
            let offset = barrel as f32 * profile.spacing - half_span;
            world_setup::spawn_projectile(
                world,
                self.projectile_size,
                muzzle + across * offset,
                velocity,
            );
        }

        self.fire_timer = 0.0;
        bus.publish(WeaponFired {
            weapon,
            x: muzzle.x,
            y: muzzle.y,
        });
        debug!("fired {} from ({:.1}, {:.1})", weapon.as_str(), muzzle.x, muzzle.y);
        true
    }

    /// Advance the cooldown, move projectiles and prune those that left
    /// the screen by more than the margin. Returns how many were pruned.
    pub fn update(&mut self, world: &mut World, dt: f32) -> usize {
        self.fire_timer = (self.fire_timer + dt).min(self.fire_interval);

        let mut pruned = 0;
        let query = Query::tagged(Tag::Projectile, Signature::POSITION | Signature::MOVEMENT);
        for id in world.query(query) {
            let Some(pos) = movement::integrate(world, id, dt) else {
                continue;
            };
            if self.off_screen(pos) {
                world.remove(id);
                pruned += 1;
            }
        }
        if pruned > 0 {
            trace!("pruned {pruned} projectiles");
        }
        pruned
    }

    fn off_screen(&self, pos: Position) -> bool {
        pos.x < -PROJECTILE_MARGIN
            || pos.y < -PROJECTILE_MARGIN
            || pos.x > self.screen.x + PROJECTILE_MARGIN
            || pos.y > self.screen.y + PROJECTILE_MARGIN
    }

    /// Ready to fire again, as at the start of a run.
    pub fn reset(&mut self) {
        self.fire_timer = self.fire_interval;
    }
}
