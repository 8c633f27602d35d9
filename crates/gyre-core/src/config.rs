//! Construction-time configuration.
//!
//! Plain numeric values supplied by the embedding application. The core
//! defines no file format; the serde derives let an external loader build
//! one from whatever source it likes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::components::Size;
use crate::constants::*;
use crate::error::{ConfigError, Result};

/// Tuning and layout for one simulation instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    pub player_size: Size,
    pub enemy_size: Size,
    pub boss_size: Size,
    pub projectile_size: Size,
    pub orbit_radius: f32,
    pub star_count: u32,
    pub star_speed: f32,
    pub enemy_speed: f32,
    pub projectile_speed: f32,
    /// Degrees of orbit per unit of input angle delta.
    pub angle_step: f32,
    /// Seconds between shots.
    pub fire_interval: f32,
    /// Seconds between enemy spawns.
    pub spawn_interval: f32,
    pub invincibility_duration: f32,
    pub player_lives: u32,
    pub enemies_per_wave: u32,
    pub waves_per_level: u32,
    pub level_count: u32,
    /// RNG seed. Same seed and same inputs give the same run.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            player_size: Size::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            enemy_size: Size::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            boss_size: Size::new(BOSS_WIDTH, BOSS_HEIGHT),
            projectile_size: Size::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
            orbit_radius: ORBIT_RADIUS,
            star_count: STAR_COUNT,
            star_speed: STAR_SPEED,
            enemy_speed: ENEMY_SPEED,
            projectile_speed: PROJECTILE_SPEED,
            angle_step: ANGLE_STEP,
            fire_interval: FIRE_INTERVAL,
            spawn_interval: SPAWN_INTERVAL,
            invincibility_duration: INVINCIBILITY_DURATION,
            player_lives: PLAYER_LIVES,
            enemies_per_wave: ENEMIES_PER_WAVE,
            waves_per_level: WAVES_PER_LEVEL,
            level_count: LEVEL_COUNT,
            seed: 42,
        }
    }
}

impl SimConfig {
    /// Screen center; the orbit, enemy spawns and starfield share it.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.screen_width * 0.5, self.screen_height * 0.5)
    }

    /// Distance from the center past which enemies are pruned.
    pub fn enemy_prune_distance(&self) -> f32 {
        self.screen_width.max(self.screen_height) * ENEMY_PRUNE_FACTOR
    }

    /// Check every field. The first failure is returned.
    pub fn validate(&self) -> Result<()> {
        if !(self.screen_width.is_finite()
            && self.screen_height.is_finite()
            && self.screen_width > 0.0
            && self.screen_height > 0.0)
        {
            return Err(ConfigError::InvalidScreenSize {
                width: self.screen_width,
                height: self.screen_height,
            });
        }

        positive_size("player_size", self.player_size)?;
        positive_size("enemy_size", self.enemy_size)?;
        positive_size("boss_size", self.boss_size)?;
        positive_size("projectile_size", self.projectile_size)?;

        positive("orbit_radius", self.orbit_radius)?;
        let player_extent = self.player_size.width.max(self.player_size.height);
        let required = 2.0 * (self.orbit_radius + player_extent);
        let available = self.screen_width.min(self.screen_height);
        if required > available {
            return Err(ConfigError::OrbitDoesNotFit {
                radius: self.orbit_radius,
                player_extent,
                required,
                available,
            });
        }

        if self.star_count > MAX_STARS {
            return Err(ConfigError::OutOfRange {
                field: "star_count",
                value: self.star_count as f32,
                min: 0.0,
                max: MAX_STARS as f32,
            });
        }

        in_open_closed_range("star_speed", self.star_speed, MAX_SPEED)?;
        in_open_closed_range("enemy_speed", self.enemy_speed, MAX_SPEED)?;
        in_open_closed_range("projectile_speed", self.projectile_speed, MAX_SPEED)?;
        in_open_closed_range("angle_step", self.angle_step, MAX_ANGLE_STEP)?;

        positive("fire_interval", self.fire_interval)?;
        positive("spawn_interval", self.spawn_interval)?;
        positive("invincibility_duration", self.invincibility_duration)?;

        at_least_one("player_lives", self.player_lives)?;
        at_least_one("enemies_per_wave", self.enemies_per_wave)?;
        at_least_one("waves_per_level", self.waves_per_level)?;
        at_least_one("level_count", self.level_count)?;

        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn positive_size(field: &'static str, size: Size) -> Result<()> {
    positive(field, size.width)?;
    positive(field, size.height)
}

fn in_open_closed_range(field: &'static str, value: f32, max: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min: 0.0,
            max,
        })
    }
}

fn at_least_one(field: &'static str, value: u32) -> Result<()> {
    if value >= 1 {
        Ok(())
    } else {
        Err(ConfigError::ZeroCount { field })
    }
}
