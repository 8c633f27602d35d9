//! Simulation constants and tuning parameters.
//!
//! Distances are in screen pixels (Y grows downward), times in seconds,
//! angles in degrees unless a name says otherwise.

/// Nominal tick rate (Hz). The pipeline is delta-time scaled; this is the
/// rate the defaults were tuned at.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Screen / world ---

pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;

/// Radius of the circle the player orbits on.
pub const ORBIT_RADIUS: f32 = 250.0;

/// Enemies are removed once farther than this fraction of the largest
/// screen dimension from the orbit center.
pub const ENEMY_PRUNE_FACTOR: f32 = 0.8;

/// Projectiles are removed once this far outside the screen.
pub const PROJECTILE_MARGIN: f32 = 50.0;

// --- Player ---

pub const PLAYER_WIDTH: f32 = 32.0;
pub const PLAYER_HEIGHT: f32 = 32.0;
pub const PLAYER_LIVES: u32 = 3;

/// Orbital angle of the orbit bottom (spawn / respawn point).
pub const PLAYER_START_ORBITAL_ANGLE: f32 = 180.0;

/// Facing angle pointing at the orbit center from the orbit bottom.
pub const PLAYER_START_FACING_ANGLE: f32 = 90.0;

/// Degrees of orbital rotation per unit of input angle delta.
pub const ANGLE_STEP: f32 = 3.0;

/// Length of the damage-immunity window after a hit.
pub const INVINCIBILITY_DURATION: f32 = 2.0;

/// Damage applied to the player by a body collision with an enemy.
pub const ENEMY_CONTACT_DAMAGE: u32 = 1;

// --- Enemies ---

pub const ENEMY_WIDTH: f32 = 32.0;
pub const ENEMY_HEIGHT: f32 = 32.0;
pub const ENEMY_SPEED: f32 = 120.0;
pub const ENEMY_HEALTH: u32 = 1;
pub const ENEMY_POINTS: u32 = 100;

/// Seconds between enemy spawns.
pub const SPAWN_INTERVAL: f32 = 1.0;

pub const ENEMIES_PER_WAVE: u32 = 8;
pub const WAVES_PER_LEVEL: u32 = 3;
pub const LEVEL_COUNT: u32 = 3;

// --- Bosses ---

pub const BOSS_WIDTH: f32 = 64.0;
pub const BOSS_HEIGHT: f32 = 64.0;
pub const BOSS_HEALTH: u32 = 10;
pub const BOSS_POINTS: u32 = 1_000;

/// Bosses drift outward slower than regular enemies.
pub const BOSS_SPEED_FACTOR: f32 = 0.35;

// --- Weapons ---

pub const PROJECTILE_WIDTH: f32 = 4.0;
pub const PROJECTILE_HEIGHT: f32 = 4.0;
pub const PROJECTILE_SPEED: f32 = 480.0;

/// Seconds between shots.
pub const FIRE_INTERVAL: f32 = 0.25;

/// Distance from the shooter's center to the muzzle.
pub const MUZZLE_OFFSET: f32 = 20.0;

/// Perpendicular spacing between the two barrels of a twin weapon.
pub const TWIN_SPACING: f32 = 10.0;

// --- Stars ---

pub const STAR_COUNT: u32 = 64;
pub const STAR_SPEED: f32 = 90.0;
pub const STAR_MAX_SCALE: f32 = 3.0;
pub const MAX_STARS: u32 = 1_000;

// --- Validation bounds ---

/// Upper bound accepted for any configured speed (pixels per second).
pub const MAX_SPEED: f32 = 5_000.0;

/// Upper bound accepted for the input angle step (degrees).
pub const MAX_ANGLE_STEP: f32 = 90.0;

// --- Scoring ---

/// Consecutive kills needed to raise the score multiplier by one.
pub const KILLS_PER_MULTIPLIER_STEP: u32 = 10;
pub const MAX_MULTIPLIER: u32 = 8;

/// A bonus life is awarded every time the score crosses a multiple of this.
pub const BONUS_LIFE_SCORE: u64 = 20_000;

// --- Scenes ---

/// The studio intro advances on its own after this long.
pub const INTRO_DURATION: f32 = 3.0;

/// Input is ignored during the first part of the studio intro.
pub const INTRO_MIN_DELAY: f32 = 0.5;

/// Input is ignored for this long after reaching GameOver or Victory.
pub const END_SCREEN_MIN_DELAY: f32 = 1.0;
