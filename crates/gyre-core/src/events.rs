//! Events emitted by the simulation for scoring, audio and UI feedback.
//!
//! Each event is its own type so collaborators subscribe to exactly what
//! they consume. Payloads are immutable snapshots taken at emit time.

use serde::{Deserialize, Serialize};

use crate::enums::{SceneState, WeaponType};
use crate::types::EntityId;

/// The player lost health. `remaining` is health after the hit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerDamaged {
    pub entity: EntityId,
    pub damage: u32,
    pub remaining: u32,
}

/// An enemy was shot down. `points` is the base value before multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyDestroyed {
    pub entity: EntityId,
    pub points: u32,
    pub x: f32,
    pub y: f32,
    pub boss: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreChanged {
    pub score: u64,
    pub delta: u64,
    pub multiplier: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOver {
    pub final_score: u64,
}

/// A bonus life was awarded. `lives` is the player's health afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeAdded {
    pub lives: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelChanged {
    pub level: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveStarted {
    pub wave: u32,
    pub level: u32,
    pub boss: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveCompleted {
    pub wave: u32,
    pub level: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossSpawned {
    pub entity: EntityId,
    pub wave: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossDefeated {
    pub entity: EntityId,
    pub points: u32,
}

/// The scene manager completed a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneChanged {
    pub from: SceneState,
    pub to: SceneState,
}

/// A shot left the muzzle. One event per shot, not per projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponFired {
    pub weapon: WeaponType,
    pub x: f32,
    pub y: f32,
}
