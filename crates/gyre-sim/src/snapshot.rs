//! Render snapshot: a read-only, serializable view of the world for the
//! rendering collaborator.

use serde::{Deserialize, Serialize};

use gyre_core::components::*;
use gyre_core::constants::*;
use gyre_core::enums::SceneState;

use crate::ecs::{EntityId, Query, Signature, World};

/// Fallback box for stars, which carry no `Size`.
const STAR_SPRITE_SIZE: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderKind {
    Star,
    Player,
    Enemy,
    Boss,
    Projectile,
}

impl RenderKind {
    fn of(world: &World, id: EntityId) -> Option<Self> {
        let kind = if world.has_tag(id, Tag::Boss) {
            RenderKind::Boss
        } else if world.has_tag(id, Tag::Enemy) {
            RenderKind::Enemy
        } else if world.has_tag(id, Tag::Player) {
            RenderKind::Player
        } else if world.has_tag(id, Tag::Projectile) {
            RenderKind::Projectile
        } else if world.has_tag(id, Tag::Star) {
            RenderKind::Star
        } else {
            return None;
        };
        Some(kind)
    }

    /// Sprite size used when the entity has no `Size`.
    pub fn default_size(self) -> Size {
        match self {
            RenderKind::Star => Size::new(STAR_SPRITE_SIZE, STAR_SPRITE_SIZE),
            RenderKind::Player => Size::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            RenderKind::Enemy => Size::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            RenderKind::Boss => Size::new(BOSS_WIDTH, BOSS_HEIGHT),
            RenderKind::Projectile => Size::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
        }
    }
}

/// One drawable entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderEntity {
    pub id: EntityId,
    pub kind: RenderKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Sprite heading in degrees, for entities that orbit.
    pub facing: Option<f32>,
    pub scale: f32,
    /// Blink while the damage-immunity window is open.
    pub invincible: bool,
}

/// Everything a frame needs to draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub scene: SceneState,
    pub tick: u64,
    pub score: u64,
    pub multiplier: u32,
    pub lives: u32,
    pub level: u32,
    pub wave: u32,
    pub paused: bool,
    pub game_over: bool,
    pub victory: bool,
    pub entities: Vec<RenderEntity>,
}

/// Build the drawable list: background first, then projectiles, enemies
/// and the player on top. Untagged entities are not drawn.
pub fn build(world: &World) -> Vec<RenderEntity> {
    let mut entities: Vec<RenderEntity> = world
        .query(Query::with(Signature::POSITION))
        .into_iter()
        .filter_map(|id| build_entity(world, id))
        .collect();
    entities.sort_by_key(|e| (draw_layer(e.kind), e.id));
    entities
}

fn build_entity(world: &World, id: EntityId) -> Option<RenderEntity> {
    let kind = RenderKind::of(world, id)?;
    let pos = world.read::<Position>(id)?;
    let size = world.read::<Size>(id).unwrap_or(kind.default_size());

    Some(RenderEntity {
        id,
        kind,
        x: pos.x,
        y: pos.y,
        width: size.width,
        height: size.height,
        facing: world.read::<Orbital>(id).map(|o| o.facing_angle()),
        scale: world.read::<Scale>(id).unwrap_or_default().0,
        invincible: world.get::<Health>(id).is_some_and(|h| h.is_invincible()),
    })
}

fn draw_layer(kind: RenderKind) -> u8 {
    match kind {
        RenderKind::Star => 0,
        RenderKind::Projectile => 1,
        RenderKind::Enemy | RenderKind::Boss => 2,
        RenderKind::Player => 3,
    }
}
