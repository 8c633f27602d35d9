//! Component signatures and snapshot queries.
//!
//! A query never borrows the world while its results are consumed: it
//! produces an owned [`QuerySnapshot`] first, so systems can create and
//! remove entities while walking the matches.

use bitflags::bitflags;

use gyre_core::components::Tag;

use super::entity::EntityId;
use super::world::World;

bitflags! {
    /// Which components and tags an entity carries.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Signature: u32 {
        const POSITION   = 1 << 0;
        const MOVEMENT   = 1 << 1;
        const ORBITAL    = 1 << 2;
        const SIZE       = 1 << 3;
        const HEALTH     = 1 << 4;
        const SPEED      = 1 << 5;
        const ANGLE      = 1 << 6;
        const SCALE      = 1 << 7;

        const PLAYER     = 1 << 16;
        const STAR       = 1 << 17;
        const ENEMY      = 1 << 18;
        const PROJECTILE = 1 << 19;
        const BOSS       = 1 << 20;

        const TAGS = Self::PLAYER.bits()
            | Self::STAR.bits()
            | Self::ENEMY.bits()
            | Self::PROJECTILE.bits()
            | Self::BOSS.bits();
    }
}

impl Signature {
    pub fn of_tag(tag: Tag) -> Self {
        match tag {
            Tag::Player => Signature::PLAYER,
            Tag::Star => Signature::STAR,
            Tag::Enemy => Signature::ENEMY,
            Tag::Projectile => Signature::PROJECTILE,
            Tag::Boss => Signature::BOSS,
        }
    }
}

/// Required and excluded signature bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Query {
    pub with: Signature,
    pub without: Signature,
}

impl Query {
    pub fn with(with: Signature) -> Self {
        Self {
            with,
            without: Signature::empty(),
        }
    }

    /// Entities carrying `tag` plus the `with` components.
    pub fn tagged(tag: Tag, with: Signature) -> Self {
        Self::with(with | Signature::of_tag(tag))
    }

    pub fn without(mut self, without: Signature) -> Self {
        self.without |= without;
        self
    }

    pub fn matches(&self, signature: Signature) -> bool {
        signature.contains(self.with) && !signature.intersects(self.without)
    }

    /// Required tags, in `Tag::ALL` order.
    pub(crate) fn required_tags(&self) -> impl Iterator<Item = Tag> + '_ {
        Tag::ALL
            .into_iter()
            .filter(|&tag| self.with.contains(Signature::of_tag(tag)))
    }
}

/// Owned result of a query, in ascending index order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySnapshot {
    ids: Vec<EntityId>,
}

impl QuerySnapshot {
    pub(crate) fn new(ids: Vec<EntityId>) -> Self {
        Self { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn first(&self) -> Option<EntityId> {
        self.ids.first().copied()
    }

    /// Run `f` for every matched entity that is still alive when its turn
    /// comes. Entities removed by an earlier callback are skipped.
    pub fn each<F>(&self, world: &mut World, mut f: F)
    where
        F: FnMut(&mut World, EntityId),
    {
        for &id in &self.ids {
            if world.is_alive(id) {
                f(world, id);
            }
        }
    }
}

impl IntoIterator for QuerySnapshot {
    type Item = EntityId;
    type IntoIter = std::vec::IntoIter<EntityId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

impl<'a> IntoIterator for &'a QuerySnapshot {
    type Item = &'a EntityId;
    type IntoIter = std::slice::Iter<'a, EntityId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
