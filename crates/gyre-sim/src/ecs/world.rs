use std::collections::BTreeSet;

use log::trace;

use gyre_core::components::*;

use super::entity::{EntityAllocator, EntityId};
use super::query::{Query, QuerySnapshot, Signature};

/// A component type with its own column in the [`World`].
pub trait Component: Copy + 'static {
    const SIGNATURE: Signature;

    fn column(columns: &Columns) -> &Vec<Option<Self>>;
    fn column_mut(columns: &mut Columns) -> &mut Vec<Option<Self>>;
}

/// SoA (Struct of Arrays) component storage.
/// Each component type has its own Vec<Option<T>>, indexed by entity index.
#[derive(Default)]
pub struct Columns {
    positions: Vec<Option<Position>>,
    movements: Vec<Option<Movement>>,
    orbitals: Vec<Option<Orbital>>,
    sizes: Vec<Option<Size>>,
    healths: Vec<Option<Health>>,
    speeds: Vec<Option<Speed>>,
    angles: Vec<Option<Angle>>,
    scales: Vec<Option<Scale>>,
}

impl Columns {
    fn grow_to(&mut self, len: usize) {
        while self.positions.len() < len {
            self.positions.push(None);
            self.movements.push(None);
            self.orbitals.push(None);
            self.sizes.push(None);
            self.healths.push(None);
            self.speeds.push(None);
            self.angles.push(None);
            self.scales.push(None);
        }
    }

    fn clear_slot(&mut self, idx: usize) {
        self.positions[idx] = None;
        self.movements[idx] = None;
        self.orbitals[idx] = None;
        self.sizes[idx] = None;
        self.healths[idx] = None;
        self.speeds[idx] = None;
        self.angles[idx] = None;
        self.scales[idx] = None;
    }
}

macro_rules! impl_component {
    ($ty:ty, $field:ident, $sig:ident) => {
        impl Component for $ty {
            const SIGNATURE: Signature = Signature::$sig;

            fn column(columns: &Columns) -> &Vec<Option<Self>> {
                &columns.$field
            }

            fn column_mut(columns: &mut Columns) -> &mut Vec<Option<Self>> {
                &mut columns.$field
            }
        }
    };
}

impl_component!(Position, positions, POSITION);
impl_component!(Movement, movements, MOVEMENT);
impl_component!(Orbital, orbitals, ORBITAL);
impl_component!(Size, sizes, SIZE);
impl_component!(Health, healths, HEALTH);
impl_component!(Speed, speeds, SPEED);
impl_component!(Angle, angles, ANGLE);
impl_component!(Scale, scales, SCALE);

/// Components and tags for [`World::create`].
#[derive(Debug, Clone, Default)]
pub struct EntityBundle {
    pub position: Option<Position>,
    pub movement: Option<Movement>,
    pub orbital: Option<Orbital>,
    pub size: Option<Size>,
    pub health: Option<Health>,
    pub speed: Option<Speed>,
    pub angle: Option<Angle>,
    pub scale: Option<Scale>,
    pub tags: Vec<Tag>,
}

impl EntityBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn movement(mut self, movement: Movement) -> Self {
        self.movement = Some(movement);
        self
    }

    pub fn orbital(mut self, orbital: Orbital) -> Self {
        self.orbital = Some(orbital);
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn health(mut self, health: Health) -> Self {
        self.health = Some(health);
        self
    }

    pub fn speed(mut self, speed: Speed) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn angle(mut self, angle: Angle) -> Self {
        self.angle = Some(angle);
        self
    }

    pub fn scale(mut self, scale: Scale) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn tag(mut self, tag: Tag) -> Self {
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }
}

/// The entity registry: generational ids, SoA component columns, a
/// signature per entity and a member set per tag.
pub struct World {
    allocator: EntityAllocator,
    alive: Vec<bool>,
    signatures: Vec<Signature>,
    tag_members: [BTreeSet<u32>; 5],
    columns: Columns,
}

impl World {
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            alive: Vec::new(),
            signatures: Vec::new(),
            tag_members: Default::default(),
            columns: Columns::default(),
        }
    }

    /// Allocate an entity with no components.
    pub fn spawn(&mut self) -> EntityId {
        let id = self.allocator.allocate();
        let idx = id.index as usize;

        // Grow all storage to accommodate
        while self.alive.len() <= idx {
            self.alive.push(false);
            self.signatures.push(Signature::empty());
        }
        self.columns.grow_to(idx + 1);

        self.alive[idx] = true;
        self.signatures[idx] = Signature::empty();
        id
    }

    /// Allocate an entity and attach everything in `bundle`.
    pub fn create(&mut self, bundle: EntityBundle) -> EntityId {
        let id = self.spawn();
        if let Some(c) = bundle.position {
            self.insert(id, c);
        }
        if let Some(c) = bundle.movement {
            self.insert(id, c);
        }
        if let Some(c) = bundle.orbital {
            self.insert(id, c);
        }
        if let Some(c) = bundle.size {
            self.insert(id, c);
        }
        if let Some(c) = bundle.health {
            self.insert(id, c);
        }
        if let Some(c) = bundle.speed {
            self.insert(id, c);
        }
        if let Some(c) = bundle.angle {
            self.insert(id, c);
        }
        if let Some(c) = bundle.scale {
            self.insert(id, c);
        }
        for tag in bundle.tags {
            self.add_tag(id, tag);
        }
        trace!("created {id} with {:?}", self.signatures[id.index as usize]);
        id
    }

    /// Remove an entity and all of its components. Removing a dead or
    /// stale id does nothing and returns false.
    pub fn remove(&mut self, id: EntityId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let idx = id.index as usize;
        self.alive[idx] = false;
        self.signatures[idx] = Signature::empty();
        for members in &mut self.tag_members {
            members.remove(&id.index);
        }
        self.columns.clear_slot(idx);
        self.allocator.deallocate(id);
        trace!("removed {id}");
        true
    }

    /// Drop every entity. Ids handed out before the reset stay dead.
    pub fn clear(&mut self) {
        for idx in 0..self.alive.len() {
            if self.alive[idx] {
                self.columns.clear_slot(idx);
            }
            self.alive[idx] = false;
            self.signatures[idx] = Signature::empty();
        }
        for members in &mut self.tag_members {
            members.clear();
        }
        self.allocator.reset();
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.allocator.is_alive(id)
            && (id.index as usize) < self.alive.len()
            && self.alive[id.index as usize]
    }

    pub fn entity_count(&self) -> usize {
        self.alive.iter().filter(|&&a| a).count()
    }

    pub fn signature(&self, id: EntityId) -> Option<Signature> {
        if self.is_alive(id) {
            Some(self.signatures[id.index as usize])
        } else {
            None
        }
    }

    // --- Components ---

    /// Attach or replace a component. Ignored for dead ids.
    pub fn insert<T: Component>(&mut self, id: EntityId, component: T) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        let idx = id.index as usize;
        T::column_mut(&mut self.columns)[idx] = Some(component);
        self.signatures[idx] |= T::SIGNATURE;
        true
    }

    /// Detach a component, returning it.
    pub fn take<T: Component>(&mut self, id: EntityId) -> Option<T> {
        if !self.is_alive(id) {
            return None;
        }
        let idx = id.index as usize;
        self.signatures[idx].remove(T::SIGNATURE);
        T::column_mut(&mut self.columns)[idx].take()
    }

    pub fn get<T: Component>(&self, id: EntityId) -> Option<&T> {
        if !self.is_alive(id) {
            return None;
        }
        T::column(&self.columns)[id.index as usize].as_ref()
    }

    pub fn get_mut<T: Component>(&mut self, id: EntityId) -> Option<&mut T> {
        if !self.is_alive(id) {
            return None;
        }
        T::column_mut(&mut self.columns)[id.index as usize].as_mut()
    }

    /// Copy of a component, for the common read-modify-write pattern.
    pub fn read<T: Component>(&self, id: EntityId) -> Option<T> {
        self.get::<T>(id).copied()
    }

    // --- Tags ---

    pub fn add_tag(&mut self, id: EntityId, tag: Tag) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        self.signatures[id.index as usize] |= Signature::of_tag(tag);
        self.tag_members[tag_slot(tag)].insert(id.index);
        true
    }

    pub fn remove_tag(&mut self, id: EntityId, tag: Tag) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        self.signatures[id.index as usize].remove(Signature::of_tag(tag));
        self.tag_members[tag_slot(tag)].remove(&id.index)
    }

    pub fn has_tag(&self, id: EntityId, tag: Tag) -> bool {
        self.signature(id)
            .is_some_and(|s| s.contains(Signature::of_tag(tag)))
    }

    pub fn tag_count(&self, tag: Tag) -> usize {
        self.tag_members[tag_slot(tag)].len()
    }

    // --- Views ---

    pub fn entry(&self, id: EntityId) -> Option<EntityRef<'_>> {
        if self.is_alive(id) {
            Some(EntityRef { world: self, id })
        } else {
            None
        }
    }

    pub fn entry_mut(&mut self, id: EntityId) -> Option<EntityMut<'_>> {
        if self.is_alive(id) {
            Some(EntityMut { world: self, id })
        } else {
            None
        }
    }

    // --- Queries ---

    /// Snapshot the ids matching `query`. Tagged queries walk only the
    /// smallest required tag's member set.
    pub fn query(&self, query: Query) -> QuerySnapshot {
        let narrowest = query
            .required_tags()
            .min_by_key(|&tag| self.tag_members[tag_slot(tag)].len());

        let ids = match narrowest {
            Some(tag) => self.tag_members[tag_slot(tag)]
                .iter()
                .filter_map(|&index| self.live_match(index as usize, &query))
                .collect(),
            None => (0..self.alive.len())
                .filter_map(|idx| self.live_match(idx, &query))
                .collect(),
        };
        QuerySnapshot::new(ids)
    }

    /// Every live entity, in index order.
    pub fn alive_entities(&self) -> Vec<EntityId> {
        self.query(Query::default()).into_iter().collect()
    }

    fn live_match(&self, idx: usize, query: &Query) -> Option<EntityId> {
        if !self.alive[idx] || !query.matches(self.signatures[idx]) {
            return None;
        }
        let generation = self.allocator.generation_of(idx as u32)?;
        Some(EntityId::new(idx as u32, generation))
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn tag_slot(tag: Tag) -> usize {
    match tag {
        Tag::Player => 0,
        Tag::Star => 1,
        Tag::Enemy => 2,
        Tag::Projectile => 3,
        Tag::Boss => 4,
    }
}

/// Read-only view of one live entity.
pub struct EntityRef<'w> {
    world: &'w World,
    id: EntityId,
}

impl<'w> EntityRef<'w> {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn get<T: Component>(&self) -> Option<&'w T> {
        self.world.get::<T>(self.id)
    }

    pub fn has<T: Component>(&self) -> bool {
        self.get::<T>().is_some()
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.world.has_tag(self.id, tag)
    }

    pub fn signature(&self) -> Signature {
        self.world.signatures[self.id.index as usize]
    }
}

/// Mutable view of one live entity.
pub struct EntityMut<'w> {
    world: &'w mut World,
    id: EntityId,
}

impl EntityMut<'_> {
    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn get<T: Component>(&self) -> Option<&T> {
        self.world.get::<T>(self.id)
    }

    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.world.get_mut::<T>(self.id)
    }

    pub fn insert<T: Component>(&mut self, component: T) -> &mut Self {
        self.world.insert(self.id, component);
        self
    }

    pub fn tag(&mut self, tag: Tag) -> &mut Self {
        self.world.add_tag(self.id, tag);
        self
    }
}
