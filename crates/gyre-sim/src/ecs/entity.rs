pub use gyre_core::types::EntityId;

/// Hands out generational entity ids and recycles freed indices.
pub struct EntityAllocator {
    generations: Vec<u32>,
    free_indices: Vec<u32>,
    next_index: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            free_indices: Vec::new(),
            next_index: 0,
        }
    }

    pub fn allocate(&mut self) -> EntityId {
        if let Some(index) = self.free_indices.pop() {
            let generation = self.generations[index as usize];
            EntityId::new(index, generation)
        } else {
            let index = self.next_index;
            self.next_index += 1;
            self.generations.push(0);
            EntityId::new(index, 0)
        }
    }

    /// Retire `id`. Stale or unknown ids are ignored; returns whether the
    /// id was live.
    pub fn deallocate(&mut self, id: EntityId) -> bool {
        if self.is_alive(id) {
            let slot = &mut self.generations[id.index as usize];
            *slot = slot.wrapping_add(1);
            self.free_indices.push(id.index);
            true
        } else {
            false
        }
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        (id.index as usize) < self.generations.len()
            && self.generations[id.index as usize] == id.generation
    }

    /// Current generation for an index (used to rebuild ids from slots).
    pub fn generation_of(&self, index: u32) -> Option<u32> {
        self.generations.get(index as usize).copied()
    }

    /// Forget every id. Generations keep counting so handles issued before
    /// the reset stay dead.
    pub fn reset(&mut self) {
        self.free_indices.clear();
        for (index, generation) in self.generations.iter_mut().enumerate() {
            *generation = generation.wrapping_add(1);
            self.free_indices.push(index as u32);
        }
        // Pop order hands out the lowest index first.
        self.free_indices.reverse();
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}
