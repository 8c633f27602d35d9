//! Fundamental identifier types.

use serde::{Deserialize, Serialize};

/// Opaque generational entity handle.
///
/// A handle stays valid until its entity is removed; after that the slot's
/// generation moves on and the stale handle never resolves again, even when
/// the index is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId {
    pub index: u32,
    pub generation: u32,
}

impl EntityId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{}g{}", self.index, self.generation)
    }
}
