//! Entity registry: generational ids, struct-of-arrays component columns
//! and snapshot queries.

pub mod entity;
pub mod query;
pub mod world;

pub use entity::{EntityAllocator, EntityId};
pub use query::{Query, QuerySnapshot, Signature};
pub use world::{Component, EntityBundle, EntityMut, EntityRef, World};
