//! Simulation core for GYRE.
//!
//! Owns the entity registry, runs the gameplay systems in a fixed order
//! each frame, routes events over a typed bus, and lets the scene machine
//! decide when gameplay runs.

pub mod ecs;
pub mod engine;
pub mod event_bus;
pub mod scene;
pub mod snapshot;
pub mod state;
pub mod systems;
pub mod world_setup;

pub use engine::{SimError, Simulation};
pub use event_bus::{EventBus, Publisher};
pub use gyre_core as core;
pub use scene::{SceneHooks, SceneManager, SceneTrigger};

#[cfg(test)]
mod tests;
