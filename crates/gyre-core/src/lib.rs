//! Core types and definitions for the GYRE simulation.
//!
//! This crate defines the vocabulary shared by the simulation crate and by
//! the external collaborators (renderer, audio, UI): components, events,
//! enums, constants, construction-time configuration and the per-frame
//! input signals. It contains no simulation logic beyond pure geometry.

pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod geometry;
pub mod input;
pub mod types;

pub use config::SimConfig;
pub use error::{ConfigError, Result};
pub use types::EntityId;

#[cfg(test)]
mod tests;
