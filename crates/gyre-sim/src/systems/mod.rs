//! Gameplay systems, run once per tick in a fixed order by the engine.
//!
//! Every system takes an owned query snapshot before it creates or removes
//! entities, so removal never disturbs the walk that caused it.

pub mod collision;
pub mod enemy;
pub mod health;
pub mod movement;
pub mod orbital;
pub mod player_input;
pub mod starfield;
pub mod weapon;
