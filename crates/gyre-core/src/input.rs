//! Per-frame input signals, already decoded by an external input adapter.

use serde::{Deserialize, Serialize};

use crate::enums::InputEvent;

/// Everything the simulation reads from the player in one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameInput {
    /// Signed movement around the orbit, in input units (usually -1, 0, 1).
    pub angle_delta: f32,
    pub fire: bool,
    pub pause: bool,
    pub quit: bool,
    /// Last discrete input event this frame, if any.
    pub event: Option<InputEvent>,
}

impl FrameInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn with_event(event: InputEvent) -> Self {
        Self {
            event: Some(event),
            ..Self::default()
        }
    }

    pub fn firing() -> Self {
        Self {
            fire: true,
            ..Self::default()
        }
    }

    pub fn turning(angle_delta: f32) -> Self {
        Self {
            angle_delta,
            ..Self::default()
        }
    }

    /// True when any input at all arrived this frame.
    pub fn any_input(&self) -> bool {
        self.event.is_some() || self.fire || self.pause || self.quit || self.angle_delta != 0.0
    }
}
