//! Enumeration types shared between the simulation and its collaborators.

use serde::{Deserialize, Serialize};

/// Top-level scene. Only `Playing` runs the gameplay systems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneState {
    #[default]
    StudioIntro,
    TitleScreen,
    Menu,
    Options,
    Credits,
    Playing,
    Paused,
    GameOver,
    Victory,
}

impl SceneState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneState::StudioIntro => "StudioIntro",
            SceneState::TitleScreen => "TitleScreen",
            SceneState::Menu => "Menu",
            SceneState::Options => "Options",
            SceneState::Credits => "Credits",
            SceneState::Playing => "Playing",
            SceneState::Paused => "Paused",
            SceneState::GameOver => "GameOver",
            SceneState::Victory => "Victory",
        }
    }
}

impl std::fmt::Display for SceneState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main menu entries, in display order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MenuItem {
    #[default]
    Start,
    Options,
    Credits,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::Start,
        MenuItem::Options,
        MenuItem::Credits,
        MenuItem::Exit,
    ];

    /// Next entry down, wrapping to the top.
    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    /// Previous entry up, wrapping to the bottom.
    pub fn previous(self) -> Self {
        let i = Self::ALL.iter().position(|&m| m == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Player weapon variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponType {
    /// One projectile per shot.
    #[default]
    Single,
    /// Two parallel projectiles per shot.
    Twin,
}

impl WeaponType {
    pub fn parse(s: &str) -> Self {
        match s {
            "Twin" => WeaponType::Twin,
            _ => WeaponType::Single,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponType::Single => "Single",
            WeaponType::Twin => "Twin",
        }
    }
}

/// Most recent decoded input event, used for intro/menu navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    Up,
    Down,
    Left,
    Right,
    Confirm,
    Cancel,
    Other,
}
