//! Scene state machine.
//!
//! The scene decides whether gameplay runs this frame: only `Playing`
//! ticks the systems. Transitions come from one table ([`next_scene`]);
//! any trigger the table does not list for the current scene is ignored.

use log::{debug, info};

use gyre_core::constants::{END_SCREEN_MIN_DELAY, INTRO_DURATION, INTRO_MIN_DELAY};
use gyre_core::enums::{InputEvent, MenuItem, SceneState};
use gyre_core::events::SceneChanged;
use gyre_core::input::FrameInput;

use crate::event_bus::EventBus;

/// Something that may move the scene machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTrigger {
    /// Time passed; checked against the time spent in the current scene.
    Elapsed,
    AnyInput(InputEvent),
    MenuSelect(MenuItem),
    Pause,
    Resume,
    QuitToMenu,
    GameOverSignaled,
    VictorySignaled,
}

/// Result of looking a trigger up in the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTransition {
    To(SceneState),
    /// Leave the application; the scene itself does not change.
    Exit,
}

/// The transition table. `time_in_scene` is seconds since the current
/// scene was entered.
pub fn next_scene(
    from: SceneState,
    trigger: SceneTrigger,
    time_in_scene: f32,
) -> Option<SceneTransition> {
    use SceneState::*;
    use SceneTrigger as T;

    let to = match (from, trigger) {
        (StudioIntro, T::Elapsed) if time_in_scene >= INTRO_DURATION => TitleScreen,
        (StudioIntro, T::AnyInput(_)) if time_in_scene >= INTRO_MIN_DELAY => TitleScreen,
        (TitleScreen, T::AnyInput(_)) => Menu,
        (Menu, T::MenuSelect(MenuItem::Start)) => Playing,
        (Menu, T::MenuSelect(MenuItem::Options)) => Options,
        (Menu, T::MenuSelect(MenuItem::Credits)) => Credits,
        (Menu, T::MenuSelect(MenuItem::Exit)) => return Some(SceneTransition::Exit),
        (Options | Credits, T::AnyInput(_)) => Menu,
        (Playing, T::Pause) => Paused,
        (Playing, T::GameOverSignaled) => GameOver,
        (Playing, T::VictorySignaled) => Victory,
        (Paused, T::Resume) => Playing,
        (Paused, T::QuitToMenu) => Menu,
        (GameOver | Victory, T::AnyInput(_)) if time_in_scene >= END_SCREEN_MIN_DELAY => Menu,
        _ => return None,
    };
    Some(SceneTransition::To(to))
}

/// Setup/teardown callbacks for external collaborators (music, UI).
pub trait SceneHooks {
    fn enter(&mut self, _scene: SceneState) {}
    fn exit(&mut self, _scene: SceneState) {}
}

/// Hooks that do nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl SceneHooks for NoHooks {}

pub struct SceneManager {
    state: SceneState,
    time_in_scene: f32,
    cursor: MenuItem,
    exit_requested: bool,
    hooks: Box<dyn SceneHooks>,
}

impl SceneManager {
    pub fn new() -> Self {
        Self::with_hooks(Box::new(NoHooks))
    }

    pub fn with_hooks(hooks: Box<dyn SceneHooks>) -> Self {
        Self::starting_in(SceneState::default(), hooks)
    }

    /// Start in `state` without running its enter hook.
    pub fn starting_in(state: SceneState, hooks: Box<dyn SceneHooks>) -> Self {
        Self {
            state,
            time_in_scene: 0.0,
            cursor: MenuItem::default(),
            exit_requested: false,
            hooks,
        }
    }

    pub fn set_hooks(&mut self, hooks: Box<dyn SceneHooks>) {
        self.hooks = hooks;
    }

    pub fn state(&self) -> SceneState {
        self.state
    }

    pub fn time_in_scene(&self) -> f32 {
        self.time_in_scene
    }

    /// Highlighted main-menu entry.
    pub fn cursor(&self) -> MenuItem {
        self.cursor
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn request_exit(&mut self) {
        if !self.exit_requested {
            info!("exit requested from {}", self.state);
        }
        self.exit_requested = true;
    }

    /// Gameplay systems run only while this is true.
    pub fn is_simulating(&self) -> bool {
        self.state == SceneState::Playing
    }

    /// Apply `trigger`. On a scene change the old scene's exit hook and the
    /// new scene's enter hook run once each, and `SceneChanged` is
    /// published.
    pub fn handle(&mut self, trigger: SceneTrigger, bus: &mut EventBus) -> Option<SceneChanged> {
        match next_scene(self.state, trigger, self.time_in_scene)? {
            SceneTransition::Exit => {
                self.request_exit();
                None
            }
            SceneTransition::To(to) => Some(self.change_to(to, bus)),
        }
    }

    fn change_to(&mut self, to: SceneState, bus: &mut EventBus) -> SceneChanged {
        let from = self.state;
        self.hooks.exit(from);
        self.state = to;
        self.time_in_scene = 0.0;
        if to == SceneState::Menu {
            self.cursor = MenuItem::default();
        }
        self.hooks.enter(to);

        info!("scene {from} -> {to}");
        let changed = SceneChanged { from, to };
        bus.publish(changed);
        changed
    }

    /// Advance the scene clock and fire any timed transition.
    pub fn update(&mut self, dt: f32, bus: &mut EventBus) -> Option<SceneChanged> {
        self.time_in_scene += dt;
        self.handle(SceneTrigger::Elapsed, bus)
    }

    /// Turn one frame of input into scene triggers.
    pub fn handle_input(&mut self, input: &FrameInput, bus: &mut EventBus) -> Option<SceneChanged> {
        match self.state {
            SceneState::Playing => {
                if input.quit {
                    self.request_exit();
                    None
                } else if input.pause {
                    self.handle(SceneTrigger::Pause, bus)
                } else {
                    None
                }
            }
            SceneState::Paused => {
                if input.quit || input.event == Some(InputEvent::Cancel) {
                    self.handle(SceneTrigger::QuitToMenu, bus)
                } else if input.pause || input.event == Some(InputEvent::Confirm) {
                    self.handle(SceneTrigger::Resume, bus)
                } else {
                    None
                }
            }
            SceneState::Menu => {
                if input.quit {
                    self.request_exit();
                    return None;
                }
                match input.event {
                    Some(InputEvent::Up) => {
                        self.cursor = self.cursor.previous();
                        debug!("menu cursor on {:?}", self.cursor);
                        None
                    }
                    Some(InputEvent::Down) => {
                        self.cursor = self.cursor.next();
                        debug!("menu cursor on {:?}", self.cursor);
                        None
                    }
                    Some(InputEvent::Confirm) => {
                        self.handle(SceneTrigger::MenuSelect(self.cursor), bus)
                    }
                    _ => None,
                }
            }
            _ => {
                if input.quit {
                    self.request_exit();
                    return None;
                }
                if !input.any_input() {
                    return None;
                }
                let event = input.event.unwrap_or(InputEvent::Other);
                self.handle(SceneTrigger::AnyInput(event), bus)
            }
        }
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}
