//! Simulation engine: owns the registry, the event bus, every system's
//! state and the scene machine, and runs the fixed per-frame pipeline.
//!
//! Completely headless, with no rendering, audio or device input, so the
//! whole game can be driven and checked from tests.

use log::{debug, info, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use gyre_core::components::Health;
use gyre_core::config::SimConfig;
use gyre_core::constants::ENEMY_CONTACT_DAMAGE;
use gyre_core::enums::{SceneState, WeaponType};
use gyre_core::error::ConfigError;
use gyre_core::events::LifeAdded;
use gyre_core::input::FrameInput;

use crate::ecs::{EntityId, World};
use crate::event_bus::EventBus;
use crate::scene::{SceneHooks, SceneManager, SceneTrigger};
use crate::snapshot::{self, SimSnapshot};
use crate::state::GameStateManager;
use crate::systems;
use crate::systems::collision::CollisionResult;
use crate::systems::enemy::EnemySystem;
use crate::systems::weapon::WeaponSystem;
use crate::world_setup;

#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

/// The simulation. Owns the world and all game state.
pub struct Simulation {
    config: SimConfig,
    world: World,
    bus: EventBus,
    rng: ChaCha8Rng,
    scene: SceneManager,
    game_state: GameStateManager,
    enemies: EnemySystem,
    weapons: WeaponSystem,
    weapon_type: WeaponType,
    player: Option<EntityId>,
    tick: u64,
}

impl Simulation {
    /// Validate `config` and build a simulation sitting in the studio intro.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        info!(
            "simulation created: {}x{} screen, orbit {}, seed {}",
            config.screen_width, config.screen_height, config.orbit_radius, config.seed
        );
        Ok(Self {
            world: World::new(),
            bus: EventBus::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            scene: SceneManager::new(),
            game_state: GameStateManager::new(),
            enemies: EnemySystem::new(&config),
            weapons: WeaponSystem::new(&config),
            weapon_type: WeaponType::default(),
            player: None,
            tick: 0,
            config,
        })
    }

    /// Same as [`Simulation::new`], with scene enter/exit hooks installed.
    pub fn with_hooks(config: SimConfig, hooks: Box<dyn SceneHooks>) -> Result<Self, SimError> {
        let mut sim = Self::new(config)?;
        sim.scene.set_hooks(hooks);
        Ok(sim)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The bus, for subscribing collaborators and inspecting queued events.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn scene(&self) -> &SceneManager {
        &self.scene
    }

    pub fn scene_state(&self) -> SceneState {
        self.scene.state()
    }

    pub fn game_state(&self) -> &GameStateManager {
        &self.game_state
    }

    pub fn enemies(&self) -> &EnemySystem {
        &self.enemies
    }

    pub fn weapons(&self) -> &WeaponSystem {
        &self.weapons
    }

    pub fn player(&self) -> Option<EntityId> {
        self.player
    }

    pub fn weapon_type(&self) -> WeaponType {
        self.weapon_type
    }

    pub fn set_weapon_type(&mut self, weapon: WeaponType) {
        self.weapon_type = weapon;
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn exit_requested(&self) -> bool {
        self.scene.exit_requested()
    }

    /// Run one frame: scene timers and input routing, the gameplay tick
    /// when the scene is Playing, then one event-bus drain. Returns the
    /// number of events delivered.
    pub fn frame(&mut self, input: &FrameInput, dt: f32) -> usize {
        self.scene.update(dt, &mut self.bus);

        if let Some(changed) = self.scene.handle_input(input, &mut self.bus) {
            match (changed.from, changed.to) {
                (SceneState::Menu, SceneState::Playing) => self.start_new_game(),
                (_, SceneState::Paused) => self.game_state.set_paused(true),
                (SceneState::Paused, _) => self.game_state.set_paused(false),
                _ => {}
            }
        }

        if self.scene.is_simulating() {
            self.tick(input, dt);
            if self.game_state.is_game_over() {
                self.scene.handle(SceneTrigger::GameOverSignaled, &mut self.bus);
            } else if self.game_state.is_victory() {
                self.scene.handle(SceneTrigger::VictorySignaled, &mut self.bus);
            }
        }

        self.bus.process_events()
    }

    /// Advance gameplay by `dt` seconds, ignoring the scene. The pipeline
    /// order is fixed: input, orbital/linear motion and starfield, enemies,
    /// weapons, collision, health, then score and level bookkeeping.
    pub fn tick(&mut self, input: &FrameInput, dt: f32) {
        systems::player_input::run(
            &mut self.world,
            &mut self.bus,
            &mut self.weapons,
            self.weapon_type,
            input,
            self.config.angle_step,
        );

        systems::orbital::run(&mut self.world);
        systems::movement::run(&mut self.world, dt);
        systems::starfield::run(&mut self.world, &mut self.rng, &self.config, dt);

        let enemy_report = self
            .enemies
            .update(&mut self.world, &mut self.bus, &mut self.rng, dt);
        self.weapons.update(&mut self.world, dt);

        let collisions = systems::collision::run(
            &mut self.world,
            &mut self.bus,
            &mut self.game_state,
            ENEMY_CONTACT_DAMAGE,
        );

        systems::health::update(&mut self.world, &mut self.bus, &mut self.game_state, dt);

        self.apply_score(&collisions);
        if let Some(level) = enemy_report.level_changed {
            self.game_state.set_level(level);
        }
        if enemy_report.victory {
            self.game_state.set_victory();
        }

        self.tick += 1;
        trace!(
            "tick {}: {} entities, {} kills",
            self.tick,
            self.world.entity_count(),
            collisions.kills.len()
        );
    }

    fn apply_score(&mut self, collisions: &CollisionResult) {
        for kill in &collisions.kills {
            self.enemies.record_kill(kill.entity);
            let bonus = self
                .game_state
                .score_mut()
                .add_points(kill.points, &mut self.bus);
            for _ in 0..bonus {
                self.award_life();
            }
        }
    }

    fn award_life(&mut self) {
        let Some(player) = self.player else {
            return;
        };
        let Some(health) = self.world.get_mut::<Health>(player) else {
            return;
        };
        let lives = health.add_life();
        debug!("bonus life, {lives} lives");
        self.bus.publish(LifeAdded { lives });
    }

    /// Clear the registry and every piece of run state, then spawn the
    /// player and the starfield.
    pub fn start_new_game(&mut self) {
        self.world.clear();
        self.game_state.reset();
        self.enemies.reset();
        self.weapons.reset();
        self.tick = 0;
        self.player = Some(world_setup::setup_game(
            &mut self.world,
            &mut self.rng,
            &self.config,
        ));
        info!("new game started");
    }

    /// Render view of the current frame.
    pub fn snapshot(&self) -> SimSnapshot {
        let score = self.game_state.score();
        SimSnapshot {
            scene: self.scene.state(),
            tick: self.tick,
            score: score.score(),
            multiplier: score.multiplier(),
            lives: self
                .player
                .and_then(|p| self.world.get::<Health>(p))
                .map_or(0, |h| h.current()),
            level: self.game_state.level(),
            wave: self.enemies.wave().wave(),
            paused: self.game_state.is_paused(),
            game_over: self.game_state.is_game_over(),
            victory: self.game_state.is_victory(),
            entities: snapshot::build(&self.world),
        }
    }
}
