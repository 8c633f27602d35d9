use glam::Vec2;
use log::{debug, info};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use gyre_core::components::{Size, Tag};
use gyre_core::config::SimConfig;
use gyre_core::events::{BossSpawned, LevelChanged, WaveCompleted, WaveStarted};

use crate::ecs::{EntityId, Query, Signature, World};
use crate::event_bus::EventBus;
use crate::state::WaveState;
use crate::systems::movement;
use crate::world_setup;

/// What one enemy step did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnemyReport {
    pub spawned: Option<EntityId>,
    pub pruned: u32,
    /// Wave members that left without being shot down.
    pub escaped: u32,
    pub wave_completed: bool,
    pub level_changed: Option<u32>,
    pub victory: bool,
}

/// Timed spawning from the orbit center, outward flight, range pruning and
/// wave/level progression.
#[derive(Debug, Clone)]
pub struct EnemySystem {
    spawn_timer: f32,
    spawn_interval: f32,
    prune_distance: f32,
    center: Vec2,
    config: SimConfig,
    wave: WaveState,
    victory: bool,
}

impl EnemySystem {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            spawn_timer: 0.0,
            spawn_interval: config.spawn_interval,
            prune_distance: config.enemy_prune_distance(),
            center: config.center(),
            config: config.clone(),
            wave: WaveState::new(config),
            victory: false,
        }
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    pub fn wave(&self) -> &WaveState {
        &self.wave
    }

    /// Set once the final level's boss wave is cleared.
    pub fn victory(&self) -> bool {
        self.victory
    }

    pub fn update(
        &mut self,
        world: &mut World,
        bus: &mut EventBus,
        rng: &mut ChaCha8Rng,
        dt: f32,
    ) -> EnemyReport {
        let mut report = EnemyReport {
            pruned: self.move_and_prune(world, dt),
            escaped: self.wave.sweep(world),
            ..Default::default()
        };
        if report.escaped > 0 && self.wave.is_boss_wave() {
            info!("boss escaped, wave {} stays open", self.wave.wave());
        }

        if !self.victory {
            self.start_wave_if_needed(bus);
            self.spawn_timer += dt;
            if self.spawn_timer >= self.spawn_interval && !self.wave.all_spawned() {
                self.spawn_timer = 0.0;
                report.spawned = Some(self.spawn_one(world, bus, rng));
            }
        }

        if !self.victory && self.wave.is_cleared() {
            self.complete_wave(bus, &mut report);
        }
        report
    }

    fn start_wave_if_needed(&mut self, bus: &mut EventBus) {
        if self.wave.is_started() {
            return;
        }
        self.wave.mark_started();
        info!(
            "wave {} started (level {}, boss: {})",
            self.wave.wave(),
            self.wave.level(),
            self.wave.is_boss_wave()
        );
        bus.publish(WaveStarted {
            wave: self.wave.wave(),
            level: self.wave.level(),
            boss: self.wave.is_boss_wave(),
        });
    }

    fn spawn_one(&mut self, world: &mut World, bus: &mut EventBus, rng: &mut ChaCha8Rng) -> EntityId {
        let heading = rng.gen_range(0.0..360.0_f32);
        let id = if self.wave.is_boss_wave() {
            let id = world_setup::spawn_boss(world, &self.config, heading);
            bus.publish(BossSpawned {
                entity: id,
                wave: self.wave.wave(),
            });
            info!("boss {id} spawned in wave {}", self.wave.wave());
            id
        } else {
            let id = world_setup::spawn_enemy(world, &self.config, heading);
            debug!("enemy {id} spawned heading {heading:.1}");
            id
        };
        self.wave.record_spawn(id);
        id
    }

    fn move_and_prune(&self, world: &mut World, dt: f32) -> u32 {
        let mut pruned = 0;
        let query = Query::tagged(Tag::Enemy, Signature::POSITION | Signature::MOVEMENT);
        for id in world.query(query) {
            let Some(pos) = movement::integrate(world, id, dt) else {
                continue;
            };
            let size = world.read::<Size>(id).unwrap_or_default();
            if pos.center(size).distance(self.center) > self.prune_distance {
                debug!("enemy {id} out of range");
                world.remove(id);
                pruned += 1;
            }
        }
        pruned
    }

    fn complete_wave(&mut self, bus: &mut EventBus, report: &mut EnemyReport) {
        let wave = self.wave.wave();
        let level = self.wave.level();
        bus.publish(WaveCompleted { wave, level });
        info!("wave {wave} cleared");
        report.wave_completed = true;

        if self.wave.is_boss_wave() {
            if self.wave.is_final_level() {
                self.victory = true;
                report.victory = true;
                return;
            }
            let next = level + 1;
            bus.publish(LevelChanged { level: next });
            info!("level {next}");
            report.level_changed = Some(next);
        }
        self.wave.advance();
        self.spawn_timer = 0.0;
    }

    /// Credit a shot-down enemy to the current wave. Returns false if it
    /// did not belong to it.
    pub fn record_kill(&mut self, id: EntityId) -> bool {
        self.wave.record_kill(id)
    }

    /// Back to wave 1 with an empty timer.
    pub fn reset(&mut self) {
        *self = Self::new(&self.config);
    }
}
