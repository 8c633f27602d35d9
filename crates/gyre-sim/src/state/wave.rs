use gyre_core::config::SimConfig;

use crate::ecs::{EntityId, World};

/// Progress through waves and levels.
///
/// Waves are numbered from 1 across the whole run. The last wave of every
/// level is a boss wave holding a single boss, and it only ends once that
/// boss is shot down.
#[derive(Debug, Clone)]
pub struct WaveState {
    wave: u32,
    waves_per_level: u32,
    level_count: u32,
    enemies_per_wave: u32,
    spawned: u32,
    kills: u32,
    started: bool,
    members: Vec<EntityId>,
}

impl WaveState {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            wave: 1,
            waves_per_level: config.waves_per_level.max(1),
            level_count: config.level_count.max(1),
            enemies_per_wave: config.enemies_per_wave.max(1),
            spawned: 0,
            kills: 0,
            started: false,
            members: Vec::new(),
        }
    }

    pub fn wave(&self) -> u32 {
        self.wave
    }

    pub fn level(&self) -> u32 {
        (self.wave - 1) / self.waves_per_level + 1
    }

    pub fn level_count(&self) -> u32 {
        self.level_count
    }

    pub fn is_boss_wave(&self) -> bool {
        self.wave % self.waves_per_level == 0
    }

    pub fn is_final_level(&self) -> bool {
        self.level() >= self.level_count
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub(crate) fn mark_started(&mut self) {
        self.started = true;
    }

    /// Enemies this wave spawns in total.
    pub fn quota(&self) -> u32 {
        if self.is_boss_wave() {
            1
        } else {
            self.enemies_per_wave
        }
    }

    pub fn spawned(&self) -> u32 {
        self.spawned
    }

    pub fn all_spawned(&self) -> bool {
        self.spawned >= self.quota()
    }

    pub(crate) fn record_spawn(&mut self, id: EntityId) {
        self.spawned += 1;
        self.members.push(id);
    }

    /// Members shot down so far.
    pub fn kills(&self) -> u32 {
        self.kills
    }

    /// Live members of this wave.
    pub fn remaining(&self, world: &World) -> usize {
        self.members.iter().filter(|&&id| world.is_alive(id)).count()
    }

    /// Count `id` as shot down. Returns false if it is not a member.
    pub(crate) fn record_kill(&mut self, id: EntityId) -> bool {
        let Some(slot) = self.members.iter().position(|&m| m == id) else {
            return false;
        };
        self.members.remove(slot);
        self.kills += 1;
        true
    }

    /// Drop members that are gone without being shot down and return how
    /// many there were. An escaped boss goes back into the spawn quota.
    pub(crate) fn sweep(&mut self, world: &World) -> u32 {
        let before = self.members.len();
        self.members.retain(|&id| world.is_alive(id));
        let escaped = (before - self.members.len()) as u32;
        if self.is_boss_wave() {
            self.spawned = self.spawned.saturating_sub(escaped);
        }
        escaped
    }

    /// True once every enemy was spawned and none is still out there.
    pub fn is_cleared(&self) -> bool {
        self.started && self.all_spawned() && self.members.is_empty()
    }

    /// Move on to the next wave.
    pub(crate) fn advance(&mut self) {
        self.wave += 1;
        self.spawned = 0;
        self.kills = 0;
        self.started = false;
        self.members.clear();
    }
}
