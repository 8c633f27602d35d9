use log::{debug, info};

use gyre_core::constants::{BONUS_LIFE_SCORE, KILLS_PER_MULTIPLIER_STEP, MAX_MULTIPLIER};
use gyre_core::events::ScoreChanged;

use crate::event_bus::EventBus;

/// Score, kill-streak multiplier and bonus-life thresholds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreManager {
    score: u64,
    multiplier: u32,
    kill_streak: u32,
    next_bonus_at: u64,
}

impl ScoreManager {
    pub fn new() -> Self {
        Self {
            score: 0,
            multiplier: 1,
            kill_streak: 0,
            next_bonus_at: BONUS_LIFE_SCORE,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn kill_streak(&self) -> u32 {
        self.kill_streak
    }

    /// Award `base` points at the current multiplier and count the kill
    /// toward the next multiplier step. Returns how many bonus-life
    /// thresholds the new score crossed.
    pub fn add_points(&mut self, base: u32, bus: &mut EventBus) -> u32 {
        let delta = u64::from(base) * u64::from(self.multiplier);
        self.score += delta;
        bus.publish(ScoreChanged {
            score: self.score,
            delta,
            multiplier: self.multiplier,
        });

        self.kill_streak += 1;
        if self.kill_streak % KILLS_PER_MULTIPLIER_STEP == 0 && self.multiplier < MAX_MULTIPLIER {
            self.multiplier += 1;
            debug!("multiplier raised to x{}", self.multiplier);
        }

        let mut bonus_lives = 0;
        while self.score >= self.next_bonus_at {
            bonus_lives += 1;
            self.next_bonus_at += BONUS_LIFE_SCORE;
        }
        if bonus_lives > 0 {
            info!("score {} earned {bonus_lives} bonus life", self.score);
        }
        bonus_lives
    }

    /// Drop the streak and multiplier back to x1 (the player was hit).
    pub fn reset_multiplier(&mut self) {
        self.multiplier = 1;
        self.kill_streak = 0;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for ScoreManager {
    fn default() -> Self {
        Self::new()
    }
}
