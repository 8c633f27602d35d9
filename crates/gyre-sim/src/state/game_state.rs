use log::info;

use super::score::ScoreManager;

/// Pause, game-over, victory and level flags plus the score.
#[derive(Debug, Clone, Default)]
pub struct GameStateManager {
    paused: bool,
    game_over: bool,
    victory: bool,
    level: u32,
    score: ScoreManager,
}

impl GameStateManager {
    pub fn new() -> Self {
        Self {
            level: 1,
            ..Default::default()
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Latch the game-over flag. Returns false if it was already set.
    pub fn set_game_over(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        info!("game over at score {}", self.score.score());
        self.game_over = true;
        true
    }

    pub fn is_victory(&self) -> bool {
        self.victory
    }

    /// Latch the victory flag. Returns false if it was already set.
    pub fn set_victory(&mut self) -> bool {
        if self.victory {
            return false;
        }
        info!("victory at score {}", self.score.score());
        self.victory = true;
        true
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level;
    }

    pub fn score(&self) -> &ScoreManager {
        &self.score
    }

    pub fn score_mut(&mut self) -> &mut ScoreManager {
        &mut self.score
    }

    /// Fresh state for a new run.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
