//! Game-level state consumed across systems: flags, score and wave progress.

pub mod game_state;
pub mod score;
pub mod wave;

pub use game_state::GameStateManager;
pub use score::ScoreManager;
pub use wave::WaveState;
