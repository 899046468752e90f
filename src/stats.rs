use serde::{Deserialize, Serialize};

use crate::board::Mark;
use crate::game_state::GameResult;

/// How a finished game went, from the human player's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOutcome {
    Win,
    Loss,
    Tie,
}

/// Folds a terminal [`GameResult`] into an outcome; X is always the human.
/// Returns `None` for a game still in progress.
pub fn classify(result: GameResult) -> Option<GameOutcome> {
    match result {
        GameResult::InProgress => None,
        GameResult::Win(Mark::X) => Some(GameOutcome::Win),
        GameResult::Win(Mark::O) => Some(GameOutcome::Loss),
        GameResult::Tie => Some(GameOutcome::Tie),
    }
}

/// Aggregate record across games. Owned by the surrounding application and
/// bumped exactly once per completed game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Stats {
    pub fn record(&mut self, outcome: GameOutcome) {
        self.games += 1;
        match outcome {
            GameOutcome::Win => self.wins += 1,
            GameOutcome::Loss => self.losses += 1,
            GameOutcome::Tie => self.ties += 1,
        }
    }
}
