use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Visible "thinking" pause before the computer's move lands. Pure pacing;
/// nothing depends on the exact duration.
pub const DEFAULT_BOT_MOVE_DELAY: Duration = Duration::from_millis(500);

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Shown in status text; never part of game logic.
    pub player_name: String,
    #[serde(default = "default_bot_move_delay")]
    pub bot_move_delay: Duration,
}

fn default_bot_move_delay() -> Duration {
    DEFAULT_BOT_MOVE_DELAY
}

impl SessionSettings {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            bot_move_delay: DEFAULT_BOT_MOVE_DELAY,
        }
    }
}
