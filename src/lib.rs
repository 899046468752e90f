pub mod board;
pub mod bot_controller;
pub mod game_state;
pub mod logger;
pub mod session;
pub mod session_rng;
pub mod settings;
pub mod stats;
pub mod win_detector;

pub use board::{Board, CELL_COUNT, Cell, Mark};
pub use bot_controller::best_move;
pub use game_state::{GameResult, GameState, TurnState};
pub use session::{GameSession, SessionCommand, SessionEvent};
pub use session_rng::SessionRng;
pub use settings::{DEFAULT_BOT_MOVE_DELAY, SessionSettings};
pub use stats::{GameOutcome, Stats, classify};
pub use win_detector::winner;
