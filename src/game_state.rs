use crate::board::{Board, Mark};
use crate::session_rng::SessionRng;
use crate::stats::{self, GameOutcome};
use crate::win_detector::winner;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnState {
    WaitingForHuman,
    ComputerThinking,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    Win(Mark),
    Tie,
}

/// One game of tic-tac-toe: the board plus whose turn it is. X is always the
/// human, O always the computer, and the first mover is drawn 50/50 on every
/// new game.
///
/// Move application runs as ordered steps: place the mark, detect a terminal
/// board, classify the outcome, advance the turn. The outcome comes back from
/// the terminal transition itself, so it is reported exactly once per game.
#[derive(Debug)]
pub struct GameState {
    board: Board,
    turn: TurnState,
    result: GameResult,
}

impl GameState {
    pub fn new(rng: &mut SessionRng) -> Self {
        let turn = if rng.random_bool() {
            TurnState::WaitingForHuman
        } else {
            TurnState::ComputerThinking
        };
        Self {
            board: Board::new(),
            turn,
            result: GameResult::InProgress,
        }
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Applies the human's X at `index`. `Ok(Some(_))` means this move ended
    /// the game. Rejections leave the state untouched; the caller decides
    /// whether to surface them (the session just logs).
    pub fn apply_human_move(&mut self, index: usize) -> Result<Option<GameOutcome>, String> {
        match self.turn {
            TurnState::WaitingForHuman => {}
            TurnState::ComputerThinking => return Err("Not the player's turn".to_string()),
            TurnState::GameOver => return Err("Game is already over".to_string()),
        }
        self.place(index, Mark::X)
    }

    /// Applies the computer's O at `index` (chosen by the bot controller).
    pub fn apply_computer_move(&mut self, index: usize) -> Result<Option<GameOutcome>, String> {
        match self.turn {
            TurnState::ComputerThinking => {}
            TurnState::WaitingForHuman => return Err("Not the computer's turn".to_string()),
            TurnState::GameOver => return Err("Game is already over".to_string()),
        }
        self.place(index, Mark::O)
    }

    fn place(&mut self, index: usize, mark: Mark) -> Result<Option<GameOutcome>, String> {
        if !self.board.is_valid_move(index) {
            return Err(format!("Cell {index} is not an open cell"));
        }

        self.board = self.board.with(index, mark);
        self.result = if let Some(winning_mark) = winner(&self.board) {
            GameResult::Win(winning_mark)
        } else if self.board.is_full() {
            GameResult::Tie
        } else {
            GameResult::InProgress
        };

        match self.result {
            GameResult::InProgress => {
                self.turn = match mark {
                    Mark::X => TurnState::ComputerThinking,
                    Mark::O => TurnState::WaitingForHuman,
                };
                Ok(None)
            }
            _ => {
                self.turn = TurnState::GameOver;
                Ok(stats::classify(self.result))
            }
        }
    }

    /// Status line for display, recomputed from the current state.
    pub fn status_text(&self, player_name: &str) -> String {
        match self.result {
            GameResult::Win(Mark::X) => format!("Winner: {player_name}"),
            GameResult::Win(Mark::O) => "Winner: CPU".to_string(),
            GameResult::Tie => "TIE".to_string(),
            GameResult::InProgress => match self.turn {
                TurnState::WaitingForHuman => format!("Next player: {player_name}"),
                _ => "Next player: CPU".to_string(),
            },
        }
    }
}
