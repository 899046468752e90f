use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use crate::board::Board;
use crate::bot_controller;
use crate::game_state::{GameState, TurnState};
use crate::log;
use crate::session_rng::SessionRng;
use crate::settings::SessionSettings;
use crate::stats::GameOutcome;

const COMMAND_CHANNEL_CAPACITY: usize = 16;
const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Clone, Copy, Debug)]
pub enum SessionCommand {
    /// Human clicked cell 0..=8.
    ClickCell(usize),
    /// Reset to a fresh board; the first mover is drawn again.
    NewGame,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionEvent {
    /// Full snapshot after every applied move and on every reset.
    BoardChanged(Board),
    StatusChanged(String),
    /// Fired exactly once per completed game; feeds the owner's `Stats`.
    GameFinished(GameOutcome),
}

/// A computer move already chosen by the bot controller but held back by the
/// visible thinking delay. Kept as a plain value inside the session loop, so
/// a reset cancels it by dropping it; it can never land on a fresh board.
struct PendingComputerMove {
    index: usize,
    commit_at: Instant,
}

/// One human-vs-computer game session. Owns the [`GameState`]; processes one
/// command at a time, so a human move and the computer's reply are strictly
/// serialized.
pub struct GameSession {
    settings: SessionSettings,
    game_state: GameState,
    rng: SessionRng,
    commands: mpsc::Receiver<SessionCommand>,
    events: mpsc::Sender<SessionEvent>,
}

impl GameSession {
    pub fn new(
        settings: SessionSettings,
        mut rng: SessionRng,
    ) -> (
        Self,
        mpsc::Sender<SessionCommand>,
        mpsc::Receiver<SessionEvent>,
    ) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let game_state = GameState::new(&mut rng);

        let session = Self {
            settings,
            game_state,
            rng,
            commands: command_rx,
            events: event_tx,
        };
        (session, command_tx, event_rx)
    }

    /// Runs until every command sender is dropped.
    pub async fn run(mut self) {
        let mut pending = self.schedule_computer_move();
        self.broadcast_state().await;

        loop {
            tokio::select! {
                command = self.commands.recv() => {
                    let Some(command) = command else {
                        break;
                    };
                    match command {
                        SessionCommand::ClickCell(index) => {
                            self.handle_click(index, &mut pending).await;
                        }
                        SessionCommand::NewGame => {
                            self.handle_new_game(&mut pending).await;
                        }
                    }
                }
                _ = wait_for_commit(&pending), if pending.is_some() => {
                    if let Some(pending_move) = pending.take() {
                        self.commit_computer_move(pending_move.index).await;
                    }
                }
            }
        }
    }

    async fn handle_click(&mut self, index: usize, pending: &mut Option<PendingComputerMove>) {
        match self.game_state.apply_human_move(index) {
            Ok(outcome) => {
                self.broadcast_state().await;
                if let Some(outcome) = outcome {
                    self.broadcast_outcome(outcome).await;
                } else {
                    *pending = self.schedule_computer_move();
                }
            }
            Err(reason) => {
                log!("Rejected click on cell {}: {}", index, reason);
            }
        }
    }

    async fn handle_new_game(&mut self, pending: &mut Option<PendingComputerMove>) {
        if pending.take().is_some() {
            log!("New game requested mid-delay, discarding the pending computer move");
        }
        self.game_state = GameState::new(&mut self.rng);
        self.broadcast_state().await;
        *pending = self.schedule_computer_move();
    }

    async fn commit_computer_move(&mut self, index: usize) {
        match self.game_state.apply_computer_move(index) {
            Ok(outcome) => {
                self.broadcast_state().await;
                if let Some(outcome) = outcome {
                    self.broadcast_outcome(outcome).await;
                }
            }
            Err(reason) => {
                log!("Computer failed to place mark at cell {}: {}", index, reason);
            }
        }
    }

    /// On the computer's turn, picks its move right away and stamps the
    /// commit deadline. `best_move` always finds a cell on a non-terminal
    /// board, so the `?` only covers the unreachable full-board case.
    fn schedule_computer_move(&self) -> Option<PendingComputerMove> {
        if self.game_state.turn() != TurnState::ComputerThinking {
            return None;
        }
        let index = bot_controller::best_move(&self.game_state.board())?;
        Some(PendingComputerMove {
            index,
            commit_at: Instant::now() + self.settings.bot_move_delay,
        })
    }

    async fn broadcast_state(&self) {
        let board = self.game_state.board();
        let status = self.game_state.status_text(&self.settings.player_name);
        let _ = self.events.send(SessionEvent::BoardChanged(board)).await;
        let _ = self.events.send(SessionEvent::StatusChanged(status)).await;
    }

    async fn broadcast_outcome(&self, outcome: GameOutcome) {
        let _ = self.events.send(SessionEvent::GameFinished(outcome)).await;
    }
}

async fn wait_for_commit(pending: &Option<PendingComputerMove>) {
    match pending {
        Some(pending_move) => sleep_until(pending_move.commit_at).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Mark;
    use crate::win_detector::winner;
    use std::time::Duration;

    /// First seed whose opening draws match `human_first`, in order.
    fn seed_where(human_first: &[bool]) -> u64 {
        (0..u64::MAX)
            .find(|&seed| {
                let mut rng = SessionRng::new(seed);
                human_first.iter().all(|&want| rng.random_bool() == want)
            })
            .unwrap()
    }

    fn spawn_session(
        seed: u64,
    ) -> (
        mpsc::Sender<SessionCommand>,
        mpsc::Receiver<SessionEvent>,
    ) {
        let settings = SessionSettings::new("tester");
        let (session, commands, events) = GameSession::new(settings, SessionRng::new(seed));
        tokio::spawn(session.run());
        (commands, events)
    }

    async fn next_event(events: &mut mpsc::Receiver<SessionEvent>) -> SessionEvent {
        tokio::time::timeout(Duration::from_secs(60), events.recv())
            .await
            .expect("timed out waiting for a session event")
            .expect("session dropped its event sender")
    }

    async fn next_board(events: &mut mpsc::Receiver<SessionEvent>) -> Board {
        loop {
            if let SessionEvent::BoardChanged(board) = next_event(events).await {
                return board;
            }
        }
    }

    fn count_marks(board: &Board, mark: Mark) -> usize {
        board.cells().iter().filter(|&&c| c == Some(mark)).count()
    }

    #[tokio::test(start_paused = true)]
    async fn test_computer_replies_after_the_thinking_delay() {
        let (commands, mut events) = spawn_session(seed_where(&[true]));

        let board = next_board(&mut events).await;
        assert_eq!(board, Board::new());

        commands.send(SessionCommand::ClickCell(4)).await.unwrap();
        let board = next_board(&mut events).await;
        assert_eq!(board.cell(4), Some(Mark::X));
        assert_eq!(count_marks(&board, Mark::O), 0);

        // The reply lands only after the 500ms pause elapses.
        let board = next_board(&mut events).await;
        assert_eq!(count_marks(&board, Mark::O), 1);
        // Against a center opening every corner ties; the scan picks cell 0.
        assert_eq!(board.cell(0), Some(Mark::O));
    }

    #[tokio::test(start_paused = true)]
    async fn test_computer_opens_when_it_wins_the_draw() {
        let (_commands, mut events) = spawn_session(seed_where(&[false]));

        let board = next_board(&mut events).await;
        assert_eq!(board, Board::new());

        let board = next_board(&mut events).await;
        assert_eq!(count_marks(&board, Mark::O), 1);
        assert_eq!(count_marks(&board, Mark::X), 0);
        // All openings tie under optimal play; lowest index wins the tie.
        assert_eq!(board.cell(0), Some(Mark::O));
    }

    #[tokio::test(start_paused = true)]
    async fn test_clicks_during_computer_thinking_are_dropped() {
        let (commands, mut events) = spawn_session(seed_where(&[true]));
        let _ = next_board(&mut events).await;

        commands.send(SessionCommand::ClickCell(4)).await.unwrap();
        let _ = next_board(&mut events).await;

        // Out of turn; silently rejected, no board event for it.
        commands.send(SessionCommand::ClickCell(8)).await.unwrap();

        let board = next_board(&mut events).await;
        assert_eq!(count_marks(&board, Mark::X), 1);
        assert_eq!(count_marks(&board, Mark::O), 1);
        assert_eq!(board.cell(8), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_game_discards_the_pending_computer_move() {
        let (commands, mut events) = spawn_session(seed_where(&[true, true]));
        let _ = next_board(&mut events).await;

        commands.send(SessionCommand::ClickCell(4)).await.unwrap();
        let board = next_board(&mut events).await;
        assert_eq!(board.cell(4), Some(Mark::X));

        // Reset while the computer's reply is still pending.
        commands.send(SessionCommand::NewGame).await.unwrap();
        let board = next_board(&mut events).await;
        assert_eq!(board, Board::new());

        // Let the original delay elapse; the stale move must never land.
        tokio::time::sleep(Duration::from_secs(2)).await;
        while let Ok(event) = events.try_recv() {
            if let SessionEvent::BoardChanged(board) = event {
                assert_eq!(count_marks(&board, Mark::O), 0, "stale move applied");
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_game_reports_exactly_one_outcome() {
        let (commands, mut events) = spawn_session(seed_where(&[true]));

        // Always click the lowest open cell; optimal O never loses to it.
        let mut board = next_board(&mut events).await;
        let outcome = 'game: loop {
            let click = board.available_moves()[0];
            commands.send(SessionCommand::ClickCell(click)).await.unwrap();
            board = next_board(&mut events).await;

            loop {
                match next_event(&mut events).await {
                    SessionEvent::GameFinished(outcome) => break 'game outcome,
                    SessionEvent::BoardChanged(next) => {
                        board = next;
                        if winner(&board).is_none() && !board.is_full() {
                            break;
                        }
                        // The computer's move ended it; wait for the report.
                    }
                    SessionEvent::StatusChanged(_) => {}
                }
            }
        };

        assert!(matches!(outcome, GameOutcome::Loss | GameOutcome::Tie));
        assert!(winner(&board).is_some() || board.is_full());

        // Terminal: further clicks change nothing and nothing fires twice.
        commands.send(SessionCommand::ClickCell(0)).await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
        while let Ok(event) = events.try_recv() {
            assert!(
                matches!(event, SessionEvent::StatusChanged(_)),
                "unexpected event after game over: {event:?}"
            );
        }
    }
}
