use crate::board::{Board, Mark};
use crate::win_detector::winner;

/// Picks the computer's (O's) move by exhaustive minimax over the empty
/// cells. Returns `None` only when the board has no empty cell.
///
/// Ties between equally scored cells go to the lowest index: the scan runs
/// in ascending order and a later cell replaces the current best only on a
/// strictly better score, so the choice is deterministic.
pub fn best_move(board: &Board) -> Option<usize> {
    let mut best_score = i32::MIN;
    let mut best = None;

    for index in board.available_moves() {
        let score = minimax(&board.with(index, Mark::O), 0, false);
        if score > best_score {
            best_score = score;
            best = Some(index);
        }
    }

    best
}

/// Scores a position for O. Wins reached in fewer plies score higher, so the
/// computer prefers quick wins and slow losses. The 9-cell space is small
/// enough that no pruning or depth limit is needed, even from an empty board.
fn minimax(board: &Board, depth: i32, is_maximizing: bool) -> i32 {
    match winner(board) {
        Some(Mark::O) => return 10 - depth,
        Some(Mark::X) => return depth - 10,
        None => {}
    }
    if board.is_full() {
        return 0;
    }

    let mark = if is_maximizing { Mark::O } else { Mark::X };
    let mut best = if is_maximizing { i32::MIN } else { i32::MAX };

    for index in board.available_moves() {
        let score = minimax(&board.with(index, mark), depth + 1, !is_maximizing);
        best = if is_maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }

    best
}
