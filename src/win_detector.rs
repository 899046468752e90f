use crate::board::{Board, Mark};

/// The 8 possible winning lines: three rows, three columns, two diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// The mark occupying the first fully-marked line in the order above, if any.
pub fn winner(board: &Board) -> Option<Mark> {
    for [a, b, c] in LINES {
        if let Some(mark) = board.cell(a) {
            if board.cell(b) == Some(mark) && board.cell(c) == Some(mark) {
                return Some(mark);
            }
        }
    }
    None
}
