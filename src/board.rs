pub const CELL_COUNT: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// An empty cell holds `None`.
pub type Cell = Option<Mark>;

/// A 3x3 board, cells indexed 0..9 as three rows of three.
///
/// `Board` is a plain value: placing a mark produces a new board via
/// [`Board::with`], so search branches and replaced games never alias.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Panics if `index` is out of range; callers validate with
    /// [`Board::is_valid_move`] first.
    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index]
    }

    /// Copy of this board with `mark` placed at `index`. Only ever called on
    /// an empty cell; a set mark never changes for the rest of a game.
    pub fn with(&self, index: usize, mark: Mark) -> Board {
        debug_assert!(self.cells[index].is_none());
        let mut cells = self.cells;
        cells[index] = Some(mark);
        Board { cells }
    }

    pub fn is_valid_move(&self, index: usize) -> bool {
        index < CELL_COUNT && self.cells[index].is_none()
    }

    pub fn available_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| cell.is_none().then_some(index))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Cell = Some(Mark::X);
    const O: Cell = Some(Mark::O);
    const E: Cell = None;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.available_moves().len(), CELL_COUNT);
        assert!(!board.is_full());
    }

    #[test]
    fn test_with_places_mark_without_touching_original() {
        let board = Board::new();
        let next = board.with(4, Mark::X);

        assert_eq!(board.cell(4), None);
        assert_eq!(next.cell(4), Some(Mark::X));
        assert_eq!(next.available_moves().len(), CELL_COUNT - 1);
    }

    #[test]
    fn test_is_valid_move() {
        let board = Board::new().with(0, Mark::O);

        assert!(!board.is_valid_move(0));
        assert!(board.is_valid_move(1));
        assert!(!board.is_valid_move(9));
    }

    #[test]
    fn test_full_board() {
        let board = Board::from_cells([X, O, X, O, X, O, O, X, O]);
        assert!(board.is_full());
        assert!(board.available_moves().is_empty());
    }

    #[test]
    fn test_available_moves_are_the_empty_indices() {
        let board = Board::from_cells([X, E, O, E, X, E, E, E, O]);
        assert_eq!(board.available_moves(), vec![1, 3, 5, 6, 7]);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent(), Mark::X);
    }
}
