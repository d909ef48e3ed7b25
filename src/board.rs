// Board model for the 6x7 Connect Four grid
//
// Row 0 is the top of the grid, row 5 the bottom. Within a column, pieces
// stack from the bottom row with no gaps (the gravity invariant). Boards are
// small Copy values: applying a move produces a new board and never mutates
// the one the caller holds, so the search tree can share nothing.

use thiserror::Error;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// One of the two players, identified on the wire as 1 and 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Convert player to cell type
    pub fn to_cell(self) -> Cell {
        match self {
            Player::One => Cell::One,
            Player::Two => Cell::Two,
        }
    }

    /// Wire identifier of this player
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Parse a wire identifier, `None` for anything other than 1 or 2
    pub fn from_id(id: u8) -> Option<Player> {
        match id {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    One,
    Two,
}

/// Errors for malformed boards and move-contract violations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board must be 6x7, got {rows}x{cols}")]
    WrongDimensions { rows: usize, cols: usize },

    #[error("invalid cell value {value} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, value: u8 },

    #[error("floating piece at row {row}, column {col}")]
    FloatingPiece { row: usize, col: usize },

    #[error("column {0} is out of range")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("player id must be 1 or 2, got {0}")]
    InvalidPlayer(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Check if a column is full (its top cell is occupied)
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Legal columns for the next move, in ascending order.
    /// Empty when the board is full; callers must treat that as terminal.
    pub fn available_moves(&self) -> Vec<usize> {
        (0..COLS).filter(|&col| !self.is_column_full(col)).collect()
    }

    /// Drop a piece for `player` into `col`, returning the resulting board.
    /// The receiver is left untouched. A full or out-of-range column is a
    /// contract violation and reported as an explicit error.
    pub fn apply_move(&self, col: usize, player: Player) -> Result<Board, BoardError> {
        if col >= COLS {
            return Err(BoardError::InvalidColumn(col));
        }

        let mut next = *self;
        for row in (0..ROWS).rev() {
            if next.cells[row][col] == Cell::Empty {
                next.cells[row][col] = player.to_cell();
                return Ok(next);
            }
        }

        Err(BoardError::ColumnFull(col))
    }

    /// Build a board from the coordinator's wire grid (0 = empty, 1, 2).
    /// Rejects wrong dimensions, unknown cell values, and boards that
    /// violate the gravity invariant.
    pub fn from_grid(grid: &[Vec<u8>]) -> Result<Board, BoardError> {
        if grid.len() != ROWS {
            return Err(BoardError::WrongDimensions {
                rows: grid.len(),
                cols: grid.first().map(|r| r.len()).unwrap_or(0),
            });
        }

        let mut board = Board::new();
        for (row, cells) in grid.iter().enumerate() {
            if cells.len() != COLS {
                return Err(BoardError::WrongDimensions {
                    rows: grid.len(),
                    cols: cells.len(),
                });
            }
            for (col, &value) in cells.iter().enumerate() {
                board.cells[row][col] = match value {
                    0 => Cell::Empty,
                    1 => Cell::One,
                    2 => Cell::Two,
                    _ => return Err(BoardError::InvalidCell { row, col, value }),
                };
            }
        }

        // Gravity invariant: no piece may sit above an empty cell.
        for col in 0..COLS {
            for row in 0..ROWS - 1 {
                if board.cells[row][col] != Cell::Empty && board.cells[row + 1][col] == Cell::Empty
                {
                    return Err(BoardError::FloatingPiece { row, col });
                }
            }
        }

        Ok(board)
    }

    /// Wire representation of this board (0 = empty, 1, 2), row 0 first
    pub fn to_grid(&self) -> Vec<Vec<u8>> {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Empty => 0,
                        Cell::One => 1,
                        Cell::Two => 2,
                    })
                    .collect()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
    }

    #[test]
    fn test_apply_move_lands_at_bottom() {
        let board = Board::new();

        let board = board.apply_move(3, Player::One).unwrap();
        assert_eq!(board.get(5, 3), Cell::One);

        // Second piece in the same column stacks on top of the first
        let board = board.apply_move(3, Player::Two).unwrap();
        assert_eq!(board.get(4, 3), Cell::Two);
        assert_eq!(board.get(5, 3), Cell::One);
    }

    #[test]
    fn test_apply_move_leaves_original_untouched() {
        let original = Board::new();
        let _next = original.apply_move(0, Player::One).unwrap();
        assert_eq!(original.get(5, 0), Cell::Empty);
    }

    #[test]
    fn test_apply_move_column_full() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board = board.apply_move(0, Player::One).unwrap();
        }

        assert!(board.is_column_full(0));
        assert_eq!(
            board.apply_move(0, Player::Two),
            Err(BoardError::ColumnFull(0))
        );
    }

    #[test]
    fn test_apply_move_invalid_column() {
        let board = Board::new();
        assert_eq!(
            board.apply_move(7, Player::One),
            Err(BoardError::InvalidColumn(7))
        );
    }

    #[test]
    fn test_available_moves_ascending() {
        let board = Board::new();
        assert_eq!(board.available_moves(), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_available_moves_skips_full_column() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board = board.apply_move(2, Player::One).unwrap();
        }
        assert_eq!(board.available_moves(), vec![0, 1, 3, 4, 5, 6]);
    }

    #[test]
    fn test_full_board_has_no_moves() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                board = board.apply_move(col, Player::One).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(board.available_moves().is_empty());
    }

    #[test]
    fn test_gravity_invariant_preserved() {
        // Interleave drops across columns and verify no piece ever floats
        let mut board = Board::new();
        let drops = [3, 3, 2, 4, 3, 2, 6, 0, 3, 1, 5, 4];
        let mut player = Player::One;

        for &col in drops.iter() {
            board = board.apply_move(col, player).unwrap();
            player = player.other();

            for c in 0..COLS {
                for r in 0..ROWS - 1 {
                    if board.get(r, c) != Cell::Empty {
                        assert_ne!(
                            board.get(r + 1, c),
                            Cell::Empty,
                            "floating piece at row {}, column {}",
                            r,
                            c
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_from_grid_valid() {
        let mut grid = vec![vec![0u8; COLS]; ROWS];
        grid[5][0] = 1;
        grid[5][1] = 2;
        grid[4][0] = 2;

        let board = Board::from_grid(&grid).unwrap();
        assert_eq!(board.get(5, 0), Cell::One);
        assert_eq!(board.get(5, 1), Cell::Two);
        assert_eq!(board.get(4, 0), Cell::Two);
        assert_eq!(board.get(0, 0), Cell::Empty);
    }

    #[test]
    fn test_from_grid_wrong_dimensions() {
        let grid = vec![vec![0u8; COLS]; 5];
        assert_eq!(
            Board::from_grid(&grid),
            Err(BoardError::WrongDimensions { rows: 5, cols: 7 })
        );

        let grid = vec![vec![0u8; 6]; ROWS];
        assert_eq!(
            Board::from_grid(&grid),
            Err(BoardError::WrongDimensions { rows: 6, cols: 6 })
        );
    }

    #[test]
    fn test_from_grid_invalid_cell_value() {
        let mut grid = vec![vec![0u8; COLS]; ROWS];
        grid[5][3] = 9;
        assert_eq!(
            Board::from_grid(&grid),
            Err(BoardError::InvalidCell {
                row: 5,
                col: 3,
                value: 9
            })
        );
    }

    #[test]
    fn test_from_grid_rejects_floating_piece() {
        let mut grid = vec![vec![0u8; COLS]; ROWS];
        grid[3][2] = 1; // piece with nothing underneath
        assert_eq!(
            Board::from_grid(&grid),
            Err(BoardError::FloatingPiece { row: 3, col: 2 })
        );
    }

    #[test]
    fn test_grid_round_trip() {
        let board = Board::new()
            .apply_move(3, Player::One)
            .unwrap()
            .apply_move(3, Player::Two)
            .unwrap()
            .apply_move(0, Player::One)
            .unwrap();

        let rebuilt = Board::from_grid(&board.to_grid()).unwrap();
        assert_eq!(rebuilt, board);
    }

    #[test]
    fn test_player_other() {
        assert_eq!(Player::One.other(), Player::Two);
        assert_eq!(Player::Two.other(), Player::One);
    }

    #[test]
    fn test_player_wire_ids() {
        assert_eq!(Player::One.id(), 1);
        assert_eq!(Player::Two.id(), 2);
        assert_eq!(Player::from_id(1), Some(Player::One));
        assert_eq!(Player::from_id(2), Some(Player::Two));
        assert_eq!(Player::from_id(0), None);
        assert_eq!(Player::from_id(3), None);
    }
}
