// Decision engine: positional evaluation and alpha-beta minimax
//
// The engine is a pure function of (board, player, depth). It explores the
// game tree depth-first, alternating the piece being placed at each ply
// while scoring every leaf from the same fixed perspective: the player the
// search was started for. Depth is the only bound; there is no time cutoff
// and no special case for boards that already contain a finished game.

use log::info;

use crate::board::{Board, BoardError, Player, COLS, ROWS};
use crate::config::Config;

/// Outcome of one minimax node: the retained score and, at branching nodes,
/// the column that produced it. `column` is `None` only at terminal leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i32,
    pub column: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("no legal moves: every column is full")]
    BoardFull,

    #[error("search depth must be at least 1")]
    ZeroDepth,

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Connect Four bot with OOP-style API
/// Takes static configuration dependencies and exposes the move decision
/// entry point invoked once per turn notification
#[derive(Clone)]
pub struct Bot {
    config: Config,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Bot { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Computes the column to play for `player` on `board` at the configured
    /// search depth. Called once per `ready` (and `finish`) notification.
    pub fn choose_move(&self, board: &Board, player: Player) -> Result<usize, EngineError> {
        let (column, score) =
            Self::compute_best_move(board, player, self.config.search.max_depth)?;

        info!(
            "Player {}: chose column {} (score: {}, depth: {})",
            player.id(),
            column,
            score,
            self.config.search.max_depth
        );

        Ok(column)
    }

    /// Runs the search at an explicit depth and returns (column, score).
    ///
    /// A full board is a caller-level precondition violation: the
    /// coordinator must not request a move when no legal move exists.
    pub fn compute_best_move(
        board: &Board,
        player: Player,
        depth: u8,
    ) -> Result<(usize, i32), EngineError> {
        if depth == 0 {
            return Err(EngineError::ZeroDepth);
        }
        if board.available_moves().is_empty() {
            return Err(EngineError::BoardFull);
        }

        let result = Self::minimax(board, depth, i32::MIN, i32::MAX, true, player)?;

        match result.column {
            Some(column) => Ok((column, result.score)),
            // The root has depth >= 1 and at least one legal move, so it
            // always branches and retains the first strictly-best column.
            None => unreachable!("non-terminal root search must retain a column"),
        }
    }

    /// Depth-bounded minimax with alpha-beta pruning.
    ///
    /// `player` is the fixed scoring perspective for the whole search; only
    /// the piece being placed alternates between plies. Ties keep the
    /// first-seen column: comparisons are strictly `>` (maximizing) and `<`
    /// (minimizing), never `>=`/`<=`.
    fn minimax(
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        player: Player,
    ) -> Result<SearchResult, EngineError> {
        let moves = board.available_moves();

        if depth == 0 || moves.is_empty() {
            return Ok(SearchResult {
                score: Self::evaluate_board(board, player),
                column: None,
            });
        }

        let mut best_column = None;

        if maximizing {
            let mut max_score = i32::MIN;

            for col in moves {
                let next = board.apply_move(col, player)?;
                let result = Self::minimax(&next, depth - 1, alpha, beta, false, player)?;

                if result.score > max_score {
                    max_score = result.score;
                    best_column = Some(col);
                }

                alpha = alpha.max(max_score);

                if alpha >= beta {
                    break;
                }
            }

            Ok(SearchResult {
                score: max_score,
                column: best_column,
            })
        } else {
            let mut min_score = i32::MAX;

            for col in moves {
                let next = board.apply_move(col, player.other())?;
                let result = Self::minimax(&next, depth - 1, alpha, beta, true, player)?;

                if result.score < min_score {
                    min_score = result.score;
                    best_column = Some(col);
                }

                beta = beta.min(min_score);

                if alpha >= beta {
                    break;
                }
            }

            Ok(SearchResult {
                score: min_score,
                column: best_column,
            })
        }
    }

    /// Static positional score of `board` from `player`'s perspective.
    ///
    /// Sums a fixed table over every contiguous run of 4 cells on the four
    /// axes of the grid. The score is a comparative signal between sibling
    /// positions at equal depth, not a game-theoretic value, and it is
    /// deliberately asymmetric: the opponent-threat term has no positive
    /// counterpart.
    pub fn evaluate_board(board: &Board, player: Player) -> i32 {
        let own_cell = player.to_cell();
        let opp_cell = player.other().to_cell();
        let mut score = 0;

        // Horizontal
        for row in 0..ROWS {
            for col in 0..COLS - 3 {
                let mut own = 0;
                let mut opp = 0;
                let mut empty = 0;
                for i in 0..4 {
                    match board.get(row, col + i) {
                        c if c == own_cell => own += 1,
                        c if c == opp_cell => opp += 1,
                        _ => empty += 1,
                    }
                }
                score += Self::score_window(own, opp, empty);
            }
        }

        // Vertical
        for col in 0..COLS {
            for row in 0..ROWS - 3 {
                let mut own = 0;
                let mut opp = 0;
                let mut empty = 0;
                for i in 0..4 {
                    match board.get(row + i, col) {
                        c if c == own_cell => own += 1,
                        c if c == opp_cell => opp += 1,
                        _ => empty += 1,
                    }
                }
                score += Self::score_window(own, opp, empty);
            }
        }

        // Diagonal (top-left to bottom-right)
        for row in 0..ROWS - 3 {
            for col in 0..COLS - 3 {
                let mut own = 0;
                let mut opp = 0;
                let mut empty = 0;
                for i in 0..4 {
                    match board.get(row + i, col + i) {
                        c if c == own_cell => own += 1,
                        c if c == opp_cell => opp += 1,
                        _ => empty += 1,
                    }
                }
                score += Self::score_window(own, opp, empty);
            }
        }

        // Diagonal (bottom-left to top-right)
        for row in 3..ROWS {
            for col in 0..COLS - 3 {
                let mut own = 0;
                let mut opp = 0;
                let mut empty = 0;
                for i in 0..4 {
                    match board.get(row - i, col + i) {
                        c if c == own_cell => own += 1,
                        c if c == opp_cell => opp += 1,
                        _ => empty += 1,
                    }
                }
                score += Self::score_window(own, opp, empty);
            }
        }

        score
    }

    /// Fixed scoring table for a single 4-cell window. Mixed windows
    /// (both players present) always score 0.
    fn score_window(own: usize, opp: usize, empty: usize) -> i32 {
        if own == 4 {
            100
        } else if own == 3 && empty == 1 {
            5
        } else if own == 2 && empty == 2 {
            2
        } else if opp == 3 && empty == 1 {
            -4
        } else {
            0
        }
    }
}
