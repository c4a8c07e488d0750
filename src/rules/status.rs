//! Terminal flags, score and the move-availability check.

use serde::{Deserialize, Serialize};

use crate::grid::{Grid, EMPTY};

/// Whether any move can still change the board.
///
/// True if a slot is empty or two 4-neighbours hold equal values. Neighbour
/// reads off the board return the out-of-range sentinel, which never equals
/// a tile value, so edges need no special casing.
///
/// ```
/// use rust_2048::core::{Cell, CellId, Slot};
/// use rust_2048::grid::Grid;
/// use rust_2048::rules::can_move;
///
/// let mut grid = Grid::new(2);
/// assert!(can_move(&grid));
///
/// for (i, (x, y, v)) in [(0, 0, 2), (1, 0, 4), (0, 1, 4), (1, 1, 2)].into_iter().enumerate() {
///     grid.place(Cell::new(CellId(i as u32), v, Slot::new(x, y)));
/// }
/// assert!(!can_move(&grid));
/// ```
#[must_use]
pub fn can_move(grid: &Grid) -> bool {
    let n = grid.size() as isize;
    for y in 0..n {
        for x in 0..n {
            let value = grid.get(x, y);
            if value == EMPTY {
                return true;
            }
            if value == grid.get(x + 1, y)
                || value == grid.get(x - 1, y)
                || value == grid.get(x, y + 1)
                || value == grid.get(x, y - 1)
            {
                return true;
            }
        }
    }
    false
}

/// Score and terminal flags for one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    goal: u32,
    score: u64,
    best_score: u64,
    won: bool,
    game_over: bool,
}

impl GameStatus {
    /// Fresh status; `best_score` is the host's persisted best.
    #[must_use]
    pub fn new(goal: u32, best_score: u64) -> Self {
        Self {
            goal,
            score: 0,
            best_score,
            won: false,
            game_over: false,
        }
    }

    #[must_use]
    pub fn goal(&self) -> u32 {
        self.goal
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// `max(persisted best, current score)`, for the host to persist.
    #[must_use]
    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.won
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Either terminal flag is set.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.won || self.game_over
    }

    /// Account for a completed merge producing `value`.
    ///
    /// Adds `value` to the score, raises the best-score candidate and sets
    /// the won flag when `value` reaches the goal. Returns true if this
    /// merge is the one that won the game.
    pub fn record_merge(&mut self, value: u32) -> bool {
        self.score += u64::from(value);
        self.best_score = self.best_score.max(self.score);

        if value >= self.goal && !self.won {
            self.won = true;
            log::info!("goal {} reached, score {}", self.goal, self.score);
            return true;
        }
        false
    }

    /// Raise the game-over flag if `grid` has no move left.
    ///
    /// Returns the new flag value.
    pub fn check_moves(&mut self, grid: &Grid) -> bool {
        if !self.game_over && !can_move(grid) {
            self.game_over = true;
            log::info!("no moves left, final score {}", self.score);
        }
        self.game_over
    }
}
