//! Mutable session state shared by the sequencer's phases.
//!
//! ## GameState
//!
//! Everything a move touches:
//! - Grid (occupancy source of truth) and the merges waiting on animation
//! - Cells currently animating
//! - Undo history and the move log
//! - Score and terminal flags
//! - RNG and the cell id allocator, neither of which undo rewinds

use im::Vector;

use super::action::MoveSymbol;
use super::entity::{CellId, CellIdAllocator};
use super::rng::GameRng;
use crate::grid::Grid;
use crate::history::HistoryStack;
use crate::moves::PendingMerges;
use crate::rules::GameStatus;

/// Full session state.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Tile grid.
    pub grid: Grid,

    /// Cells lifted off the grid, waiting to be absorbed.
    pub pending: PendingMerges,

    /// Grid snapshots for undo.
    pub history: HistoryStack,

    /// Score and terminal flags.
    pub status: GameStatus,

    /// Deterministic spawn RNG.
    pub rng: GameRng,

    /// Id source for spawned cells.
    pub ids: CellIdAllocator,

    /// Cells that have not reached rest yet, in the order they started.
    animating: Vec<CellId>,

    /// Symbols of every accepted command.
    move_log: Vector<MoveSymbol>,
}

impl GameState {
    /// Create an empty state.
    #[must_use]
    pub fn new(size: usize, goal: u32, best_score: u64, seed: u64) -> Self {
        Self::with_grid(Grid::new(size), goal, best_score, seed)
    }

    /// Create a state around an existing grid.
    ///
    /// The id allocator starts past the largest id already on the grid.
    #[must_use]
    pub fn with_grid(grid: Grid, goal: u32, best_score: u64, seed: u64) -> Self {
        let mut state = Self {
            grid,
            pending: PendingMerges::new(),
            history: HistoryStack::new(),
            status: GameStatus::new(goal, best_score),
            rng: GameRng::new(seed),
            ids: CellIdAllocator::new(),
            animating: Vec::new(),
            move_log: Vector::new(),
        };
        state.sync_ids();
        state
    }

    /// Move the id allocator past every id on the grid or in a pending merge.
    ///
    /// Cells may be placed on `grid` directly; the sequencer calls this
    /// before it creates new cells.
    pub fn sync_ids(&mut self) {
        let on_board = self.grid.cells().map(|c| c.id);
        let pending = self.pending.absorbed().map(|c| c.id);
        let max = on_board.chain(pending).max();

        if let Some(max) = max {
            self.ids.reserve_through(max);
        }
    }

    // === Animation Bookkeeping ===

    /// Any cell still animating.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.animating.is_empty()
    }

    /// Cells still animating.
    #[must_use]
    pub fn animating(&self) -> &[CellId] {
        &self.animating
    }

    /// Start animating `ids`; already-animating cells are not duplicated.
    pub fn mark_animating(&mut self, ids: &[CellId]) {
        for &id in ids {
            if !self.animating.contains(&id) {
                self.animating.push(id);
            }
        }
    }

    /// Stop animating `ids`.
    pub fn finish_animating(&mut self, ids: &[CellId]) {
        self.animating.retain(|id| !ids.contains(id));
    }

    // === Move Log ===

    /// Append a symbol to the move log.
    pub fn record_move(&mut self, symbol: MoveSymbol) {
        self.move_log.push_back(symbol);
    }

    /// Every accepted command, oldest first.
    #[must_use]
    pub fn move_log(&self) -> &Vector<MoveSymbol> {
        &self.move_log
    }

    // === Undo ===

    /// Replace the grid wholesale with an undo snapshot.
    ///
    /// Score, RNG, ids and the move log are left alone.
    pub fn restore(&mut self, grid: Grid) {
        self.grid = grid;
        self.pending.clear();
        self.animating.clear();
    }
}
