//! N x N board with an id-keyed cell arena.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Axis, Cell, CellId, Slot};

/// Value read from a slot outside the board.
pub const OUT_OF_RANGE: i64 = -1;

/// Value read from an empty slot.
pub const EMPTY: i64 = 0;

/// One row or column of slots in ascending coordinate order.
/// SmallVec keeps boards up to 8x8 off the heap.
pub type Line = SmallVec<[Option<CellId>; 8]>;

/// Tile grid.
///
/// ## Usage
///
/// ```
/// use rust_2048::core::{Axis, Cell, CellId, Slot};
/// use rust_2048::grid::{Grid, OUT_OF_RANGE};
///
/// let mut grid = Grid::new(4);
/// grid.place(Cell::new(CellId(0), 2, Slot::new(1, 0)));
///
/// assert_eq!(grid.get(1, 0), 2);
/// assert_eq!(grid.get(0, 0), 0);
/// assert_eq!(grid.get(4, 0), OUT_OF_RANGE);
///
/// let row = grid.line_of(0, Axis::Row);
/// assert_eq!(row.as_slice(), &[None, Some(CellId(0)), None, None]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    slots: Vec<Option<CellId>>,
    cells: FxHashMap<CellId, Cell>,
}

impl Grid {
    /// Create an empty `size` x `size` grid.
    #[must_use]
    pub fn new(size: usize) -> Self {
        assert!(size >= 2, "Board must be at least 2x2");

        Self {
            size,
            slots: vec![None; size * size],
            cells: FxHashMap::default(),
        }
    }

    /// Board edge length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major index of `slot`, `None` off the board.
    fn index(&self, slot: Slot) -> Option<usize> {
        (slot.x < self.size && slot.y < self.size).then(|| slot.y * self.size + slot.x)
    }

    /// Check whether signed coordinates fall on the board.
    #[must_use]
    pub fn contains(&self, x: isize, y: isize) -> bool {
        let n = self.size as isize;
        (0..n).contains(&x) && (0..n).contains(&y)
    }

    // === Reads ===

    /// Tile value at `(x, y)`: the value, [`EMPTY`] or [`OUT_OF_RANGE`].
    #[must_use]
    pub fn get(&self, x: isize, y: isize) -> i64 {
        if !self.contains(x, y) {
            return OUT_OF_RANGE;
        }
        self.cell_at(Slot::new(x as usize, y as usize))
            .map_or(EMPTY, |cell| i64::from(cell.value))
    }

    /// Id of the cell occupying `slot`; `None` for empty or off-board slots.
    #[must_use]
    pub fn id_at(&self, slot: Slot) -> Option<CellId> {
        self.index(slot).and_then(|idx| self.slots[idx])
    }

    /// Cell occupying `slot`.
    #[must_use]
    pub fn cell_at(&self, slot: Slot) -> Option<&Cell> {
        self.id_at(slot).and_then(|id| self.cells.get(&id))
    }

    /// Look up a cell by id.
    #[must_use]
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(&id)
    }

    /// Mutable lookup by id. Moving a cell must go through `relocate`.
    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.cells.get_mut(&id)
    }

    /// Slot at `pos` along line `index` of `axis`.
    #[must_use]
    pub fn line_slot(&self, index: usize, axis: Axis, pos: usize) -> Slot {
        match axis {
            Axis::Row => Slot::new(pos, index),
            Axis::Column => Slot::new(index, pos),
        }
    }

    /// Slots of row `y` or column `x`, ascending coordinate order.
    #[must_use]
    pub fn line_of(&self, index: usize, axis: Axis) -> Line {
        (0..self.size)
            .map(|pos| self.id_at(self.line_slot(index, axis, pos)))
            .collect()
    }

    /// Empty slots in row-major order (row 0 first).
    #[must_use]
    pub fn empty_slots(&self) -> Vec<Slot> {
        let mut empty = Vec::new();
        for y in 0..self.size {
            for x in 0..self.size {
                let slot = Slot::new(x, y);
                if self.id_at(slot).is_none() {
                    empty.push(slot);
                }
            }
        }
        empty
    }

    /// Iterate over every cell on the board (arbitrary order).
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.values()
    }

    /// Iterate over every cell mutably (arbitrary order).
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.values_mut()
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// No tiles at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every slot occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.len() == self.slots.len()
    }

    /// Sum of all tile values.
    #[must_use]
    pub fn total_value(&self) -> u64 {
        self.cells.values().map(|c| u64::from(c.value)).sum()
    }

    /// Largest tile value, 0 on an empty board.
    #[must_use]
    pub fn max_value(&self) -> u32 {
        self.cells.values().map(|c| c.value).max().unwrap_or(0)
    }

    /// Value matrix indexed `[y][x]`, 0 for empty slots.
    #[must_use]
    pub fn values(&self) -> Vec<Vec<u32>> {
        (0..self.size)
            .map(|y| {
                (0..self.size)
                    .map(|x| self.cell_at(Slot::new(x, y)).map_or(0, |c| c.value))
                    .collect()
            })
            .collect()
    }

    /// Fully independent copy for the history stack.
    #[must_use]
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    // === Mutation ===

    /// Put a cell into its `slot`.
    ///
    /// Returns the cell that did not end up on the board: the previous
    /// occupant of `slot`, or `cell` itself when `slot` is off the board. A
    /// cell whose id is already on the grid is moved, not duplicated.
    pub fn place(&mut self, cell: Cell) -> Option<Cell> {
        let Some(idx) = self.index(cell.slot) else {
            return Some(cell);
        };

        let previous = self.cells.get(&cell.id).and_then(|c| self.index(c.slot));
        if let Some(prev_idx) = previous {
            self.slots[prev_idx] = None;
        }

        let displaced = self.slots[idx].and_then(|old| self.cells.remove(&old));
        self.slots[idx] = Some(cell.id);
        self.cells.insert(cell.id, cell);
        displaced
    }

    /// Remove and return the cell at `slot`.
    pub fn take(&mut self, slot: Slot) -> Option<Cell> {
        let idx = self.index(slot)?;
        let id = self.slots[idx].take()?;
        self.cells.remove(&id)
    }

    /// Point a cell at a new, empty slot.
    ///
    /// The grid updates immediately; the drawn position is left behind for
    /// the animator to catch up. Returns false if the cell is unknown or the
    /// destination is occupied.
    pub fn relocate(&mut self, id: CellId, to: Slot) -> bool {
        let Some(to_idx) = self.index(to) else {
            return false;
        };
        if self.slots[to_idx].is_some() {
            return false;
        }
        let Some(from_idx) = self.cells.get(&id).and_then(|c| self.index(c.slot)) else {
            return false;
        };

        if let Some(cell) = self.cells.get_mut(&id) {
            cell.slot = to;
        }
        self.slots[from_idx] = None;
        self.slots[to_idx] = Some(id);
        true
    }
}
