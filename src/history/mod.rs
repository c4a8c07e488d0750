//! Undo history.
//!
//! One full grid snapshot is pushed before every accepted move; undo pops
//! the newest one and the session swaps it in wholesale. Snapshots are kept
//! in an `im::Vector` so cloning a session does not copy the whole history.

use im::Vector;

use crate::grid::Grid;

/// Stack of grid snapshots, newest last.
#[derive(Clone, Debug, Default)]
pub struct HistoryStack {
    snapshots: Vector<Grid>,
}

impl HistoryStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a deep copy of `grid`.
    pub fn push(&mut self, grid: &Grid) {
        self.snapshots.push_back(grid.deep_copy());
    }

    /// Pop the newest snapshot, `None` when empty.
    pub fn pop(&mut self) -> Option<Grid> {
        self.snapshots.pop_back()
    }

    /// Newest snapshot without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Grid> {
        self.snapshots.back()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, CellId, Slot};

    #[test]
    fn test_push_pop_order() {
        let mut history = HistoryStack::new();
        let mut grid = Grid::new(3);

        history.push(&grid);
        grid.place(Cell::new(CellId(0), 2, Slot::new(0, 0)));
        history.push(&grid);

        assert_eq!(history.len(), 2);
        assert_eq!(history.peek().unwrap().get(0, 0), 2);

        let newest = history.pop().unwrap();
        assert_eq!(newest.get(0, 0), 2);
        let oldest = history.pop().unwrap();
        assert!(oldest.is_empty());

        assert!(history.pop().is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn test_snapshot_unaffected_by_later_mutation() {
        let mut history = HistoryStack::new();
        let mut grid = Grid::new(3);
        grid.place(Cell::new(CellId(0), 2, Slot::new(2, 2)));

        history.push(&grid);
        grid.cell_mut(CellId(0)).unwrap().value = 64;
        grid.relocate(CellId(0), Slot::new(0, 0));

        let snapshot = history.pop().unwrap();
        assert_eq!(snapshot.get(2, 2), 2);
        assert_eq!(snapshot.get(0, 0), 0);
    }
}
