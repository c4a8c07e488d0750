//! Slide and merge passes over every line of the board.

use smallvec::SmallVec;

use crate::core::{CellId, Direction};
use crate::grid::{Grid, Line, EMPTY, OUT_OF_RANGE};

use super::PendingMerges;

/// Which pass to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    Slide,
    Merge,
}

/// What a pass changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PassResult {
    /// Cells given a new slot; they now need animating.
    pub moved: SmallVec<[CellId; 16]>,

    /// Merges started by this pass.
    pub merges: usize,
}

impl PassResult {
    /// Whether any line changed.
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.moved.is_empty()
    }
}

/// Stateless per-line resolver.
///
/// Lines are walked from the leading edge (the edge the move pushes
/// towards) back to the trailing edge, so a cell always sees the final
/// position of the cells ahead of it.
///
/// ```
/// use rust_2048::core::{Cell, CellId, Direction, Slot};
/// use rust_2048::grid::Grid;
/// use rust_2048::moves::{MoveEngine, PendingMerges};
///
/// let mut grid = Grid::new(4);
/// grid.place(Cell::new(CellId(0), 2, Slot::new(3, 0)));
/// let mut pending = PendingMerges::new();
///
/// let result = MoveEngine::slide(&mut grid, &pending, Direction::Left);
/// assert!(result.changed());
/// assert_eq!(grid.get(0, 0), 2);
///
/// let result = MoveEngine::merge(&mut grid, &mut pending, Direction::Left);
/// assert!(!result.changed());
/// ```
pub struct MoveEngine;

impl MoveEngine {
    /// Run one pass of the given kind.
    pub fn run(grid: &mut Grid, pending: &mut PendingMerges, direction: Direction, pass: Pass) -> PassResult {
        match pass {
            Pass::Slide => Self::slide(grid, pending, direction),
            Pass::Merge => Self::merge(grid, pending, direction),
        }
    }

    /// Slide every cell across the empty run ahead of it.
    pub fn slide(grid: &mut Grid, pending: &PendingMerges, direction: Direction) -> PassResult {
        let mut result = PassResult::default();

        for index in 0..grid.size() {
            let mut line = grid.line_of(index, direction.axis());

            for pos in Self::traversal(grid.size(), direction) {
                let Some(id) = line[pos] else { continue };
                if pending.involves(id) {
                    continue;
                }

                let space = Self::space(&line, pos, direction.step());
                if space == 0 {
                    continue;
                }

                let target = Self::offset(pos, space as isize * direction.step());
                let dest = grid.line_slot(index, direction.axis(), target);
                if grid.relocate(id, dest) {
                    line[target] = Some(id);
                    line[pos] = None;
                    result.moved.push(id);
                }
            }
        }

        if result.changed() {
            log::trace!("slide {:?}: {} cells moved", direction, result.moved.len());
        }
        result
    }

    /// Start merges between adjacent equal cells.
    ///
    /// The arriving cell takes the stationary cell's slot at once; the
    /// stationary cell leaves the grid for `pending` until the arrival
    /// animation completes. Values are not combined here.
    pub fn merge(grid: &mut Grid, pending: &mut PendingMerges, direction: Direction) -> PassResult {
        let mut result = PassResult::default();
        let step = direction.step();

        for index in 0..grid.size() {
            let mut line = grid.line_of(index, direction.axis());

            for pos in Self::traversal(grid.size(), direction) {
                let Some(id) = line[pos] else { continue };
                if pending.involves(id) || !Self::can_merge(grid, &line, pos, step) {
                    continue;
                }

                let target = Self::offset(pos, step);
                let Some(stationary) = line[target] else { continue };
                if pending.involves(stationary) {
                    continue;
                }

                let origin = grid.line_slot(index, direction.axis(), pos);
                let dest = grid.line_slot(index, direction.axis(), target);
                let Some(absorbed) = grid.take(dest) else { continue };
                if !grid.relocate(id, dest) {
                    grid.place(absorbed);
                    continue;
                }
                if let Err(absorbed) = pending.insert(id, absorbed) {
                    grid.relocate(id, origin);
                    grid.place(absorbed);
                    continue;
                }

                line[target] = Some(id);
                line[pos] = None;
                result.moved.push(id);
                result.merges += 1;
            }
        }

        if result.changed() {
            log::trace!("merge {:?}: {} merges started", direction, result.merges);
        }
        result
    }

    /// Count the contiguous empty slots between `pos` and the leading edge.
    #[must_use]
    pub fn space(line: &Line, pos: usize, step: isize) -> usize {
        let next = pos as isize + step;
        if next < 0 || next >= line.len() as isize {
            return 0;
        }
        if line[next as usize].is_some() {
            return 0;
        }
        1 + Self::space(line, next as usize, step)
    }

    /// Whether the cell at `pos` can merge with its neighbour ahead.
    #[must_use]
    pub fn can_merge(grid: &Grid, line: &Line, pos: usize, step: isize) -> bool {
        let own = Self::line_value(grid, line, pos as isize);
        let ahead = Self::line_value(grid, line, pos as isize + step);
        own > EMPTY && own == ahead
    }

    /// Value at a signed position along `line`, with the grid's sentinels.
    fn line_value(grid: &Grid, line: &Line, pos: isize) -> i64 {
        if pos < 0 || pos >= line.len() as isize {
            return OUT_OF_RANGE;
        }
        line[pos as usize]
            .and_then(|id| grid.cell(id))
            .map_or(EMPTY, |cell| i64::from(cell.value))
    }

    /// Positions from the leading edge to the trailing edge.
    fn traversal(size: usize, direction: Direction) -> impl Iterator<Item = usize> {
        let leading_low = direction.step() < 0;
        (0..size).map(move |i| if leading_low { i } else { size - 1 - i })
    }

    fn offset(pos: usize, delta: isize) -> usize {
        (pos as isize + delta) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Axis, Cell, CellIdAllocator, Slot};

    /// Build a 4x4 grid with row 0 set to `row` (0 = empty).
    fn row_grid(row: [u32; 4]) -> Grid {
        let mut grid = Grid::new(4);
        let mut ids = CellIdAllocator::new();
        for (x, &v) in row.iter().enumerate() {
            if v > 0 {
                grid.place(Cell::new(ids.alloc(), v, Slot::new(x, 0)));
            }
        }
        grid
    }

    /// Fold pending merges in, as the sequencer does once animation ends.
    fn complete_merges(grid: &mut Grid, pending: &mut PendingMerges) {
        let arriving: Vec<CellId> = grid.cells().map(|c| c.id).filter(|id| pending.is_arriving(*id)).collect();
        for id in arriving {
            let absorbed = pending.take(id).unwrap();
            grid.cell_mut(id).unwrap().value += absorbed.value;
        }
    }

    fn row0(grid: &Grid) -> Vec<u32> {
        grid.values()[0].clone()
    }

    #[test]
    fn test_space_counts_run_to_edge() {
        let grid = row_grid([0, 0, 2, 0]);
        let line = grid.line_of(0, Axis::Row);

        assert_eq!(MoveEngine::space(&line, 2, -1), 2);
        assert_eq!(MoveEngine::space(&line, 2, 1), 1);
        assert_eq!(MoveEngine::space(&line, 0, -1), 0);
    }

    #[test]
    fn test_space_stops_at_obstacle() {
        let grid = row_grid([4, 0, 0, 2]);
        let line = grid.line_of(0, Axis::Row);
        assert_eq!(MoveEngine::space(&line, 3, -1), 2);
    }

    #[test]
    fn test_slide_left_and_right() {
        let mut grid = row_grid([0, 2, 0, 4]);
        let pending = PendingMerges::new();

        let result = MoveEngine::slide(&mut grid, &pending, Direction::Left);
        assert_eq!(result.moved.len(), 2);
        assert_eq!(row0(&grid), vec![2, 4, 0, 0]);

        let result = MoveEngine::slide(&mut grid, &pending, Direction::Right);
        assert!(result.changed());
        assert_eq!(row0(&grid), vec![0, 0, 2, 4]);
    }

    #[test]
    fn test_slide_up_moves_towards_high_y() {
        let mut grid = row_grid([8, 0, 0, 0]);
        let pending = PendingMerges::new();

        MoveEngine::slide(&mut grid, &pending, Direction::Up);

        assert_eq!(grid.get(0, 0), 0);
        assert_eq!(grid.get(0, 3), 8);
    }

    #[test]
    fn test_slide_keeps_drawn_position() {
        let mut grid = row_grid([0, 0, 0, 2]);
        let pending = PendingMerges::new();

        MoveEngine::slide(&mut grid, &pending, Direction::Left);

        let cell = grid.cell(CellId(0)).unwrap();
        assert_eq!(cell.slot, Slot::new(0, 0));
        assert_eq!(cell.x, 3.0);
    }

    #[test]
    fn test_slide_without_space_is_unchanged() {
        let mut grid = row_grid([2, 4, 8, 0]);
        let pending = PendingMerges::new();

        let result = MoveEngine::slide(&mut grid, &pending, Direction::Left);
        assert!(!result.changed());
    }

    #[test]
    fn test_merge_does_not_combine_values() {
        let mut grid = row_grid([2, 2, 0, 0]);
        let mut pending = PendingMerges::new();

        let result = MoveEngine::merge(&mut grid, &mut pending, Direction::Left);

        assert_eq!(result.merges, 1);
        assert_eq!(row0(&grid), vec![2, 0, 0, 0]);
        assert_eq!(grid.id_at(Slot::new(0, 0)), Some(CellId(1)));
        assert!(pending.is_arriving(CellId(1)));
        assert_eq!(grid.total_value() + pending.total_value(), 4);
    }

    #[test]
    fn test_merge_rejects_unequal_neighbours() {
        let mut grid = row_grid([2, 4, 2, 4]);
        let mut pending = PendingMerges::new();

        let result = MoveEngine::merge(&mut grid, &mut pending, Direction::Left);
        assert!(!result.changed());
        assert!(pending.is_empty());
    }

    #[test]
    fn test_four_equal_tiles_take_several_phases() {
        let mut grid = row_grid([2, 2, 2, 2]);
        let mut pending = PendingMerges::new();

        // Phase 1: no space, so merge pairs from the leading edge.
        assert!(!MoveEngine::slide(&mut grid, &pending, Direction::Left).changed());
        let result = MoveEngine::merge(&mut grid, &mut pending, Direction::Left);
        assert_eq!(result.merges, 2);
        complete_merges(&mut grid, &mut pending);
        assert_eq!(row0(&grid), vec![4, 0, 4, 0]);

        // Phase 2: slide into the vacated slot.
        assert!(MoveEngine::slide(&mut grid, &pending, Direction::Left).changed());
        assert_eq!(row0(&grid), vec![4, 4, 0, 0]);

        // Phase 3: merge the two fours.
        assert!(!MoveEngine::slide(&mut grid, &pending, Direction::Left).changed());
        assert_eq!(MoveEngine::merge(&mut grid, &mut pending, Direction::Left).merges, 1);
        complete_merges(&mut grid, &mut pending);
        assert_eq!(row0(&grid), vec![8, 0, 0, 0]);
    }

    #[test]
    fn test_three_equal_tiles_merge_only_one_pair_per_phase() {
        let mut grid = row_grid([0, 2, 2, 2]);
        let mut pending = PendingMerges::new();

        MoveEngine::slide(&mut grid, &pending, Direction::Right);
        let result = MoveEngine::merge(&mut grid, &mut pending, Direction::Right);

        assert_eq!(result.merges, 1);
        assert_eq!(pending.len(), 1);
        complete_merges(&mut grid, &mut pending);
        assert_eq!(row0(&grid), vec![0, 2, 0, 4]);
    }

    #[test]
    fn test_pending_cells_are_skipped() {
        let mut grid = row_grid([2, 2, 0, 0]);
        let mut pending = PendingMerges::new();
        MoveEngine::merge(&mut grid, &mut pending, Direction::Left);

        // A fresh equal tile lands next to the arriving cell before it rests.
        grid.place(Cell::new(CellId(10), 2, Slot::new(1, 0)));
        let result = MoveEngine::merge(&mut grid, &mut pending, Direction::Left);

        assert!(!result.changed());
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_columns_resolve_independently() {
        let mut grid = Grid::new(3);
        grid.place(Cell::new(CellId(0), 2, Slot::new(0, 2)));
        grid.place(Cell::new(CellId(1), 2, Slot::new(2, 1)));
        let pending = PendingMerges::new();

        let result = MoveEngine::run(&mut grid, &mut pending.clone(), Direction::Down, Pass::Slide);

        assert_eq!(result.moved.len(), 2);
        assert_eq!(grid.get(0, 0), 2);
        assert_eq!(grid.get(2, 0), 2);
    }
}
