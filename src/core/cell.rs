//! Tile cells.
//!
//! A `Cell` carries two positions:
//! - `slot`: the discrete slot it logically occupies (or is heading to)
//! - `x`, `y`: the continuous position drawn by the host, which trails the
//!   slot while the cell slides
//!
//! The grid indexes cells by `slot`, never by the drawn position.

use serde::{Deserialize, Serialize};

use super::entity::CellId;

/// Discrete board coordinate. `x` is the column, `y` the row (0 = bottom).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub x: usize,
    pub y: usize,
}

impl Slot {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A numbered tile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    /// Stable identity.
    pub id: CellId,

    /// Tile value, always a power of two >= 2.
    pub value: u32,

    /// Drawn column position.
    pub x: f32,

    /// Drawn row position.
    pub y: f32,

    /// Logical slot (the destination while sliding).
    pub slot: Slot,

    /// Draw scale; 1.0 at rest.
    pub scale: f32,
}

impl Cell {
    /// Create a cell resting at `slot`.
    #[must_use]
    pub fn new(id: CellId, value: u32, slot: Slot) -> Self {
        Self {
            id,
            value,
            x: slot.x as f32,
            y: slot.y as f32,
            slot,
            scale: 1.0,
        }
    }

    /// Set the draw scale.
    #[must_use]
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Drawn position equals the logical slot.
    #[must_use]
    pub fn is_at_target(&self) -> bool {
        self.x == self.slot.x as f32 && self.y == self.slot.y as f32
    }

    /// At its slot with no scale emphasis left.
    #[must_use]
    pub fn is_at_rest(&self) -> bool {
        self.scale == 1.0 && self.is_at_target()
    }

    /// Jump straight to the resting state.
    pub fn snap(&mut self) {
        self.x = self.slot.x as f32;
        self.y = self.slot.y as f32;
        self.scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cell_is_at_rest() {
        let cell = Cell::new(CellId(1), 2, Slot::new(3, 1));

        assert_eq!(cell.x, 3.0);
        assert_eq!(cell.y, 1.0);
        assert!(cell.is_at_rest());
    }

    #[test]
    fn test_retargeted_cell_is_not_at_rest() {
        let mut cell = Cell::new(CellId(1), 2, Slot::new(3, 1));
        cell.slot = Slot::new(0, 1);

        assert!(!cell.is_at_target());
        assert!(!cell.is_at_rest());

        cell.snap();
        assert!(cell.is_at_rest());
        assert_eq!(cell.x, 0.0);
    }

    #[test]
    fn test_spawn_scale_is_not_at_rest() {
        let cell = Cell::new(CellId(1), 4, Slot::new(0, 0)).with_scale(0.1);
        assert!(cell.is_at_target());
        assert!(!cell.is_at_rest());
    }

    #[test]
    fn test_slot_display() {
        assert_eq!(format!("{}", Slot::new(2, 3)), "(2, 3)");
    }
}
