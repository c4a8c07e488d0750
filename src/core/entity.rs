//! Cell identification.
//!
//! Every tile on the board has a stable `CellId`. A cell keeps its id while
//! it slides and while it absorbs other cells; the id disappears only when
//! the cell itself is absorbed by a merge.
//!
//! Pending merges, animation bookkeeping and the draw list all refer to
//! cells by id rather than by reference, so ids must never be reused within
//! a session.
//!
//! ## Usage
//!
//! ```
//! use rust_2048::core::{CellId, CellIdAllocator};
//!
//! let mut ids = CellIdAllocator::new();
//! let a = ids.alloc();
//! let b = ids.alloc();
//!
//! assert_ne!(a, b);
//! assert_eq!(ids.allocated(), 2);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a cell within one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId(pub u32);

impl CellId {
    /// Create a cell ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CellId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell({})", self.0)
    }
}

/// Monotonic id source owned by the session.
///
/// Lives outside the grid so that undo, which swaps the grid wholesale,
/// never rewinds it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CellIdAllocator {
    next: u32,
}

impl CellIdAllocator {
    /// Create an allocator starting at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh id.
    pub fn alloc(&mut self) -> CellId {
        let id = CellId(self.next);
        self.next += 1;
        id
    }

    /// Make sure `id` is never handed out.
    pub fn reserve_through(&mut self, id: CellId) {
        self.next = self.next.max(id.raw() + 1);
    }

    /// Next id to be handed out (ids handed out so far when starting at 0).
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_is_monotonic() {
        let mut ids = CellIdAllocator::new();

        let e1 = ids.alloc();
        let e2 = ids.alloc();
        let e3 = ids.alloc();

        assert_eq!(e1, CellId(0));
        assert_eq!(e2, CellId(1));
        assert_eq!(e3, CellId(2));
        assert_eq!(ids.allocated(), 3);
    }

    #[test]
    fn test_reserve_through_skips_taken_ids() {
        let mut ids = CellIdAllocator::new();
        ids.reserve_through(CellId(4));
        assert_eq!(ids.alloc(), CellId(5));

        // Never moves backwards.
        ids.reserve_through(CellId(2));
        assert_eq!(ids.alloc(), CellId(6));
    }

    #[test]
    fn test_raw_and_from() {
        let id = CellId::from(7);
        assert_eq!(id.raw(), 7);
        assert_eq!(id, CellId::new(7));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CellId(42)), "Cell(42)");
    }

    #[test]
    fn test_serialization() {
        let id = CellId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: CellId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
