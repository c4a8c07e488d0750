//! Merges waiting on animation.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{Cell, CellId};

/// Cells lifted off the grid by a merge, keyed by the id of the cell that
/// took their slot.
///
/// An entry exists from the merge pass until the arriving cell comes to rest
/// on the slot; at that point the sequencer takes the absorbed cell out and
/// folds its value in. A cell that appears here on either side cannot take
/// part in another merge or slide.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PendingMerges {
    by_arriving: FxHashMap<CellId, Cell>,
}

impl PendingMerges {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `arriving` will absorb `absorbed`.
    ///
    /// Hands `absorbed` back, leaving the store unchanged, if either cell is
    /// already part of a pending merge.
    pub fn insert(&mut self, arriving: CellId, absorbed: Cell) -> Result<(), Cell> {
        if self.involves(arriving) || self.involves(absorbed.id) {
            return Err(absorbed);
        }
        self.by_arriving.insert(arriving, absorbed);
        Ok(())
    }

    /// Whether `id` is on either side of a pending merge.
    #[must_use]
    pub fn involves(&self, id: CellId) -> bool {
        self.by_arriving.contains_key(&id) || self.by_arriving.values().any(|c| c.id == id)
    }

    /// Whether `id` is waiting to absorb another cell.
    #[must_use]
    pub fn is_arriving(&self, id: CellId) -> bool {
        self.by_arriving.contains_key(&id)
    }

    /// Remove and return the cell `arriving` absorbs.
    pub fn take(&mut self, arriving: CellId) -> Option<Cell> {
        self.by_arriving.remove(&arriving)
    }

    /// Cells currently being absorbed (drawn underneath the arriving cells).
    pub fn absorbed(&self) -> impl Iterator<Item = &Cell> {
        self.by_arriving.values()
    }

    /// Sum of the absorbed cells' values.
    #[must_use]
    pub fn total_value(&self) -> u64 {
        self.by_arriving.values().map(|c| u64::from(c.value)).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_arriving.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_arriving.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_arriving.clear();
    }
}
