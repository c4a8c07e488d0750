//! Tile grid storage.
//!
//! The `Grid` is the single source of truth for occupancy. It stores an
//! N x N row-major array of optional cell ids plus an id-keyed arena of the
//! cells themselves, so a clone is a fully independent snapshot.
//!
//! Reads never fail: coordinates outside the board yield the
//! [`OUT_OF_RANGE`] sentinel, which can never equal a real tile value and is
//! therefore safe to feed into adjacency comparisons.

mod board;

pub use board::{Grid, Line, EMPTY, OUT_OF_RANGE};
