//! Per-cell tweening.

use serde::{Deserialize, Serialize};

use crate::core::{AnimationConfig, Cell};

/// How far to advance animations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Tick {
    /// Seconds of wall-clock time since the previous tick.
    Elapsed(f32),
    /// Settle everything now and run the sequencer to idle.
    Instant,
}

/// Move `current` towards `target` by at most `max_delta`, landing exactly
/// on `target` when within reach.
#[must_use]
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + delta.signum() * max_delta
    }
}

/// Advance one cell by `dt` seconds. Returns true once it is at rest.
///
/// A negative or non-finite `dt` leaves the cell untouched.
pub fn step_cell(cell: &mut Cell, config: &AnimationConfig, dt: f32) -> bool {
    if !dt.is_finite() || dt < 0.0 {
        return cell.is_at_rest();
    }

    let tx = cell.slot.x as f32;
    let ty = cell.slot.y as f32;

    cell.scale = move_towards(cell.scale, 1.0, config.scale_speed * dt);
    cell.x = move_towards(cell.x, tx, config.move_speed * dt);
    cell.y = move_towards(cell.y, ty, config.move_speed * dt);

    if (cell.x - tx).abs() < config.snap_epsilon {
        cell.x = tx;
    }
    if (cell.y - ty).abs() < config.snap_epsilon {
        cell.y = ty;
    }

    cell.is_at_rest()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CellId, Slot};

    #[test]
    fn test_move_towards() {
        assert_eq!(move_towards(0.0, 1.0, 0.25), 0.25);
        assert_eq!(move_towards(3.0, 0.0, 1.0), 2.0);
        assert_eq!(move_towards(0.9, 1.0, 0.5), 1.0);
        assert_eq!(move_towards(1.2, 1.0, 0.5), 1.0);
    }

    #[test]
    fn test_step_cell_slides_then_rests() {
        let config = AnimationConfig::default();
        let mut cell = Cell::new(CellId(0), 2, Slot::new(3, 0));
        cell.slot = Slot::new(0, 0);

        // 50 slots/s: 0.02 s covers one slot.
        assert!(!step_cell(&mut cell, &config, 0.02));
        assert!((cell.x - 2.0).abs() < 1e-4);

        assert!(!step_cell(&mut cell, &config, 0.02));
        assert!(step_cell(&mut cell, &config, 0.05));
        assert_eq!(cell.x, 0.0);
    }

    #[test]
    fn test_step_cell_ignores_invalid_dt() {
        let config = AnimationConfig::default();
        let mut cell = Cell::new(CellId(0), 2, Slot::new(3, 0)).with_scale(0.1);
        cell.slot = Slot::new(0, 0);

        for dt in [f32::NAN, -1.0, f32::INFINITY, f32::NEG_INFINITY] {
            assert!(!step_cell(&mut cell, &config, dt));
            assert_eq!(cell.x, 3.0);
            assert_eq!(cell.scale, 0.1);
        }

        assert!(step_cell(&mut cell, &config, 1.0));
    }

    #[test]
    fn test_step_cell_snaps_within_epsilon() {
        let config = AnimationConfig::default();
        let mut cell = Cell::new(CellId(0), 2, Slot::new(0, 0));
        cell.x = 0.05;

        assert!(step_cell(&mut cell, &config, 0.0));
        assert_eq!(cell.x, 0.0);
    }

    #[test]
    fn test_step_cell_grows_spawned_cell() {
        let config = AnimationConfig::default();
        let mut cell = Cell::new(CellId(0), 2, Slot::new(1, 1)).with_scale(0.1);

        // 25/s: 0.02 s adds 0.5.
        assert!(!step_cell(&mut cell, &config, 0.02));
        assert!((cell.scale - 0.6).abs() < 1e-4);
        assert!(step_cell(&mut cell, &config, 0.02));
        assert_eq!(cell.scale, 1.0);
    }
}
