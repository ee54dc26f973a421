//! Line-of-sight testing between cells
//!
//! Geometric approximation of ray-casting on the hex grid: sample points
//! along the world-space segment between the two cells and resolve each
//! sample to its nearest cell. Not an exact hex-line algorithm.

use crate::cell::{Cell, CellId};
use crate::coords::WorldPos;
use crate::grid::Grid;

/// Nearest-cell bias towards sight blockers.
///
/// While resolving a sample point, a sight-blocking cell within this
/// factor of the best distance found so far beats a strictly nearer clear
/// cell, so obstructions straddling a cell boundary still register.
/// Tuned behavior; changing the value changes which pairs can see each
/// other.
pub const BLOCKER_BIAS: f32 = 1.1;

/// Whether `target` can be seen from `source`.
///
/// A cell that itself blocks sight is never a visible target. Direct
/// neighbours always see each other: no intervening cell exists. Beyond
/// that, the segment between the two cell centers is sampled at fractions
/// of `1 / distance`, endpoints excluded, and every sample must resolve
/// to a non-blocking cell.
pub fn is_visible(grid: &Grid, source: CellId, target: CellId) -> bool {
    let (Some(src), Some(tgt)) = (grid.cell(source), grid.cell(target)) else {
        return false;
    };

    if tgt.blocks_sight() {
        return false;
    }

    let distance = src.cube().distance(tgt.cube());
    if distance <= 1 {
        return true;
    }

    let fraction = 1.0 / distance as f32;
    let mut current = fraction;
    while current < 1.0 {
        let point = src.position().lerp(tgt.position(), current);
        if let Some(nearest) = nearest_cell(grid, point) {
            if nearest.blocks_sight() {
                return false;
            }
        }
        current += fraction;
    }

    true
}

/// Nearest cell to a world-space point, blocker bias applied.
///
/// A blocker may win with a distance up to [`BLOCKER_BIAS`] times the
/// current best, in which case the recorded best distance grows to the
/// blocker's; this mirrors the pass order of the scan and is part of the
/// pinned behavior.
fn nearest_cell<'a>(grid: &'a Grid, point: WorldPos) -> Option<&'a Cell> {
    let mut nearest: Option<&Cell> = None;
    let mut nearest_distance = f32::INFINITY;

    for cell in grid.cells() {
        let distance = point.distance(cell.position());

        let wins = if cell.blocks_sight() {
            distance < nearest_distance * BLOCKER_BIAS
        } else {
            distance < nearest_distance
        };
        if wins {
            nearest = Some(cell);
            nearest_distance = distance;
        }
    }

    nearest
}
