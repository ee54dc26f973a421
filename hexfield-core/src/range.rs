//! Range bands and attack-targeting queries

use crate::cell::{CellId, Terrain};
use crate::grid::Grid;
use crate::sight::is_visible;

/// All cells whose hex distance from `source` lies in `[min, max]`,
/// inclusive, in id order.
///
/// Distance is a closed-form cube-coordinate function, so this is a
/// direct scan, no search. Degenerate bands (min > max, negative max)
/// and unknown sources yield an empty set.
pub fn cells_in_range(grid: &Grid, source: CellId, min: i32, max: i32) -> Vec<CellId> {
    let Some(src) = grid.cell(source) else {
        return Vec::new();
    };
    if min > max || max < 0 {
        return Vec::new();
    }

    grid.cells()
        .filter(|cell| {
            let distance = src.cube().distance(cell.cube());
            distance >= min && distance <= max
        })
        .map(|cell| cell.id())
        .collect()
}

/// Cells that can be attacked from `source`: inside the range band, not
/// impassable terrain, and with a clear line of sight.
///
/// Impassable cells can never hold an entity, so they are never worth
/// targeting.
pub fn attackable_cells(grid: &Grid, source: CellId, min: i32, max: i32) -> Vec<CellId> {
    cells_in_range(grid, source, min, max)
        .into_iter()
        .filter(|&id| {
            grid.cell(id)
                .map_or(false, |cell| cell.terrain() != Terrain::Impassable)
                && is_visible(grid, source, id)
        })
        .collect()
}
