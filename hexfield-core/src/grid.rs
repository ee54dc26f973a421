//! Grid graph: owns the cell table and the derived neighbour relation

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellId, CellSeed, EntityId, Terrain};
use crate::coords::{Cube, GridMetrics, Offset};

/// Errors from grid construction and mutation entry points.
///
/// Expected domain outcomes (no path, empty reachable set) are values on
/// the query side, never errors.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("grid has no cells")]
    EmptyGrid,
    #[error("unknown cell id: {0}")]
    UnknownCell(CellId),
    #[error("cells {first} and {second} resolve to offset ({column}, {row}); check generation spacing")]
    CoordinateCollision {
        first: CellId,
        second: CellId,
        column: i32,
        row: i32,
    },
}

/// What happened on a cell during a movement phase
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellEventKind {
    /// An entity moved into the cell
    Entered,
    /// An entity finished its turn on the cell
    TurnEnded,
}

/// One altering-entity trigger, reported back to the entity layer.
///
/// The grid never interprets these; callers apply the effects after the
/// query returns, which keeps queries side-effect free.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellEvent {
    /// Entity registered as altering the cell
    pub trigger: EntityId,
    /// Entity that entered or ended its turn there
    pub subject: EntityId,
    pub cell: CellId,
    pub kind: CellEventKind,
}

/// The grid graph. Owns every cell; all relations run through ids.
#[derive(Clone, Debug)]
pub struct Grid {
    /// Cell table, indexed by [`CellId`]
    cells: Vec<Cell>,
    /// Offset coordinate -> id lookup
    by_offset: FxHashMap<Offset, CellId>,
    metrics: GridMetrics,
}

impl Grid {
    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    /// Build a grid from generation-step seeds.
    ///
    /// The first seed becomes the coordinate origin. Coordinates are
    /// derived once for every cell, then the neighbour graph is built in
    /// a single batch.
    pub fn from_seeds(seeds: &[CellSeed], metrics: GridMetrics) -> Result<Self, GridError> {
        let origin = seeds.first().ok_or(GridError::EmptyGrid)?.position;

        let mut cells = Vec::with_capacity(seeds.len());
        let mut by_offset = FxHashMap::default();

        for (id, seed) in seeds.iter().enumerate() {
            let offset = Offset::derive(seed.position, origin, &metrics);
            let cube = Cube::from_offset(offset);

            if let Some(&first) = by_offset.get(&offset) {
                return Err(GridError::CoordinateCollision {
                    first,
                    second: id,
                    column: offset.column,
                    row: offset.row,
                });
            }
            by_offset.insert(offset, id);

            cells.push(Cell {
                id,
                position: seed.position,
                offset,
                cube,
                terrain: seed.terrain,
                blocks_sight: seed.blocks_sight,
                occupant: None,
                altering_entities: Vec::new(),
                neighbors: Vec::new(),
            });
        }

        let mut grid = Self {
            cells,
            by_offset,
            metrics,
        };
        grid.rebuild_neighbors();
        Ok(grid)
    }

    /// Rebuild the neighbour relation from offset-coordinate deltas.
    ///
    /// Full O(V^2) batch pass; run after construction and after any edit
    /// that moves cells. Queries never trigger it. Two cells are adjacent
    /// when their delta matches one of the six odd-q patterns, with the
    /// diagonal pair selected by the source cell's column parity.
    pub fn rebuild_neighbors(&mut self) {
        for id in 0..self.cells.len() {
            let at = self.cells[id].offset;
            let shifted = at.is_shifted();

            let mut neighbors = Vec::with_capacity(6);
            for (other_id, other) in self.cells.iter().enumerate() {
                if other_id == id {
                    continue;
                }
                let dc = other.offset.column - at.column;
                let dr = other.offset.row - at.row;
                let adjacent = match (dc, dr) {
                    // Same column, one row apart
                    (0, 1) | (0, -1) => true,
                    // Adjacent column, same row
                    (1, 0) | (-1, 0) => true,
                    // Adjacent column, previous row: unshifted columns only
                    (1, -1) | (-1, -1) => !shifted,
                    // Adjacent column, next row: shifted columns only
                    (1, 1) | (-1, 1) => shifted,
                    _ => false,
                };
                if adjacent {
                    neighbors.push(other_id);
                }
            }
            self.cells[id].neighbors = neighbors;
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Get a cell by id
    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id)
    }

    /// Iterate all cells in id order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Neighbour ids of a cell; empty for an unknown id
    pub fn neighbors(&self, id: CellId) -> &[CellId] {
        self.cells.get(id).map(|c| c.neighbors()).unwrap_or(&[])
    }

    /// Look up the cell sitting at an offset coordinate
    pub fn cell_at_offset(&self, offset: Offset) -> Option<CellId> {
        self.by_offset.get(&offset).copied()
    }

    /// Hex distance between two cells; `None` when either id is unknown
    pub fn distance(&self, a: CellId, b: CellId) -> Option<i32> {
        Some(self.cell(a)?.cube().distance(self.cell(b)?.cube()))
    }

    /// Cost to move into a cell. Unknown ids are uncrossable.
    pub fn entry_cost(&self, id: CellId) -> f32 {
        self.cells.get(id).map(Cell::entry_cost).unwrap_or(f32::INFINITY)
    }

    // ========================================================================
    // MUTATION SURFACE
    // ========================================================================
    //
    // The narrow write side of the graph. Callers serialize these against
    // in-flight queries: one logical turn owns the grid at a time.

    /// Mark a cell as occupied by an entity. An occupied cell cannot be
    /// entered until freed.
    pub fn occupy(&mut self, id: CellId, entity: EntityId) -> Result<(), GridError> {
        let cell = self.cells.get_mut(id).ok_or(GridError::UnknownCell(id))?;
        cell.occupant = Some(entity);
        Ok(())
    }

    /// Clear a cell's occupant
    pub fn free(&mut self, id: CellId) -> Result<(), GridError> {
        let cell = self.cells.get_mut(id).ok_or(GridError::UnknownCell(id))?;
        cell.occupant = None;
        Ok(())
    }

    /// Change a cell's terrain tier. Terrain edits don't move cells, so
    /// the neighbour graph stays valid.
    pub fn set_terrain(&mut self, id: CellId, terrain: Terrain) -> Result<(), GridError> {
        let cell = self.cells.get_mut(id).ok_or(GridError::UnknownCell(id))?;
        cell.terrain = terrain;
        Ok(())
    }

    /// Change a cell's sight-blocking flag
    pub fn set_blocks_sight(&mut self, id: CellId, blocks: bool) -> Result<(), GridError> {
        let cell = self.cells.get_mut(id).ok_or(GridError::UnknownCell(id))?;
        cell.blocks_sight = blocks;
        Ok(())
    }

    /// Register an entity as altering a cell
    pub fn add_altering_entity(&mut self, id: CellId, entity: EntityId) -> Result<(), GridError> {
        let cell = self.cells.get_mut(id).ok_or(GridError::UnknownCell(id))?;
        if !cell.altering_entities.contains(&entity) {
            cell.altering_entities.push(entity);
        }
        Ok(())
    }

    /// Remove an entity from a cell's altering list
    pub fn remove_altering_entity(
        &mut self,
        id: CellId,
        entity: EntityId,
    ) -> Result<(), GridError> {
        let cell = self.cells.get_mut(id).ok_or(GridError::UnknownCell(id))?;
        cell.altering_entities.retain(|&e| e != entity);
        Ok(())
    }

    // ========================================================================
    // MOVEMENT EVENTS
    // ========================================================================

    /// Report an entity entering a cell.
    ///
    /// Returns one event per altering entity registered on the cell, in
    /// registration order, for the entity layer to apply afterwards.
    pub fn enter_cell(&self, id: CellId, entity: EntityId) -> Result<Vec<CellEvent>, GridError> {
        self.cell_events(id, entity, CellEventKind::Entered)
    }

    /// Report an entity finishing its turn on a cell
    pub fn end_turn_on_cell(
        &self,
        id: CellId,
        entity: EntityId,
    ) -> Result<Vec<CellEvent>, GridError> {
        self.cell_events(id, entity, CellEventKind::TurnEnded)
    }

    fn cell_events(
        &self,
        id: CellId,
        subject: EntityId,
        kind: CellEventKind,
    ) -> Result<Vec<CellEvent>, GridError> {
        let cell = self.cells.get(id).ok_or(GridError::UnknownCell(id))?;
        Ok(cell
            .altering_entities
            .iter()
            .map(|&trigger| CellEvent {
                trigger,
                subject,
                cell: id,
                kind,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapFile;

    fn grid_3x3() -> Grid {
        MapFile::rectangle(3, 3, GridMetrics::default())
            .into_grid()
            .unwrap()
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = Grid::from_seeds(&[], GridMetrics::default()).unwrap_err();
        assert!(matches!(err, GridError::EmptyGrid));
    }

    #[test]
    fn test_colliding_seeds_are_rejected() {
        let seeds = vec![
            CellSeed::open(crate::coords::WorldPos::new(0.0, 0.0)),
            CellSeed::open(crate::coords::WorldPos::new(0.01, 0.0)),
        ];
        let err = Grid::from_seeds(&seeds, GridMetrics::default()).unwrap_err();
        assert!(matches!(err, GridError::CoordinateCollision { .. }));
    }

    #[test]
    fn test_neighbor_relation_is_symmetric() {
        let grid = grid_3x3();
        for cell in grid.cells() {
            for &neighbor in cell.neighbors() {
                assert!(
                    grid.neighbors(neighbor).contains(&cell.id()),
                    "{} -> {} not mirrored",
                    cell.id(),
                    neighbor
                );
            }
        }
    }

    #[test]
    fn test_neighbors_are_at_distance_one() {
        let grid = grid_3x3();
        for cell in grid.cells() {
            assert_eq!(grid.distance(cell.id(), cell.id()), Some(0));
            for &neighbor in cell.neighbors() {
                assert_eq!(grid.distance(cell.id(), neighbor), Some(1));
            }
        }
    }

    #[test]
    fn test_interior_cell_has_six_neighbors() {
        let grid = MapFile::rectangle(5, 5, GridMetrics::default())
            .into_grid()
            .unwrap();
        let center = grid.cell_at_offset(Offset::new(2, 2)).unwrap();
        assert_eq!(grid.neighbors(center).len(), 6);
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut grid = grid_3x3();
        let before: Vec<Vec<CellId>> = grid.cells().map(|c| c.neighbors().to_vec()).collect();
        grid.rebuild_neighbors();
        let after: Vec<Vec<CellId>> = grid.cells().map(|c| c.neighbors().to_vec()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_occupancy_mutation_surface() {
        let mut grid = grid_3x3();
        assert_eq!(grid.entry_cost(4), 1.0);

        grid.occupy(4, 42).unwrap();
        assert_eq!(grid.cell(4).unwrap().occupant(), Some(42));
        assert!(grid.entry_cost(4).is_infinite());

        grid.free(4).unwrap();
        assert_eq!(grid.entry_cost(4), 1.0);

        assert!(matches!(grid.occupy(99, 1), Err(GridError::UnknownCell(99))));
    }

    #[test]
    fn test_terrain_and_sight_edits() {
        let mut grid = grid_3x3();
        grid.set_terrain(2, Terrain::Hard).unwrap();
        assert_eq!(grid.entry_cost(2), 3.0);

        grid.set_blocks_sight(2, true).unwrap();
        assert!(grid.cell(2).unwrap().blocks_sight());
    }

    #[test]
    fn test_unknown_ids_do_not_panic_in_queries() {
        let grid = grid_3x3();
        assert!(grid.cell(99).is_none());
        assert!(grid.neighbors(99).is_empty());
        assert_eq!(grid.distance(0, 99), None);
        assert!(grid.entry_cost(99).is_infinite());
    }

    #[test]
    fn test_enter_events_follow_registration_order() {
        let mut grid = grid_3x3();
        grid.add_altering_entity(4, 10).unwrap();
        grid.add_altering_entity(4, 11).unwrap();
        // registering twice is a no-op
        grid.add_altering_entity(4, 10).unwrap();

        let events = grid.enter_cell(4, 99).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].trigger, 10);
        assert_eq!(events[1].trigger, 11);
        assert!(events.iter().all(|e| e.subject == 99
            && e.cell == 4
            && e.kind == CellEventKind::Entered));

        assert!(grid.enter_cell(0, 99).unwrap().is_empty());

        grid.remove_altering_entity(4, 10).unwrap();
        let events = grid.end_turn_on_cell(4, 99).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, CellEventKind::TurnEnded);
    }
}
