//! Cell records: terrain parameters, occupancy and derived coordinates

use serde::{Deserialize, Serialize};

use crate::coords::{Cube, Offset, WorldPos};

/// Stable index of a cell in the grid table
pub type CellId = usize;

/// Opaque identifier of an entity occupying or altering a cell.
///
/// The engine only stores and compares these; resolving them back to
/// actual entities is the caller's business.
pub type EntityId = u32;

/// Terrain tiers, ordered by entry cost
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    #[default]
    Open,
    Medium,
    Hard,
    Impassable,
}

impl Terrain {
    /// Movement cost to enter a cell of this terrain, ignoring occupancy
    pub fn entry_cost(self) -> f32 {
        match self {
            Terrain::Open => 1.0,
            Terrain::Medium => 2.0,
            Terrain::Hard => 3.0,
            Terrain::Impassable => f32::INFINITY,
        }
    }
}

/// Input record for one cell, as handed over by a grid-generation step
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CellSeed {
    pub position: WorldPos,
    #[serde(default)]
    pub terrain: Terrain,
    #[serde(default)]
    pub blocks_sight: bool,
}

impl CellSeed {
    pub fn open(position: WorldPos) -> Self {
        Self {
            position,
            terrain: Terrain::Open,
            blocks_sight: false,
        }
    }
}

/// A single hex tile in the grid table.
///
/// Cells are created in one batch during grid construction and addressed
/// by [`CellId`] everywhere; the neighbour list stores ids, never
/// references.
#[derive(Clone, Debug)]
pub struct Cell {
    pub(crate) id: CellId,
    pub(crate) position: WorldPos,
    pub(crate) offset: Offset,
    pub(crate) cube: Cube,
    pub(crate) terrain: Terrain,
    pub(crate) blocks_sight: bool,
    pub(crate) occupant: Option<EntityId>,
    pub(crate) altering_entities: Vec<EntityId>,
    pub(crate) neighbors: Vec<CellId>,
}

impl Cell {
    pub fn id(&self) -> CellId {
        self.id
    }

    pub fn position(&self) -> WorldPos {
        self.position
    }

    pub fn offset(&self) -> Offset {
        self.offset
    }

    pub fn cube(&self) -> Cube {
        self.cube
    }

    pub fn terrain(&self) -> Terrain {
        self.terrain
    }

    pub fn blocks_sight(&self) -> bool {
        self.blocks_sight
    }

    pub fn occupant(&self) -> Option<EntityId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// Whether the cell sits on a shifted (odd) column
    pub fn is_shifted(&self) -> bool {
        self.offset.is_shifted()
    }

    /// Ids of the up to six adjacent cells
    pub fn neighbors(&self) -> &[CellId] {
        &self.neighbors
    }

    /// Entities registered as altering this cell
    pub fn altering_entities(&self) -> &[EntityId] {
        &self.altering_entities
    }

    /// Cost to move into this cell: infinite while occupied or impassable,
    /// otherwise a function of the terrain tier.
    ///
    /// Read-only with respect to the grid; consulted by every traversal.
    pub fn entry_cost(&self) -> f32 {
        if self.is_occupied() {
            f32::INFINITY
        } else {
            self.terrain.entry_cost()
        }
    }
}
