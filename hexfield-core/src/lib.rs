//! HEXFIELD Core - Hex-grid tactical movement and targeting engine
//!
//! This crate provides the graph core for turn-based entities on a
//! hexagonal grid:
//! - Coordinate systems (odd-q offset and cube coordinates)
//! - Grid graph with terrain, occupancy and a derived neighbour relation
//! - Shortest-path movement costing (Dijkstra) and bounded reachability
//! - Line-of-sight visibility testing
//! - Range bands and attack-targeting queries
//! - JSON map files for the grid-generation boundary
//!
//! All queries are synchronous and read-only; occupancy and terrain
//! edits go through the grid's narrow mutation surface between queries.

pub mod cell;
pub mod coords;
pub mod grid;
pub mod map;
pub mod path;
pub mod range;
pub mod sight;

// Re-exports for convenient access
pub use cell::{Cell, CellId, CellSeed, EntityId, Terrain};
pub use coords::{Cube, GridMetrics, Offset, WorldPos};
pub use grid::{CellEvent, CellEventKind, Grid, GridError};
pub use map::{MapFile, TerrainProfile};
pub use path::{accessible_cells, most_accessible, movement_path, Path};
pub use range::{attackable_cells, cells_in_range};
pub use sight::{is_visible, BLOCKER_BIAS};
