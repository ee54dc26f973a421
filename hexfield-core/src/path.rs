//! Movement search: shortest path (Dijkstra) and bounded reachability

use rustc_hash::FxHashMap;

use crate::cell::CellId;
use crate::grid::Grid;

/// An ordered movement path, inclusive of both endpoints.
///
/// "No path exists" is a value (empty sequence, infinite cost), never an
/// error.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub cells: Vec<CellId>,
    pub cost: f32,
}

impl Path {
    /// The "no path exists" result
    pub fn unreachable() -> Self {
        Self {
            cells: Vec::new(),
            cost: f32::INFINITY,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of cells entered when walking the path (excludes the source)
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }
}

/// Shortest movement path between two cells (Dijkstra).
///
/// Linear-scan minimum selection over the unvisited set, O(V^2) per
/// query; fine at tens to low hundreds of cells. Ties between
/// equal-distance cells break on the smaller id, so a run is reproducible.
/// Returns [`Path::unreachable`] when no route exists or either id is
/// unknown.
pub fn movement_path(grid: &Grid, source: CellId, target: CellId) -> Path {
    if grid.cell(source).is_none() || grid.cell(target).is_none() {
        return Path::unreachable();
    }
    if source == target {
        return Path {
            cells: vec![source],
            cost: 0.0,
        };
    }

    let mut dist: FxHashMap<CellId, f32> = FxHashMap::default();
    let mut prev: FxHashMap<CellId, CellId> = FxHashMap::default();
    let mut unvisited: Vec<CellId> = Vec::with_capacity(grid.len());

    for cell in grid.cells() {
        let id = cell.id();
        dist.insert(id, if id == source { 0.0 } else { f32::INFINITY });
        unvisited.push(id);
    }

    while !unvisited.is_empty() {
        // Pick the unvisited cell with the smallest distance. `unvisited`
        // stays id-sorted, so keeping the first minimum breaks ties by id.
        let mut best_idx = 0;
        for (idx, &id) in unvisited.iter().enumerate().skip(1) {
            if dist[&id] < dist[&unvisited[best_idx]] {
                best_idx = idx;
            }
        }
        let current = unvisited[best_idx];

        // Popping the target early is safe: its distance is final here
        if current == target {
            break;
        }
        // Everything left is cut off from the source
        if dist[&current].is_infinite() {
            break;
        }
        unvisited.remove(best_idx);

        for &neighbor in grid.neighbors(current) {
            let candidate = dist[&current] + grid.entry_cost(neighbor);
            if candidate < dist[&neighbor] {
                dist.insert(neighbor, candidate);
                prev.insert(neighbor, current);
            }
        }
    }

    let total = dist[&target];
    if total.is_infinite() {
        return Path::unreachable();
    }

    // Walk the predecessor chain backwards from the target, then flip it
    let mut cells = vec![target];
    let mut current = target;
    while let Some(&p) = prev.get(&current) {
        cells.push(p);
        current = p;
    }
    cells.reverse();

    Path { cells, cost: total }
}

/// All cells reachable from `source` within a movement budget, mapped to
/// the minimal cost of reaching them. The source is always present at
/// cost 0.
///
/// Frontier expansion rather than Dijkstra ordering: a later, cheaper
/// frontier may improve a cell recorded earlier, so improved cells are
/// re-queued until a pass adds nothing. Converges in at most `range`
/// passes since every entry cost is >= 1.
pub fn accessible_cells(grid: &Grid, source: CellId, range: f32) -> FxHashMap<CellId, f32> {
    let mut accessible: FxHashMap<CellId, f32> = FxHashMap::default();
    if grid.cell(source).is_none() {
        return accessible;
    }
    accessible.insert(source, 0.0);

    let mut frontier = vec![source];
    while !frontier.is_empty() {
        let mut next = Vec::new();

        for &current in &frontier {
            let base = accessible[&current];
            for &neighbor in grid.neighbors(current) {
                let candidate = base + grid.entry_cost(neighbor);
                if !candidate.is_finite() || candidate > range {
                    continue;
                }
                match accessible.get(&neighbor) {
                    Some(&known) if known <= candidate => {}
                    _ => {
                        accessible.insert(neighbor, candidate);
                        next.push(neighbor);
                    }
                }
            }
        }

        frontier = next;
    }

    accessible
}

/// The candidate cheapest to reach from `source`.
///
/// Candidates that cannot be entered at all are skipped; among equal
/// costs the earliest candidate wins. `None` when nothing is reachable.
pub fn most_accessible(
    grid: &Grid,
    source: CellId,
    candidates: &[CellId],
) -> Option<(CellId, f32)> {
    let mut best: Option<(CellId, f32)> = None;

    for &candidate in candidates {
        if grid.entry_cost(candidate).is_infinite() {
            continue;
        }
        let cost = movement_path(grid, source, candidate).cost;
        if !cost.is_finite() {
            continue;
        }
        if best.map_or(true, |(_, c)| cost < c) {
            best = Some((candidate, cost));
        }
    }

    best
}
