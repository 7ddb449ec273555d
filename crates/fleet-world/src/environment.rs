//! The bounded rectangular grid the simulation runs on.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use fleet_core::{Cell, Position, ZoneId};

use crate::{WorldError, WorldResult, Zone};

/// A `width × height` grid with origin at the top-left (`x` right, `y` down).
///
/// Holds an obstacle set and a map of typed zones. Invariants, enforced at
/// mutation time:
///
/// - every obstacle and zone cell lies in `[0, width) × [0, height)`,
/// - zones are pairwise disjoint,
/// - zone IDs are unique.
///
/// Mutation is permitted only while a scenario is being assembled; once a
/// simulation is constructed on top, the environment is shared read-only.
#[derive(Clone, PartialEq, Debug)]
pub struct Environment {
    width:     u32,
    height:    u32,
    obstacles: FxHashSet<Cell>,
    zones:     BTreeMap<ZoneId, Zone>,
}

impl Environment {
    /// An empty grid of the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            obstacles: FxHashSet::default(),
            zones:     BTreeMap::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `true` if `cell` lies within `[0, width) × [0, height)`.
    #[inline]
    pub fn cell_in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as u32) < self.width
            && (cell.y as u32) < self.height
    }

    /// `true` if the cell enclosing `pos` is in bounds.
    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        self.cell_in_bounds(pos.cell())
    }

    /// `true` if `cell` is an obstacle.
    #[inline]
    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    /// The obstacle cells. Iteration order is unspecified.
    #[inline]
    pub fn obstacles(&self) -> &FxHashSet<Cell> {
        &self.obstacles
    }

    /// Mark `cell` as an obstacle.
    ///
    /// Idempotent: adding an existing obstacle is a no-op. Rejects cells that
    /// are out of bounds or already occupied by a non-obstacle (a zone).
    pub fn add_obstacle(&mut self, cell: Cell) -> WorldResult<()> {
        if !self.cell_in_bounds(cell) {
            return Err(WorldError::OutOfBounds(cell));
        }
        if self.obstacles.contains(&cell) {
            return Ok(());
        }
        if let Some(zone) = self.zone_covering(cell) {
            return Err(WorldError::CellInZone(cell, zone.id()));
        }
        self.obstacles.insert(cell);
        Ok(())
    }

    /// Add a zone. Atomic: on any failure the environment is unchanged.
    ///
    /// Fails if the zone's ID collides with an existing zone, any of its
    /// cells is out of bounds, or any of its cells overlaps an existing zone.
    pub fn add_zone(&mut self, zone: Zone) -> WorldResult<()> {
        if self.zones.contains_key(&zone.id()) {
            return Err(WorldError::DuplicateZone(zone.id()));
        }
        for &cell in zone.cells() {
            if !self.cell_in_bounds(cell) {
                return Err(WorldError::OutOfBounds(cell));
            }
            if let Some(existing) = self.zone_covering(cell) {
                return Err(WorldError::ZoneOverlap {
                    new:      zone.id(),
                    existing: existing.id(),
                    cell,
                });
            }
        }
        self.zones.insert(zone.id(), zone);
        Ok(())
    }

    /// Look up a zone by ID.
    #[inline]
    pub fn get_zone(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.get(&id)
    }

    /// All zones, in ID order.
    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.zones.values()
    }

    /// The zone covering `cell`, if any. Zones are disjoint, so there is at
    /// most one.
    pub fn zone_covering(&self, cell: Cell) -> Option<&Zone> {
        self.zones
            .values()
            .find(|zone| zone.cells().contains(&cell))
    }
}
