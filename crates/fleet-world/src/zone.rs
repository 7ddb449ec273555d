//! Typed zones: named regions covering one or more grid cells.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use fleet_core::{Cell, Position, ZoneId};

use crate::{WorldError, WorldResult};

// ── ZoneType ──────────────────────────────────────────────────────────────────

/// The functional kind of a zone.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ZoneType {
    Inspection,
    Maintenance,
    Loading,
    Restricted,
    Charging,
}

impl ZoneType {
    pub fn as_str(self) -> &'static str {
        match self {
            ZoneType::Inspection => "inspection",
            ZoneType::Maintenance => "maintenance",
            ZoneType::Loading => "loading",
            ZoneType::Restricted => "restricted",
            ZoneType::Charging => "charging",
        }
    }
}

impl FromStr for ZoneType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inspection" => Ok(ZoneType::Inspection),
            "maintenance" => Ok(ZoneType::Maintenance),
            "loading" => Ok(ZoneType::Loading),
            "restricted" => Ok(ZoneType::Restricted),
            "charging" => Ok(ZoneType::Charging),
            other => Err(format!("unknown zone type: {other:?}")),
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Zone ──────────────────────────────────────────────────────────────────────

/// A typed region containing one or more grid cells.
///
/// Cells are stored in a `BTreeSet` so iteration is coordinate-ordered,
/// which makes nearest-cell queries deterministic under ties.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    id:        ZoneId,
    zone_type: ZoneType,
    cells:     BTreeSet<Cell>,
}

impl Zone {
    /// Build a zone from an iterator of cells. Duplicates collapse silently;
    /// an empty cell set is rejected.
    pub fn from_cells<I>(id: ZoneId, zone_type: ZoneType, cells: I) -> WorldResult<Zone>
    where
        I: IntoIterator<Item = Cell>,
    {
        let cells: BTreeSet<Cell> = cells.into_iter().collect();
        if cells.is_empty() {
            return Err(WorldError::EmptyZone(id));
        }
        Ok(Zone { id, zone_type, cells })
    }

    #[inline]
    pub fn id(&self) -> ZoneId {
        self.id
    }

    #[inline]
    pub fn zone_type(&self) -> ZoneType {
        self.zone_type
    }

    /// The cells covered by this zone, in coordinate order.
    #[inline]
    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    /// `true` if this zone covers `pos` (floored to its enclosing cell).
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos.cell())
    }

    /// The zone cell with the smallest Manhattan distance from `from`.
    ///
    /// Ties break toward the coordinate-smallest cell (the set iterates in
    /// `Ord` order and only a strictly smaller distance replaces the best).
    pub fn nearest_cell(&self, from: Cell) -> Option<Cell> {
        let mut iter = self.cells.iter();
        let mut best = *iter.next()?;
        let mut best_dist = from.manhattan(best);
        for &cell in iter {
            let dist = from.manhattan(cell);
            if dist < best_dist {
                best = cell;
                best_dist = dist;
            }
        }
        Some(best)
    }
}
