use fleet_core::{Cell, ZoneId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("cell {0} is out of bounds")]
    OutOfBounds(Cell),

    #[error("cell {0} is already covered by zone {1}")]
    CellInZone(Cell, ZoneId),

    #[error("zone id {0} already exists")]
    DuplicateZone(ZoneId),

    #[error("zone {new} cell {cell} overlaps zone {existing}")]
    ZoneOverlap {
        new:      ZoneId,
        existing: ZoneId,
        cell:     Cell,
    },

    #[error("zone {0} has no cells")]
    EmptyZone(ZoneId),
}

pub type WorldResult<T> = Result<T, WorldError>;
