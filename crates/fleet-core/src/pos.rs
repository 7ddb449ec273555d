//! Grid geometry: discrete cells and robot poses.
//!
//! # Coordinate conventions
//!
//! The grid origin is the top-left cell `(0, 0)`; `x` grows to the right and
//! `y` grows downward. Therefore **up** is `y - 1`, **down** is `y + 1`,
//! **left** is `x - 1`, **right** is `x + 1`.
//!
//! # Cell vs. Position
//!
//! [`Cell`] is the integer grid coordinate: hashable, orderable, and used for
//! obstacles, zones, occupancy sets, and pathfinding. [`Position`] is the
//! robot-pose coordinate stored as `f64`, shared by both engine variants; the
//! discrete variant only ever produces integer-valued positions. A position
//! floors into its enclosing cell via [`Position::cell`], so a robot at
//! `(3.74, 2.12)` is inside cell `(3, 2)`.

use std::fmt;

// ── Cell ──────────────────────────────────────────────────────────────────────

/// An integer grid cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// One cell up (decrement `y`).
    #[inline]
    pub fn up(self) -> Cell {
        Cell::new(self.x, self.y - 1)
    }

    /// One cell down (increment `y`).
    #[inline]
    pub fn down(self) -> Cell {
        Cell::new(self.x, self.y + 1)
    }

    /// One cell left (decrement `x`).
    #[inline]
    pub fn left(self) -> Cell {
        Cell::new(self.x - 1, self.y)
    }

    /// One cell right (increment `x`).
    #[inline]
    pub fn right(self) -> Cell {
        Cell::new(self.x + 1, self.y)
    }

    /// The 4-connected neighbors in a fixed order (up, down, left, right).
    ///
    /// The order is part of the pathfinding contract: breadth-first search
    /// expands neighbors in exactly this sequence, which makes tie-breaking
    /// between equal-length paths deterministic.
    #[inline]
    pub fn neighbors4(self) -> [Cell; 4] {
        [self.up(), self.down(), self.left(), self.right()]
    }

    /// Manhattan distance to `other`.
    #[inline]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Chebyshev distance to `other` (1 for all eight surrounding cells).
    #[inline]
    pub fn chebyshev(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// The position at this cell's coordinates.
    #[inline]
    pub fn position(self) -> Position {
        Position::new(self.x as f64, self.y as f64)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<Cell> for Position {
    #[inline]
    fn from(cell: Cell) -> Position {
        cell.position()
    }
}

// ── Position ──────────────────────────────────────────────────────────────────

/// A robot pose on the grid, stored as double-precision coordinates.
///
/// Structurally immutable: all operations return new values. Equality is
/// structural; there is no `Hash` impl, use [`Position::cell`] when a
/// hashable coordinate is needed.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The enclosing grid cell (coordinates floored).
    #[inline]
    pub fn cell(self) -> Cell {
        Cell::new(self.x.floor() as i32, self.y.floor() as i32)
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// `true` if `other` is within `eps` (Euclidean, inclusive).
    #[inline]
    pub fn near(self, other: Position, eps: f64) -> bool {
        self.distance(other) <= eps
    }

    /// Manhattan distance between the enclosing cells.
    #[inline]
    pub fn manhattan(self, other: Position) -> u32 {
        self.cell().manhattan(other.cell())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
