//! Piece placements and placed pieces, using our `BitBoard`.

use core::fmt;

use crate::common::PlacementError;
use crate::config::{Grid, BOARD_HEIGHT, BOARD_WIDTH};

/// Orientation of a piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Extends along increasing `x`.
    Horizontal,
    /// Extends along increasing `y`.
    Vertical,
}

/// A requested placement as submitted by a client.
///
/// Coordinates are signed because clients can and do send `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub length: usize,
    pub x: i64,
    pub y: i64,
    pub orientation: Orientation,
}

impl Placement {
    pub fn new(length: usize, x: i64, y: i64, orientation: Orientation) -> Self {
        Self {
            length,
            x,
            y,
            orientation,
        }
    }

    /// Cells covered by this placement, in board coordinates, without
    /// any bounds check.
    pub fn cells(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        (0..self.length as i64).map(move |i| match self.orientation {
            Orientation::Horizontal => (self.x + i, self.y),
            Orientation::Vertical => (self.x, self.y + i),
        })
    }

    /// Returns true if every covered cell is on the board.
    pub fn in_bounds(&self) -> bool {
        self.cells().all(|(x, y)| {
            x >= 0 && y >= 0 && (x as usize) < BOARD_WIDTH && (y as usize) < BOARD_HEIGHT
        })
    }
}

/// A piece that has been placed on a board, with hits tracked in a mask.
#[derive(Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    length: usize,
    origin: (usize, usize),
    orientation: Orientation,
    mask: Grid,
    hits: Grid,
}

impl Piece {
    /// Build the piece covering `placement`.
    pub fn new(placement: &Placement) -> Result<Self, PlacementError> {
        if placement.length == 0 {
            return Err(PlacementError::EmptyPiece);
        }
        if !placement.in_bounds() {
            return Err(PlacementError::OutOfBounds);
        }
        let mask = Grid::from_cells(
            placement
                .cells()
                .map(|(x, y)| (x as usize, y as usize)),
        )?;
        Ok(Piece {
            length: placement.length,
            origin: (placement.x as usize, placement.y as usize),
            orientation: placement.orientation,
            mask,
            hits: Grid::new(),
        })
    }

    /// Register a shot at (`x`, `y`). Returns `true` if it struck this piece.
    pub fn strike(&mut self, x: usize, y: usize) -> Result<bool, PlacementError> {
        if !self.mask.get(x, y)? {
            return Ok(false);
        }
        self.hits.set(x, y)?;
        Ok(true)
    }

    /// Check if the piece is sunk (all cells hit).
    pub fn is_sunk(&self) -> bool {
        self.hits.contains(&self.mask)
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn origin(&self) -> (usize, usize) {
        self.origin
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupancy mask of the piece on the board.
    pub fn mask(&self) -> Grid {
        self.mask
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y).unwrap_or(false)
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Piece {{ length: {}, origin: ({}, {}), orientation: {:?}, hits: {} }}",
            self.length,
            self.origin.0,
            self.origin.1,
            self.orientation,
            self.hits.count_ones(),
        )
    }
}
