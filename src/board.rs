//! One participant's board: placed pieces, occupancy and the hits against it.

use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::common::PlacementError;
use crate::config::{Grid, BOARD_HEIGHT, BOARD_WIDTH};
use crate::piece::{Orientation, Piece, Placement};

/// Classification of a shot against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// Shot missed all pieces.
    Miss,
    /// Shot struck a piece that is still afloat.
    Hit,
    /// Shot struck the last intact cell of a piece.
    Sunk { length: usize },
}

impl ShotOutcome {
    pub fn is_hit(&self) -> bool {
        !matches!(self, ShotOutcome::Miss)
    }
}

impl fmt::Display for ShotOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShotOutcome::Miss => write!(f, "miss"),
            ShotOutcome::Hit => write!(f, "hit"),
            ShotOutcome::Sunk { length } => write!(f, "hit: sunk the {}-piece", length),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    pieces: Vec<Piece>,
    occupied: Grid,
    hits: Grid,
}

impl Board {
    /// Create a board with no pieces placed.
    pub fn new() -> Self {
        Board {
            pieces: Vec::new(),
            occupied: Grid::new(),
            hits: Grid::new(),
        }
    }

    /// Build a board from a full set of placements, rejecting the first one
    /// that leaves the board or lands on an occupied cell.
    pub fn from_placements(placements: &[Placement]) -> Result<Self, PlacementError> {
        let mut board = Board::new();
        for placement in placements {
            board.place(placement)?;
        }
        Ok(board)
    }

    /// Board dimensions as `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (BOARD_WIDTH, BOARD_HEIGHT)
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Occupancy mask of all pieces.
    pub fn occupied(&self) -> Grid {
        self.occupied
    }

    /// Every cell fired upon so far.
    pub fn hits(&self) -> Grid {
        self.hits
    }

    /// Index of the piece covering (x, y), if any.
    pub fn piece_at(&self, x: usize, y: usize) -> Option<usize> {
        self.pieces.iter().position(|p| p.contains(x, y))
    }

    /// Returns `true` when every placed piece is sunk.
    pub fn all_sunk(&self) -> bool {
        !self.pieces.is_empty() && self.pieces.iter().all(Piece::is_sunk)
    }

    /// Place a single piece.
    pub fn place(&mut self, placement: &Placement) -> Result<(), PlacementError> {
        let piece = Piece::new(placement)?;
        let mask = piece.mask();
        if !(self.occupied & mask).is_empty() {
            return Err(PlacementError::Overlap);
        }
        self.occupied |= mask;
        self.pieces.push(piece);
        Ok(())
    }

    /// Returns a random non-overlapping placement for a piece of `length`.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        length: usize,
    ) -> Result<Placement, PlacementError> {
        if length == 0 {
            return Err(PlacementError::EmptyPiece);
        }
        for _ in 0..100 {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (max_x, max_y) = match orientation {
                Orientation::Horizontal => {
                    (BOARD_WIDTH.checked_sub(length), Some(BOARD_HEIGHT - 1))
                }
                Orientation::Vertical => {
                    (Some(BOARD_WIDTH - 1), BOARD_HEIGHT.checked_sub(length))
                }
            };
            let (Some(max_x), Some(max_y)) = (max_x, max_y) else {
                continue;
            };
            let x = rng.random_range(0..=max_x) as i64;
            let y = rng.random_range(0..=max_y) as i64;
            let placement = Placement::new(length, x, y, orientation);
            let piece = Piece::new(&placement)?;
            if (self.occupied & piece.mask()).is_empty() {
                return Ok(placement);
            }
        }
        Err(PlacementError::Overlap)
    }

    /// Record a shot at (x, y). Firing at a cell already hit leaves the board
    /// unchanged; a sunk piece then reports a plain hit.
    pub fn fire(&mut self, x: usize, y: usize) -> Result<ShotOutcome, PlacementError> {
        self.hits.set(x, y)?;
        let Some(idx) = self.piece_at(x, y) else {
            return Ok(ShotOutcome::Miss);
        };
        let piece = &mut self.pieces[idx];
        let was_sunk = piece.is_sunk();
        piece.strike(x, y)?;
        if !was_sunk && piece.is_sunk() {
            Ok(ShotOutcome::Sunk {
                length: piece.length(),
            })
        } else {
            Ok(ShotOutcome::Hit)
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  occupied: {:?},\n  hits: {:?},\n  pieces: {:?}\n}}",
            self.occupied, self.hits, self.pieces
        )
    }
}
