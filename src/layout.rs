//! Submitted layouts: the `horizontal`/`vertical` triple lists clients send,
//! their validation into a [`Board`], and random generation.

use alloc::vec::Vec;
use rand::Rng;

use crate::board::Board;
use crate::common::{MatchError, PlacementError};
use crate::piece::{Orientation, Placement};
use crate::pieces::PieceSet;

/// One `[length, x, y]` entry as it arrives on the wire.
pub type PieceEntry = [i64; 3];

/// A participant's requested positions, grouped by orientation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    pub horizontal: Vec<PieceEntry>,
    pub vertical: Vec<PieceEntry>,
}

impl Layout {
    pub fn new(horizontal: Vec<PieceEntry>, vertical: Vec<PieceEntry>) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Every piece placed vertically at `x = index, y = 0`.
    pub fn columns(pieces: &PieceSet) -> Self {
        let vertical = pieces
            .lengths()
            .iter()
            .enumerate()
            .map(|(i, &len)| [len as i64, i as i64, 0])
            .collect();
        Self::new(Vec::new(), vertical)
    }

    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }

    /// Flatten into placements. A negative length never matches a piece.
    pub fn placements(&self) -> Result<Vec<Placement>, MatchError> {
        let horizontal = self
            .horizontal
            .iter()
            .map(|e| (e, Orientation::Horizontal));
        let vertical = self.vertical.iter().map(|e| (e, Orientation::Vertical));
        horizontal
            .chain(vertical)
            .map(|(&[length, x, y], orientation)| {
                usize::try_from(length)
                    .map(|length| Placement::new(length, x, y, orientation))
                    .map_err(|_| MatchError::IncorrectPieces)
            })
            .collect()
    }

    /// Check the layout against `pieces` and build the board.
    ///
    /// Rules are checked in order: piece lengths, bounds, overlap.
    pub fn validate(&self, pieces: &PieceSet) -> Result<Board, MatchError> {
        if self.is_empty() {
            return Err(MatchError::MissingPositions);
        }
        let placements = self.placements()?;
        if !pieces.matches(&placements) {
            return Err(MatchError::IncorrectPieces);
        }
        if !placements.iter().all(Placement::in_bounds) {
            return Err(MatchError::OutOfBounds);
        }
        Board::from_placements(&placements).map_err(MatchError::from)
    }

    /// A random valid layout for `pieces`.
    pub fn random<R: Rng>(rng: &mut R, pieces: &PieceSet) -> Result<Self, PlacementError> {
        let mut board = Board::new();
        let mut layout = Layout::default();
        for &length in pieces.lengths() {
            let placement = board.random_placement(rng, length)?;
            board.place(&placement)?;
            let entry = [placement.length as i64, placement.x, placement.y];
            match placement.orientation {
                Orientation::Horizontal => layout.horizontal.push(entry),
                Orientation::Vertical => layout.vertical.push(entry),
            }
        }
        Ok(layout)
    }
}
