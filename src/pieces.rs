//! The catalog of piece lengths a layout must contain.

use alloc::vec::Vec;

use crate::config::PIECES;
use crate::piece::Placement;

/// Ordered piece lengths, each of which must be placed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct PieceSet {
    lengths: Vec<usize>,
}

impl PieceSet {
    pub fn new(lengths: impl Into<Vec<usize>>) -> Self {
        Self {
            lengths: lengths.into(),
        }
    }

    /// The standard `[5, 4, 3, 2, 1]` catalog.
    pub fn standard() -> Self {
        Self::new(PIECES.to_vec())
    }

    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Total number of cells a complete layout covers.
    pub fn total_cells(&self) -> usize {
        self.lengths.iter().sum()
    }

    /// True if `placements` use exactly this multiset of lengths.
    pub fn matches(&self, placements: &[Placement]) -> bool {
        if placements.len() != self.lengths.len() {
            return false;
        }
        let mut expected = self.lengths.clone();
        let mut submitted: Vec<usize> = placements.iter().map(|p| p.length).collect();
        expected.sort_unstable();
        submitted.sort_unstable();
        expected == submitted
    }
}

impl Default for PieceSet {
    fn default() -> Self {
        Self::standard()
    }
}
