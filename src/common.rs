//! Common types for the match engine: roles, identities and errors.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::bitboard::BitBoardError;

/// The two animals a match hands out, in join order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Role {
    Fox,
    Badger,
}

impl Role {
    /// Roles in the order they are assigned.
    pub const ALL: [Role; 2] = [Role::Fox, Role::Badger];

    pub fn name(&self) -> &'static str {
        match self {
            Role::Fox => "fox",
            Role::Badger => "badger",
        }
    }

    /// The role assigned to the `index`-th participant to join.
    pub fn for_seat(index: usize) -> Option<Role> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = MatchError;

    /// Case-insensitive; anything else is [`MatchError::UnknownAnimal`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.name().eq_ignore_ascii_case(s))
            .ok_or(MatchError::UnknownAnimal)
    }
}

/// Opaque key identifying a participant for the lifetime of a match.
///
/// The engine never parses it; the network layer derives it from the peer
/// address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IdentityKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

#[cfg(feature = "std")]
impl From<std::net::IpAddr> for IdentityKey {
    fn from(ip: std::net::IpAddr) -> Self {
        Self::new(std::string::ToString::to_string(&ip))
    }
}

/// Errors raised while turning a placement into board cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// Piece runs off the edge of the board.
    OutOfBounds,
    /// Piece shares a cell with one already placed.
    Overlap,
    /// Zero-length piece.
    EmptyPiece,
}

impl From<BitBoardError> for PlacementError {
    fn from(err: BitBoardError) -> Self {
        match err {
            BitBoardError::IndexOutOfBounds { .. } => PlacementError::OutOfBounds,
        }
    }
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::OutOfBounds => write!(f, "Piece placement is out of bounds"),
            PlacementError::Overlap => write!(f, "Piece placement would overlap another piece"),
            PlacementError::EmptyPiece => write!(f, "Piece has no length"),
        }
    }
}

/// Request-level failures reported to the caller.
///
/// The `Display` text is what clients see; they match on the lowercase
/// keywords ("too late", "overlap", ...) case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchError {
    /// A third identity tried to join.
    MatchFull,
    /// The identity never registered in this match.
    UnknownParticipant,
    /// The animal named in the request is not the caller's role.
    UnknownAnimal,
    /// The layout request carried no positions.
    MissingPositions,
    /// The caller already submitted a layout.
    RepeatedSetup,
    /// A piece or shot lies outside the board.
    OutOfBounds,
    /// Piece lengths differ from the piece set.
    IncorrectPieces,
    /// Two pieces share a cell.
    Overlap,
    /// Shots are refused until both layouts are valid.
    LayoutNotComplete,
    /// The match is decided; no further layouts or shots.
    MatchOver,
}

impl MatchError {
    /// True for validation failures that mark a layout invalid.
    pub fn is_layout_rejection(&self) -> bool {
        matches!(
            self,
            MatchError::IncorrectPieces | MatchError::OutOfBounds | MatchError::Overlap
        )
    }
}

impl From<PlacementError> for MatchError {
    fn from(err: PlacementError) -> Self {
        match err {
            PlacementError::Overlap => MatchError::Overlap,
            PlacementError::EmptyPiece => MatchError::IncorrectPieces,
            PlacementError::OutOfBounds => MatchError::OutOfBounds,
        }
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::MatchFull => write!(f, "Too late: this match already has two players"),
            MatchError::UnknownParticipant => {
                write!(f, "Unknown participant: register before playing")
            }
            MatchError::UnknownAnimal => write!(f, "No such animal for this player"),
            MatchError::MissingPositions => write!(f, "Missing positions"),
            MatchError::RepeatedSetup => write!(f, "Repeated setup: layout already submitted"),
            MatchError::OutOfBounds => write!(f, "Out of bounds"),
            MatchError::IncorrectPieces => write!(f, "Incorrect pieces"),
            MatchError::Overlap => write!(f, "Pieces overlap"),
            MatchError::LayoutNotComplete => write!(
                f,
                "Shot refused: no one can win or lose until both layouts are valid"
            ),
            MatchError::MatchOver => write!(f, "Refused: the match is over"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MatchError {}

#[cfg(feature = "std")]
impl std::error::Error for PlacementError {}
