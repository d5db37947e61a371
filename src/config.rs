use crate::bitboard::BitBoard;

pub const BOARD_WIDTH: usize = 8;
pub const BOARD_HEIGHT: usize = 8;

/// Piece lengths every participant must place, once each.
pub const PIECES: [usize; 5] = [5, 4, 3, 2, 1];

const _: () = assert!(BOARD_WIDTH * BOARD_HEIGHT <= u64::BITS as usize);

/// Occupancy bitmap sized for the match board.
pub type Grid = BitBoard<u64, BOARD_WIDTH, BOARD_HEIGHT>;
