#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bitboard;
mod board;
mod common;
mod config;
mod game;
mod layout;
mod piece;
mod pieces;
#[cfg(feature = "std")]
pub mod client;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod protocol;
#[cfg(feature = "std")]
pub mod server;
#[cfg(feature = "std")]
mod shared;
#[cfg(feature = "std")]
pub mod transport;

pub use bitboard::{BitBoard, BitBoardError};
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
pub use layout::*;
pub use piece::*;
pub use pieces::*;
#[cfg(feature = "std")]
pub use client::{MatchClient, PlayReport, ServerRejection};
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
#[cfg(feature = "std")]
pub use protocol::{Message, StatusView, PROTOCOL_VERSION};
#[cfg(feature = "std")]
pub use server::MatchServer;
#[cfg(feature = "std")]
pub use shared::SharedMatch;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
