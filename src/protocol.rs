use serde::{Deserialize, Serialize};

use crate::game::{Registration, StatusReport};
use crate::layout::Layout;

/// Wire protocol revision, checked during the handshake.
pub const PROTOCOL_VERSION: u32 = 1;

/// Messages exchanged between a client and the match server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Opens a session.
    Handshake { version: u32 },
    HandshakeAck { version: u32 },
    /// Join the match, or fetch an existing registration.
    Register,
    /// Ask for the current match status.
    Status,
    /// Submit the initial positions for `animal`.
    Layout {
        animal: String,
        positions: Option<Layout>,
    },
    /// Fire at a cell on the opponent's board.
    Shot { x: i64, y: i64 },
    /// Drop every participant and start a new match. Only a registered
    /// participant may ask.
    Reset,
    Registered(Registration),
    StatusResp(StatusReport),
    /// Success carrying a human-readable result.
    Done { result: String },
    /// Failure carrying the reason.
    Failure { result: String },
}

/// Client-facing view of a status report: `waiting_for` and `result`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusView {
    pub waiting_for: Option<String>,
    pub result: Option<String>,
}

impl From<&StatusReport> for StatusView {
    fn from(report: &StatusReport) -> Self {
        Self {
            waiting_for: report.waiting_for().map(str::to_string),
            result: report.result(),
        }
    }
}
