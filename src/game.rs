//! The match engine: registration, layouts, shots and outcomes for one game.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use log::{debug, info, warn};

use crate::board::{Board, ShotOutcome};
use crate::common::{IdentityKey, MatchError, Role};
use crate::config::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::layout::Layout;
use crate::pieces::PieceSet;

/// Coarse lifecycle of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    AwaitingPlayers,
    AwaitingLayouts,
    InProgress,
    Finished,
}

/// Whether a participant's board has been populated yet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum LayoutState {
    Pending,
    Placed(Board),
}

impl LayoutState {
    pub fn is_pending(&self) -> bool {
        matches!(self, LayoutState::Pending)
    }

    pub fn board(&self) -> Option<&Board> {
        match self {
            LayoutState::Placed(board) => Some(board),
            LayoutState::Pending => None,
        }
    }
}

/// A shot fired by a participant and how it was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotRecord {
    pub x: usize,
    pub y: usize,
    pub outcome: ShotOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    identity: IdentityKey,
    role: Role,
    layout: LayoutState,
    /// Last submission failed validation and no valid one has followed.
    invalid_layout: bool,
    has_lost: bool,
    shots: Vec<ShotRecord>,
}

impl Participant {
    fn new(identity: IdentityKey, role: Role) -> Self {
        Self {
            identity,
            role,
            layout: LayoutState::Pending,
            invalid_layout: false,
            has_lost: false,
            shots: Vec::new(),
        }
    }

    pub fn identity(&self) -> &IdentityKey {
        &self.identity
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    pub fn invalid_layout(&self) -> bool {
        self.invalid_layout
    }

    pub fn has_lost(&self) -> bool {
        self.has_lost
    }

    /// Shots this participant has fired, oldest first, without repeats.
    pub fn shots(&self) -> &[ShotRecord] {
        &self.shots
    }
}

/// What a client needs after registering.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Registration {
    pub role: Role,
    pub pieces: Vec<usize>,
    pub board: (usize, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Waiting {
    OtherPlayers,
    InitialPositions,
}

impl Waiting {
    pub fn as_str(&self) -> &'static str {
        match self {
            Waiting::OtherPlayers => "other players",
            Waiting::InitialPositions => "initial positions",
        }
    }
}

/// Final result from the point of view of the participant asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    BothLost,
    Lost,
    Won,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::BothLost => write!(f, "both teams lost"),
            Outcome::Lost => write!(f, "you lose"),
            Outcome::Won => write!(f, "you win"),
        }
    }
}

/// State of a match being played.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct LiveState {
    /// Side that has fired fewer shots. Turns are not enforced.
    pub next_to_fire: Role,
    pub fired: Vec<ShotRecord>,
    pub received: Vec<ShotRecord>,
}

impl fmt::Display for LiveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hits = self.fired.iter().filter(|s| s.outcome.is_hit()).count();
        let taken = self.received.iter().filter(|s| s.outcome.is_hit()).count();
        write!(
            f,
            "in progress: {} to fire; fired {} ({} hit), received {} ({} hit)",
            self.next_to_fire,
            self.fired.len(),
            hits,
            self.received.len(),
            taken
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusReport {
    Waiting(Waiting),
    Finished(Outcome),
    Live(LiveState),
}

impl StatusReport {
    pub fn waiting_for(&self) -> Option<&'static str> {
        match self {
            StatusReport::Waiting(w) => Some(w.as_str()),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<String> {
        match self {
            StatusReport::Waiting(_) => None,
            StatusReport::Finished(outcome) => Some(alloc::format!("{}", outcome)),
            StatusReport::Live(live) => Some(alloc::format!("{}", live)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutAccepted {
    pub role: Role,
    pub phase: Phase,
}

impl fmt::Display for LayoutAccepted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.phase {
            Phase::InProgress => write!(f, "layout accepted for {}; open fire", self.role),
            _ => write!(f, "layout accepted for {}; waiting for opponent", self.role),
        }
    }
}

/// Result of a shot as reported to the shooter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShotResult {
    pub outcome: ShotOutcome,
    /// The cell had already been fired upon; nothing changed.
    pub repeated: bool,
    /// This shot sank the opponent's last piece.
    pub victory: bool,
}

impl fmt::Display for ShotResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.outcome)?;
        if self.repeated {
            write!(f, " (already fired here)")?;
        }
        if self.victory {
            write!(f, "; every piece sunk, you win")?;
        }
        Ok(())
    }
}

/// One game between at most two participants.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Match {
    pieces: PieceSet,
    participants: Vec<Participant>,
    phase: Phase,
}

impl Match {
    /// A fresh match using the standard piece set.
    pub fn new() -> Self {
        Self::with_pieces(PieceSet::standard())
    }

    pub fn with_pieces(pieces: PieceSet) -> Self {
        Self {
            pieces,
            participants: Vec::new(),
            phase: Phase::AwaitingPlayers,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn pieces(&self) -> &PieceSet {
        &self.pieces
    }

    /// Participants in join order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, identity: &IdentityKey) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.identity == identity)
    }

    fn seat_of(&self, identity: &IdentityKey) -> Result<usize, MatchError> {
        self.participants
            .iter()
            .position(|p| &p.identity == identity)
            .ok_or(MatchError::UnknownParticipant)
    }

    fn registration(&self, role: Role) -> Registration {
        Registration {
            role,
            pieces: self.pieces.lengths().to_vec(),
            board: (BOARD_WIDTH, BOARD_HEIGHT),
        }
    }

    /// Start over on behalf of a participant. Outsiders, including anyone
    /// turned away as a third player, cannot reset a match.
    pub fn reset_by(&mut self, identity: &IdentityKey) -> Result<(), MatchError> {
        self.seat_of(identity)?;
        info!("{} asked for a new match", identity);
        self.reset();
        Ok(())
    }

    /// Drop every participant and start over.
    pub fn reset(&mut self) {
        info!("match reset; {} participant(s) dropped", self.participants.len());
        self.participants.clear();
        self.phase = Phase::AwaitingPlayers;
    }

    /// Register `identity`, or return its existing registration.
    pub fn register(&mut self, identity: IdentityKey) -> Result<Registration, MatchError> {
        if let Some(existing) = self.participant(&identity) {
            return Ok(self.registration(existing.role));
        }
        let Some(role) = Role::for_seat(self.participants.len()) else {
            warn!("rejecting {}: match is full", identity);
            return Err(MatchError::MatchFull);
        };
        info!("{} joins as {}", identity, role);
        self.participants.push(Participant::new(identity, role));
        self.refresh_phase();
        Ok(self.registration(role))
    }

    pub fn status(&self, identity: &IdentityKey) -> Result<StatusReport, MatchError> {
        let seat = self.seat_of(identity)?;
        if self.participants.len() < 2 {
            return Ok(StatusReport::Waiting(Waiting::OtherPlayers));
        }
        let me = &self.participants[seat];
        let them = &self.participants[1 - seat];
        let report = match (me.has_lost, them.has_lost) {
            (true, true) => StatusReport::Finished(Outcome::BothLost),
            (true, false) => StatusReport::Finished(Outcome::Lost),
            (false, true) => StatusReport::Finished(Outcome::Won),
            (false, false) if me.layout.is_pending() || them.layout.is_pending() => {
                StatusReport::Waiting(Waiting::InitialPositions)
            }
            (false, false) => {
                let (first, second) = (&self.participants[0], &self.participants[1]);
                let next_to_fire = if first.shots.len() <= second.shots.len() {
                    first.role
                } else {
                    second.role
                };
                StatusReport::Live(LiveState {
                    next_to_fire,
                    fired: me.shots.clone(),
                    received: them.shots.clone(),
                })
            }
        };
        Ok(report)
    }

    /// Submit the layout for `identity`. Only one can ever be accepted.
    ///
    /// A layout that fails validation leaves the board empty, so the
    /// participant may submit again, but it marks the participant's layout
    /// invalid. Once both participants stand on an invalid layout, both
    /// have lost and the match is over.
    pub fn submit_layout(
        &mut self,
        identity: &IdentityKey,
        animal: &str,
        positions: Option<&Layout>,
    ) -> Result<LayoutAccepted, MatchError> {
        let seat = self.seat_of(identity)?;
        let role: Role = animal.parse()?;
        if role != self.participants[seat].role {
            return Err(MatchError::UnknownAnimal);
        }
        let layout = positions
            .filter(|l| !l.is_empty())
            .ok_or(MatchError::MissingPositions)?;
        if !self.participants[seat].layout.is_pending() {
            return Err(MatchError::RepeatedSetup);
        }
        if self.phase == Phase::Finished {
            return Err(MatchError::MatchOver);
        }

        match layout.validate(&self.pieces) {
            Ok(board) => {
                info!("{} placed {} pieces", role, board.pieces().len());
                let participant = &mut self.participants[seat];
                participant.layout = LayoutState::Placed(board);
                participant.invalid_layout = false;
                self.refresh_phase();
                Ok(LayoutAccepted {
                    role,
                    phase: self.phase,
                })
            }
            Err(err) if err.is_layout_rejection() => {
                warn!("{} submitted an invalid layout: {}", role, err);
                self.participants[seat].invalid_layout = true;
                self.settle_invalid_layouts();
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    // Both sides standing on an invalid layout is a loss for both.
    fn settle_invalid_layouts(&mut self) {
        let both_invalid =
            self.participants.len() == 2 && self.participants.iter().all(|p| p.invalid_layout);
        if both_invalid {
            info!("both layouts invalid; both teams lose");
            for participant in &mut self.participants {
                participant.has_lost = true;
            }
            self.refresh_phase();
        }
    }

    /// Fire at `target` on the opponent's board.
    pub fn submit_shot(
        &mut self,
        identity: &IdentityKey,
        target: (i64, i64),
    ) -> Result<ShotResult, MatchError> {
        let seat = self.seat_of(identity)?;
        let ready = self.participants.len() == 2
            && self
                .participants
                .iter()
                .all(|p| p.layout.board().is_some());
        if !ready {
            return Err(MatchError::LayoutNotComplete);
        }
        if self.phase == Phase::Finished {
            return Err(MatchError::MatchOver);
        }
        let (x, y) = on_board(target).ok_or(MatchError::OutOfBounds)?;

        if let Some(prev) = self.participants[seat]
            .shots
            .iter()
            .find(|s| s.x == x && s.y == y)
        {
            debug!("{} fired at ({}, {}) again", self.participants[seat].role, x, y);
            return Ok(ShotResult {
                outcome: prev.outcome,
                repeated: true,
                victory: false,
            });
        }

        let opponent = &mut self.participants[1 - seat];
        let LayoutState::Placed(board) = &mut opponent.layout else {
            return Err(MatchError::LayoutNotComplete);
        };
        let outcome = board.fire(x, y).map_err(MatchError::from)?;
        let victory = board.all_sunk();
        if victory {
            opponent.has_lost = true;
        }

        let shooter = &mut self.participants[seat];
        debug!("{} fired at ({}, {}): {}", shooter.role, x, y, outcome);
        shooter.shots.push(ShotRecord { x, y, outcome });
        if victory {
            info!("{} sank every piece", shooter.role);
            self.refresh_phase();
        }
        Ok(ShotResult {
            outcome,
            repeated: false,
            victory,
        })
    }

    fn refresh_phase(&mut self) {
        let next = if self.participants.len() < 2 {
            Phase::AwaitingPlayers
        } else if self.participants.iter().any(|p| p.has_lost) {
            Phase::Finished
        } else if self.participants.iter().any(|p| p.layout.is_pending()) {
            Phase::AwaitingLayouts
        } else {
            Phase::InProgress
        };
        if next != self.phase {
            info!("match phase {:?} -> {:?}", self.phase, next);
            self.phase = next;
        }
    }
}

fn on_board((x, y): (i64, i64)) -> Option<(usize, usize)> {
    let x = usize::try_from(x).ok().filter(|&x| x < BOARD_WIDTH)?;
    let y = usize::try_from(y).ok().filter(|&y| y < BOARD_HEIGHT)?;
    Some((x, y))
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}
