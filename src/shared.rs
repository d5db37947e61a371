use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::common::{IdentityKey, MatchError};
use crate::game::{LayoutAccepted, Match, Phase, Registration, ShotResult, StatusReport};
use crate::layout::Layout;

/// A [`Match`] behind one exclusive lock, shared by every connection.
///
/// Each call holds the lock for its whole check-and-set, so role assignment,
/// one-shot layouts and cell marking are atomic.
#[derive(Clone, Default)]
pub struct SharedMatch {
    inner: Arc<Mutex<Match>>,
}

impl SharedMatch {
    pub fn new(game: Match) -> Self {
        Self {
            inner: Arc::new(Mutex::new(game)),
        }
    }

    // Operations validate before mutating, so a poisoned match is still whole.
    fn lock(&self) -> MutexGuard<'_, Match> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn register(&self, identity: IdentityKey) -> Result<Registration, MatchError> {
        self.lock().register(identity)
    }

    pub fn status(&self, identity: &IdentityKey) -> Result<StatusReport, MatchError> {
        self.lock().status(identity)
    }

    pub fn submit_layout(
        &self,
        identity: &IdentityKey,
        animal: &str,
        positions: Option<&Layout>,
    ) -> Result<LayoutAccepted, MatchError> {
        self.lock().submit_layout(identity, animal, positions)
    }

    pub fn submit_shot(
        &self,
        identity: &IdentityKey,
        target: (i64, i64),
    ) -> Result<ShotResult, MatchError> {
        self.lock().submit_shot(identity, target)
    }

    pub fn reset_by(&self, identity: &IdentityKey) -> Result<(), MatchError> {
        self.lock().reset_by(identity)
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase()
    }

    /// Copy of the current match, e.g. for persisting it.
    pub fn snapshot(&self) -> Match {
        self.lock().clone()
    }
}
