use std::{
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::Instant,
};

use tandem_model::{RunId, RunState};
use tracing::trace;

use crate::error::CoordinatorError;

/// In-memory record of one run's state transitions.
#[derive(Clone)]
pub struct RunTracker {
    run: RunId,
    inner: Arc<RwLock<RunTrackerInner>>,
}

struct RunTrackerInner {
    current: RunState,
    /// Every state entered, in order, with the instant it was entered.
    history: Vec<(RunState, Instant)>,
}

impl RunTracker {
    /// Create a tracker in [`RunState::Started`].
    pub fn new(run: RunId) -> Self {
        Self {
            run,
            inner: Arc::new(RwLock::new(RunTrackerInner {
                current: RunState::Started,
                history: vec![(RunState::Started, Instant::now())],
            })),
        }
    }

    #[inline]
    pub fn run(&self) -> RunId {
        self.run
    }

    pub fn current(&self) -> RunState {
        self.read().current
    }

    /// States entered so far, oldest first.
    pub fn history(&self) -> Vec<RunState> {
        self.read().history.iter().map(|(s, _)| *s).collect()
    }

    /// Move to `next`; fails if `next` does not directly follow the current state.
    pub fn advance(&self, next: RunState) -> Result<(), CoordinatorError> {
        let mut inner = self.write();
        let from = inner.current;
        if !from.can_transition_to(next) {
            return Err(CoordinatorError::InvalidTransition { from, to: next });
        }
        inner.current = next;
        inner.history.push((next, Instant::now()));
        trace!(run = %self.run, ?from, to = ?next, "run state transition");
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, RunTrackerInner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, RunTrackerInner> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
