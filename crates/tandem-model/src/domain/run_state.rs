use serde::{Deserialize, Serialize};

/// Lifecycle of one coordinator run.
///
/// ```text
/// Started -> Running -> PrimaryFailed
///                    -> PrimaryDone -> SecondaryResolved -> Combined -> Done
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RunState {
    /// Run created, nothing launched yet.
    Started,
    /// Primary task and the secondary/timeout race are both in flight.
    Running,
    /// Primary produced its value.
    PrimaryDone,
    /// Primary failed; the run halts here.
    PrimaryFailed,
    /// Secondary race settled (value, failure or timeout).
    SecondaryResolved,
    /// Both sides merged into a combined result.
    Combined,
    /// Run finished successfully.
    Done,
}

impl RunState {
    /// Returns `true` if no further transition is allowed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::PrimaryFailed | RunState::Done)
    }

    /// Returns `true` if `next` directly follows `self`.
    pub fn can_transition_to(&self, next: RunState) -> bool {
        matches!(
            (*self, next),
            (RunState::Started, RunState::Running)
                | (RunState::Running, RunState::PrimaryDone)
                | (RunState::Running, RunState::PrimaryFailed)
                | (RunState::PrimaryDone, RunState::SecondaryResolved)
                | (RunState::SecondaryResolved, RunState::Combined)
                | (RunState::Combined, RunState::Done)
        )
    }
}
