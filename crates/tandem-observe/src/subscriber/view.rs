use std::borrow::Borrow;

use tandem_core::{Event, EventKind};
use tracing::{debug, trace};

pub trait View {
    fn as_task(&self) -> &str;
    fn as_role(&self) -> &str;
    fn as_reason(&self) -> &str;
    fn as_run(&self) -> String;
    fn timeout_ms(&self) -> u64;
    fn kind(&self) -> EventKind;
}

impl<T> View for T
where
    T: Borrow<Event>,
{
    #[inline]
    fn as_task(&self) -> &str {
        self.borrow().task.unwrap_or("unknown")
    }
    #[inline]
    fn as_role(&self) -> &str {
        self.borrow().role.map(|r| r.as_str()).unwrap_or("unknown")
    }
    #[inline]
    fn as_reason(&self) -> &str {
        self.borrow().reason.as_deref().unwrap_or("unknown")
    }
    #[inline]
    fn as_run(&self) -> String {
        self.borrow().run.to_string()
    }
    #[inline]
    fn timeout_ms(&self) -> u64 {
        self.borrow().timeout_ms.unwrap_or(0)
    }
    #[inline]
    fn kind(&self) -> EventKind {
        self.borrow().kind
    }
}

#[inline]
pub fn message_for(kind: EventKind) -> &'static str {
    match kind {
        // run
        EventKind::RunStarted => "run started",
        EventKind::Combined => "primary and secondary results combined",
        EventKind::PoolShutdown => "execution pool released",

        // task lifecycle
        EventKind::TaskStarting => "task is starting",
        EventKind::TaskCompleted => "task completed",
        EventKind::TaskFailed => "task failed",

        // secondary race
        EventKind::TimeoutHit => "secondary task exceeded its timeout",
        EventKind::SecondaryResolved => "secondary result available",
        EventKind::SecondaryDegraded => "secondary result dropped; continuing without it",

        // terminal
        EventKind::PrimaryFatal => "primary task failed; run halted",
    }
}

#[inline]
pub fn log_event<E: View>(e: E) {
    let msg = message_for(e.kind());

    match e.kind() {
        // run
        EventKind::RunStarted => debug!(run = %e.as_run(), "{msg}"),
        EventKind::Combined => debug!(run = %e.as_run(), result = e.as_reason(), "{msg}"),
        EventKind::PoolShutdown => trace!(run = %e.as_run(), "{msg}"),

        // task lifecycle
        EventKind::TaskStarting => debug!(task = e.as_task(), role = e.as_role(), "{msg}"),
        EventKind::TaskCompleted => debug!(task = e.as_task(), role = e.as_role(), "{msg}"),
        EventKind::TaskFailed => {
            debug!(task = e.as_task(), role = e.as_role(), reason = e.as_reason(), "{msg}")
        }

        // secondary race; the coordinator logs the cause at warn
        EventKind::TimeoutHit => {
            debug!(task = e.as_task(), timeout_ms = e.timeout_ms(), "{msg}")
        }
        EventKind::SecondaryResolved => trace!(task = e.as_task(), "{msg}"),
        EventKind::SecondaryDegraded => {
            debug!(task = e.as_task(), reason = e.as_reason(), "{msg}")
        }

        // terminal; the coordinator logs it at error
        EventKind::PrimaryFatal => {
            debug!(task = e.as_task(), reason = e.as_reason(), "{msg}")
        }
    }
}
