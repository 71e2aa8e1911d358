use std::sync::Arc;

use tandem_model::{RunId, TaskRole, TimeoutMs};

/// What happened during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    RunStarted,
    TaskStarting,
    TaskCompleted,
    TaskFailed,
    /// The timeout beat the secondary task.
    TimeoutHit,
    /// The secondary race produced a value.
    SecondaryResolved,
    /// The secondary race failed; the run continues without its value.
    SecondaryDegraded,
    /// The primary failed; the run halts.
    PrimaryFatal,
    Combined,
    PoolShutdown,
}

/// Coordinator event delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub run: RunId,
    pub task: Option<&'static str>,
    pub role: Option<TaskRole>,
    pub reason: Option<String>,
    pub timeout_ms: Option<TimeoutMs>,
}

impl Event {
    pub fn new(kind: EventKind, run: RunId) -> Self {
        Self {
            kind,
            run,
            task: None,
            role: None,
            reason: None,
            timeout_ms: None,
        }
    }

    pub fn with_task(mut self, task: &'static str, role: TaskRole) -> Self {
        self.task = Some(task);
        self.role = Some(role);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_timeout_ms(mut self, ms: TimeoutMs) -> Self {
        self.timeout_ms = Some(ms);
        self
    }
}

/// Receives coordinator events.
///
/// Called inline from the task that produced the event, so implementations
/// must return quickly.
pub trait Subscribe: Send + Sync {
    fn on_event(&self, event: &Event);

    fn name(&self) -> &'static str;
}

/// Fan-out of events to every registered subscriber.
#[derive(Clone)]
pub struct Bus {
    subscribers: Arc<[Arc<dyn Subscribe>]>,
}

impl Default for Bus {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Bus {
    pub fn new(subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        Self {
            subscribers: subscribers.into(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn publish(&self, event: Event) {
        for sub in self.subscribers.iter() {
            sub.on_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<EventKind>>);

    impl Subscribe for Recorder {
        fn on_event(&self, event: &Event) {
            self.0.lock().unwrap().push(event.kind);
        }
        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    #[test]
    fn publishes_to_every_subscriber() {
        let a = Arc::new(Recorder::default());
        let b = Arc::new(Recorder::default());
        let bus = Bus::new(vec![
            a.clone() as Arc<dyn Subscribe>,
            b.clone() as Arc<dyn Subscribe>,
        ]);
        assert_eq!(bus.len(), 2);

        let run = RunId::new();
        bus.publish(Event::new(EventKind::RunStarted, run));
        bus.publish(Event::new(EventKind::Combined, run));

        let expected = vec![EventKind::RunStarted, EventKind::Combined];
        assert_eq!(*a.0.lock().unwrap(), expected);
        assert_eq!(*b.0.lock().unwrap(), expected);
    }

    #[test]
    fn empty_bus_is_a_no_op() {
        let bus = Bus::default();
        assert!(bus.is_empty());
        bus.publish(Event::new(EventKind::RunStarted, RunId::new()));
    }

    #[test]
    fn builder_fills_optional_fields() {
        let e = Event::new(EventKind::SecondaryDegraded, RunId::new())
            .with_task("secondary", TaskRole::Secondary)
            .with_reason("late")
            .with_timeout_ms(10);
        assert_eq!(e.task, Some("secondary"));
        assert_eq!(e.role, Some(TaskRole::Secondary));
        assert_eq!(e.reason.as_deref(), Some("late"));
        assert_eq!(e.timeout_ms, Some(10));
    }
}
