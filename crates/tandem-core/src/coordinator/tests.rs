use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;

use super::*;
use crate::{
    error::PoolError,
    pool::PoolFuture,
    task::FnTask,
};

#[derive(Default)]
struct Recorder(Mutex<Vec<Event>>);

impl Recorder {
    fn kinds(&self) -> Vec<EventKind> {
        self.0.lock().unwrap().iter().map(|e| e.kind).collect()
    }

    fn find(&self, kind: EventKind) -> Option<Event> {
        self.0.lock().unwrap().iter().find(|e| e.kind == kind).cloned()
    }
}

impl Subscribe for Recorder {
    fn on_event(&self, event: &Event) {
        self.0.lock().unwrap().push(event.clone());
    }
    fn name(&self) -> &'static str {
        "recorder"
    }
}

/// Test double recording how often the pool is released.
struct CountingPool {
    inner: TokioPool,
    shutdowns: Arc<AtomicUsize>,
}

impl CountingPool {
    fn new() -> (Self, Arc<AtomicUsize>) {
        let shutdowns = Arc::new(AtomicUsize::new(0));
        let pool = Self {
            inner: TokioPool::new(10).unwrap(),
            shutdowns: Arc::clone(&shutdowns),
        };
        (pool, shutdowns)
    }
}

impl ExecPool for CountingPool {
    fn spawn(&self, name: &'static str, fut: PoolFuture) -> Result<(), PoolError> {
        self.inner.spawn(name, fut)
    }

    fn token(&self) -> CancellationToken {
        self.inner.token()
    }

    fn shutdown(&self) {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
        self.inner.shutdown();
    }
}

fn primary_ok(secs: u64) -> TaskRef<String> {
    FnTask::arc("primary", move |_ctx: CancellationToken| async move {
        sleep(Duration::from_secs(secs)).await;
        Ok("Primary".to_string())
    })
}

fn primary_err(secs: u64) -> TaskRef<String> {
    FnTask::arc("primary", move |_ctx: CancellationToken| async move {
        sleep(Duration::from_secs(secs)).await;
        Err(TaskError::fail("primary broke"))
    })
}

fn secondary_ok(secs: u64) -> TaskRef<Option<String>> {
    FnTask::arc("secondary", move |_ctx: CancellationToken| async move {
        sleep(Duration::from_secs(secs)).await;
        Ok(Some("Secondary".to_string()))
    })
}

fn secondary_err(secs: u64) -> TaskRef<Option<String>> {
    FnTask::arc("secondary", move |_ctx: CancellationToken| async move {
        sleep(Duration::from_secs(secs)).await;
        Err(TaskError::fail("secondary broke"))
    })
}

fn coordinator(
    primary: TaskRef<String>,
    secondary: TaskRef<Option<String>>,
) -> (Coordinator, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let c = Coordinator::new(CoordinatorConfig::default(), primary, secondary)
        .unwrap()
        .with_subscribers(vec![recorder.clone() as Arc<dyn Subscribe>]);
    (c, recorder)
}

#[tokio::test(start_paused = true)]
async fn both_succeed() {
    let (c, events) = coordinator(primary_ok(6), secondary_ok(8));
    let tracker = RunTracker::new(RunId::new());
    let (pool, shutdowns) = CountingPool::new();

    let result = c.run_tracked(pool, &tracker).await.unwrap();

    assert_eq!(result.render(), "PrimarySecondary");
    assert_eq!(
        tracker.history(),
        vec![
            RunState::Started,
            RunState::Running,
            RunState::PrimaryDone,
            RunState::SecondaryResolved,
            RunState::Combined,
            RunState::Done,
        ]
    );
    assert!(events.find(EventKind::SecondaryResolved).is_some());
    assert!(events.find(EventKind::SecondaryDegraded).is_none());
    assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn secondary_failure_degrades_result() {
    let (c, events) = coordinator(primary_ok(6), secondary_err(1));

    let result = c.run().await.unwrap();

    assert_eq!(result.render(), "Primary");
    assert!(result.is_degraded());
    let degraded = events.find(EventKind::SecondaryDegraded).unwrap();
    assert_eq!(degraded.timeout_ms, None);
    assert_eq!(
        degraded.reason.as_deref(),
        Some("secondary task failed: secondary broke")
    );
    assert!(events.find(EventKind::TimeoutHit).is_none());
}

#[tokio::test(start_paused = true)]
async fn secondary_timeout_degrades_result() {
    let (c, events) = coordinator(primary_ok(6), secondary_ok(13));

    let result = c.run().await.unwrap();

    assert_eq!(result.render(), "Primary");
    let degraded = events.find(EventKind::SecondaryDegraded).unwrap();
    assert_eq!(degraded.timeout_ms, Some(10_000));
    assert!(events.find(EventKind::TimeoutHit).is_some());
    assert!(events.find(EventKind::SecondaryResolved).is_none());
}

#[tokio::test(start_paused = true)]
async fn primary_failure_is_fatal() {
    let (c, events) = coordinator(primary_err(1), secondary_ok(8));
    let tracker = RunTracker::new(RunId::new());
    let (pool, shutdowns) = CountingPool::new();

    let err = c.run_tracked(pool, &tracker).await.unwrap_err();

    assert_eq!(
        err,
        CoordinatorError::PrimaryFailed(TaskError::fail("primary broke"))
    );
    assert!(err.is_fatal());
    assert_eq!(tracker.current(), RunState::PrimaryFailed);
    assert!(events.find(EventKind::Combined).is_none());
    assert!(events.find(EventKind::PrimaryFatal).is_some());
    assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn primary_failure_wins_over_failed_secondary() {
    let (c, events) = coordinator(primary_err(2), secondary_err(1));

    let err = c.run().await.unwrap_err();

    assert!(matches!(err, CoordinatorError::PrimaryFailed(_)));
    // The secondary failure was still reported as soon as it happened.
    let kinds = events.kinds();
    let degraded = kinds.iter().position(|k| *k == EventKind::SecondaryDegraded);
    let fatal = kinds.iter().position(|k| *k == EventKind::PrimaryFatal);
    assert!(degraded.unwrap() < fatal.unwrap());
}

#[tokio::test(start_paused = true)]
async fn primary_failure_wins_over_timed_out_secondary() {
    let (c, _) = coordinator(primary_err(12), secondary_ok(30));

    let err = c.run().await.unwrap_err();

    assert!(err.is_fatal());
}

#[tokio::test(start_paused = true)]
async fn primary_failure_does_not_wait_for_secondary() {
    let (c, _) = coordinator(primary_err(1), secondary_ok(8));
    let start = Instant::now();

    c.run().await.unwrap_err();

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(1));
    assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn timeout_clock_runs_alongside_primary() {
    let (c, _) = coordinator(primary_ok(6), secondary_ok(30));
    let start = Instant::now();

    c.run().await.unwrap();

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(10));
    assert!(elapsed < Duration::from_secs(11), "took {elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn slow_primary_outlasts_timeout() {
    let (c, events) = coordinator(primary_ok(20), secondary_ok(13));

    let result = c.run().await.unwrap();

    assert_eq!(result.render(), "Primary");
    assert!(events.find(EventKind::TimeoutHit).is_some());
}

#[tokio::test(start_paused = true)]
async fn secondary_absent_value_is_not_a_failure() {
    let secondary = FnTask::arc("secondary", |_ctx: CancellationToken| async {
        Ok::<Option<String>, TaskError>(None)
    });
    let (c, events) = coordinator(primary_ok(1), secondary);

    let result = c.run().await.unwrap();

    assert_eq!(result.render(), "Primary");
    assert!(events.find(EventKind::SecondaryResolved).is_some());
    assert!(events.find(EventKind::SecondaryDegraded).is_none());
}

#[tokio::test(start_paused = true)]
async fn panicking_secondary_is_recoverable() {
    let secondary = FnTask::arc("secondary", |_ctx: CancellationToken| async {
        if true {
            panic!("secondary blew up");
        }
        Ok::<Option<String>, TaskError>(None)
    });
    let (c, events) = coordinator(primary_ok(1), secondary);

    let result = c.run().await.unwrap();

    assert_eq!(result.render(), "Primary");
    let degraded = events.find(EventKind::SecondaryDegraded).unwrap();
    assert_eq!(
        degraded.reason.as_deref(),
        Some("secondary task failed: task ended without reporting a result")
    );
}

#[tokio::test(start_paused = true)]
async fn panicking_primary_is_fatal() {
    let primary = FnTask::arc("primary", |_ctx: CancellationToken| async {
        if true {
            panic!("primary blew up");
        }
        Ok::<String, TaskError>(String::new())
    });
    let (c, _) = coordinator(primary, secondary_ok(1));

    let err = c.run().await.unwrap_err();

    assert_eq!(err, CoordinatorError::PrimaryFailed(TaskError::Lost));
}

#[tokio::test(start_paused = true)]
async fn runs_are_repeatable() {
    let (c, _) = coordinator(primary_ok(6), secondary_err(1));

    let first = c.run().await.unwrap();
    let second = c.run().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test(start_paused = true)]
async fn pool_is_released_once_per_run() {
    let (ok, _) = coordinator(primary_ok(1), secondary_ok(1));
    let (fatal, _) = coordinator(primary_err(1), secondary_ok(1));

    for c in [&ok, &fatal, &ok] {
        let (pool, shutdowns) = CountingPool::new();
        let _ = c.run_on(pool).await;
        assert_eq!(shutdowns.load(Ordering::SeqCst), 1);
    }
}

#[tokio::test(start_paused = true)]
async fn pool_shutdown_is_the_last_event() {
    let (c, events) = coordinator(primary_err(1), secondary_ok(5));

    c.run().await.unwrap_err();

    assert_eq!(events.kinds().last(), Some(&EventKind::PoolShutdown));
    assert_eq!(events.kinds().first(), Some(&EventKind::RunStarted));
}

#[test]
fn rejects_invalid_config() {
    let cfg = CoordinatorConfig::default().with_pool_size(1);
    let err = Coordinator::new(cfg, primary_ok(1), secondary_ok(1)).err().unwrap();
    assert!(matches!(err, CoordinatorError::Config(_)));
}
