//! Primary/secondary task coordination.
//!
//! A run launches three execution contexts on one pool: the secondary task,
//! a timer armed with the secondary timeout, and the primary task. The
//! secondary and the timer race; whichever settles first decides the
//! secondary contribution. A secondary failure or timeout is logged and
//! absorbed as an absent value. A primary failure is returned to the caller
//! as fatal, regardless of how the race went.

use std::sync::Arc;

use tokio::{sync::oneshot, time::Instant};
use tracing::{debug, error, info, instrument, warn};

use tandem_model::{CombinedResult, CoordinatorConfig, RunId, RunState, TaskRole};

use crate::{
    error::{CoordinatorError, SecondaryFailure, TaskError},
    events::{Bus, Event, EventKind, Subscribe},
    pool::{ExecPool, PoolGuard, TokioPool},
    state::RunTracker,
    task::TaskRef,
};

type Outcome<T> = oneshot::Receiver<Result<T, TaskError>>;

const TIMER_NAME: &str = "secondary-timeout";

pub struct Coordinator {
    config: CoordinatorConfig,
    primary: TaskRef<String>,
    secondary: TaskRef<Option<String>>,
    bus: Bus,
}

impl Coordinator {
    pub fn new(
        config: CoordinatorConfig,
        primary: TaskRef<String>,
        secondary: TaskRef<Option<String>>,
    ) -> Result<Self, CoordinatorError> {
        config.validate()?;
        Ok(Self {
            config,
            primary,
            secondary,
            bus: Bus::default(),
        })
    }

    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.bus = Bus::new(subscribers);
        self
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Run once on a fresh [`TokioPool`] sized from the config.
    pub async fn run(&self) -> Result<CombinedResult, CoordinatorError> {
        let pool = TokioPool::new(self.config.pool_size)?;
        self.run_on(pool).await
    }

    /// Run once on `pool`. The pool is shut down before this returns.
    pub async fn run_on<P: ExecPool>(&self, pool: P) -> Result<CombinedResult, CoordinatorError> {
        let tracker = RunTracker::new(RunId::new());
        self.run_tracked(pool, &tracker).await
    }

    /// Same as [`Coordinator::run_on`], recording state transitions in `tracker`.
    #[instrument(level = "debug", skip_all, fields(run = %tracker.run()))]
    pub async fn run_tracked<P: ExecPool>(
        &self,
        pool: P,
        tracker: &RunTracker,
    ) -> Result<CombinedResult, CoordinatorError> {
        let pool = PoolGuard::new(pool);
        let res = self.coordinate(&*pool, tracker).await;

        drop(pool);
        self.bus.publish(Event::new(EventKind::PoolShutdown, tracker.run()));
        res
    }

    async fn coordinate<P: ExecPool>(
        &self,
        pool: &P,
        tracker: &RunTracker,
    ) -> Result<CombinedResult, CoordinatorError> {
        let run = tracker.run();
        self.bus.publish(Event::new(EventKind::RunStarted, run));

        let secondary_rx = self.launch(pool, run, TaskRole::Secondary, Arc::clone(&self.secondary))?;
        let timeout_rx = self.arm_timeout(pool)?;
        let primary_rx = self.launch(pool, run, TaskRole::Primary, Arc::clone(&self.primary))?;
        tracker.advance(RunState::Running)?;

        // Both waits are driven together so a secondary failure is reported
        // while the primary is still running; a primary failure short-circuits.
        let primary = async {
            primary_rx
                .await
                .unwrap_or(Err(TaskError::Lost))
                .map_err(CoordinatorError::PrimaryFailed)
        };
        let secondary = async {
            Ok::<_, CoordinatorError>(self.race_secondary(run, secondary_rx, timeout_rx).await)
        };

        let (primary, secondary) = match tokio::try_join!(primary, secondary) {
            Ok(pair) => pair,
            Err(err) => {
                tracker.advance(RunState::PrimaryFailed)?;
                error!(task = self.primary.name(), reason = %err, "primary task failed; halting run");
                self.bus.publish(
                    Event::new(EventKind::PrimaryFatal, run)
                        .with_task(self.primary.name(), TaskRole::Primary)
                        .with_reason(err.to_string()),
                );
                return Err(err);
            }
        };
        tracker.advance(RunState::PrimaryDone)?;
        tracker.advance(RunState::SecondaryResolved)?;

        let combined = CombinedResult::new(primary, secondary);
        tracker.advance(RunState::Combined)?;
        info!(result = %combined, degraded = combined.is_degraded(), "run combined");
        self.bus
            .publish(Event::new(EventKind::Combined, run).with_reason(combined.render()));

        tracker.advance(RunState::Done)?;
        Ok(combined)
    }

    /// Spawn `task` and return the channel its result arrives on.
    fn launch<P, T>(
        &self,
        pool: &P,
        run: RunId,
        role: TaskRole,
        task: TaskRef<T>,
    ) -> Result<Outcome<T>, CoordinatorError>
    where
        P: ExecPool,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let ctx = pool.token();
        let bus = self.bus.clone();
        let name = task.name();

        pool.spawn(
            name,
            Box::pin(async move {
                bus.publish(Event::new(EventKind::TaskStarting, run).with_task(name, role));
                let res = task.run(ctx).await;
                match &res {
                    Ok(_) => {
                        bus.publish(Event::new(EventKind::TaskCompleted, run).with_task(name, role))
                    }
                    Err(e) => bus.publish(
                        Event::new(EventKind::TaskFailed, run)
                            .with_task(name, role)
                            .with_reason(e.to_string()),
                    ),
                }
                // Nobody listens any more if this task lost its race.
                let _ = tx.send(res);
            }),
        )?;
        debug!(task = name, role = role.as_str(), "task launched");
        Ok(rx)
    }

    /// Spawn the timer racing the secondary. Its clock starts now.
    fn arm_timeout<P: ExecPool>(&self, pool: &P) -> Result<oneshot::Receiver<()>, CoordinatorError> {
        let (tx, rx) = oneshot::channel();
        let deadline = Instant::now() + self.config.secondary_timeout();

        pool.spawn(
            TIMER_NAME,
            Box::pin(async move {
                tokio::time::sleep_until(deadline).await;
                let _ = tx.send(());
            }),
        )?;
        debug!(timeout_ms = self.config.secondary_timeout_ms, "secondary timeout armed");
        Ok(rx)
    }

    /// First of {secondary result, timeout} wins; failures degrade to `None`.
    async fn race_secondary(
        &self,
        run: RunId,
        secondary_rx: Outcome<Option<String>>,
        timeout_rx: oneshot::Receiver<()>,
    ) -> Option<String> {
        let name = self.secondary.name();
        let timeout_ms = self.config.secondary_timeout_ms;

        let outcome = tokio::select! {
            res = secondary_rx => res
                .unwrap_or(Err(TaskError::Lost))
                .map_err(SecondaryFailure::Task),
            // A timer dropped without firing never counts as a timeout.
            Ok(()) = timeout_rx => {
                self.bus.publish(
                    Event::new(EventKind::TimeoutHit, run)
                        .with_task(name, TaskRole::Secondary)
                        .with_timeout_ms(timeout_ms),
                );
                Err(SecondaryFailure::Timeout { timeout_ms })
            }
        };

        match outcome {
            Ok(value) => {
                debug!(task = name, present = value.is_some(), "secondary resolved");
                self.bus.publish(
                    Event::new(EventKind::SecondaryResolved, run).with_task(name, TaskRole::Secondary),
                );
                value
            }
            Err(failure) => {
                warn!(task = name, "error during the secondary task execution: {failure}");
                let mut event = Event::new(EventKind::SecondaryDegraded, run)
                    .with_task(name, TaskRole::Secondary)
                    .with_reason(failure.to_string());
                if let SecondaryFailure::Timeout { timeout_ms } = failure {
                    event = event.with_timeout_ms(timeout_ms);
                }
                self.bus.publish(event);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests;
