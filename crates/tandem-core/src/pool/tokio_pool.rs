use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio_util::{sync::CancellationToken, task::TaskTracker};
use tracing::{debug, trace};

use tandem_model::MIN_POOL_SIZE;

use crate::{
    error::PoolError,
    pool::{ExecPool, PoolFuture},
};

/// Pool of `size` concurrent slots on the ambient tokio runtime.
///
/// Spawned futures beyond `size` wait for a free slot. Shutdown closes the
/// pool to new work and cancels whatever is still running or waiting.
pub struct TokioPool {
    size: usize,
    slots: Arc<Semaphore>,
    tracker: TaskTracker,
    token: CancellationToken,
}

impl TokioPool {
    pub fn new(size: usize) -> Result<Self, PoolError> {
        if size < MIN_POOL_SIZE {
            return Err(PoolError::TooSmall {
                size,
                min: MIN_POOL_SIZE,
            });
        }
        Ok(Self {
            size,
            slots: Arc::new(Semaphore::new(size)),
            tracker: TaskTracker::new(),
            token: CancellationToken::new(),
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of spawned futures that have not finished yet.
    #[inline]
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.tracker.is_closed()
    }

    /// Wait until every spawned future has finished. Only completes after shutdown.
    pub async fn drained(&self) {
        self.tracker.wait().await;
    }
}

impl ExecPool for TokioPool {
    fn spawn(&self, name: &'static str, fut: PoolFuture) -> Result<(), PoolError> {
        if self.tracker.is_closed() {
            return Err(PoolError::Closed);
        }
        let slots = Arc::clone(&self.slots);
        let token = self.token.clone();

        self.tracker.spawn(async move {
            let Ok(_slot) = slots.acquire_owned().await else {
                trace!(target: "tandem.pool", task = name, "pool closed before a slot was free");
                return;
            };
            tokio::select! {
                _ = fut => trace!(target: "tandem.pool", task = name, "pool task finished"),
                _ = token.cancelled() => debug!(target: "tandem.pool", task = name, "pool task abandoned"),
            }
        });
        Ok(())
    }

    fn token(&self) -> CancellationToken {
        self.token.child_token()
    }

    fn shutdown(&self) {
        self.tracker.close();
        self.slots.close();
        self.token.cancel();
        debug!(target: "tandem.pool", in_flight = self.tracker.len(), "pool shut down");
    }
}
