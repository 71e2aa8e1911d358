//! Execution contexts for coordinator tasks.
//!
//! A pool hands out concurrent slots for spawned futures and owns the
//! cancellation root their tasks observe. [`PoolGuard`] ties the pool's
//! lifetime to one coordinator run and releases it exactly once.

use std::{future::Future, ops::Deref, pin::Pin};

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::PoolError;

mod tokio_pool;
pub use tokio_pool::TokioPool;

pub type PoolFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

pub trait ExecPool: Send + Sync {
    /// Run `fut` on its own execution context.
    fn spawn(&self, name: &'static str, fut: PoolFuture) -> Result<(), PoolError>;

    /// Cancellation token for a task spawned on this pool.
    fn token(&self) -> CancellationToken;

    /// Release the pool. Work still in flight is abandoned.
    fn shutdown(&self);
}

/// Owns a pool for one run and shuts it down when dropped.
pub struct PoolGuard<P: ExecPool> {
    pool: P,
}

impl<P: ExecPool> PoolGuard<P> {
    pub fn new(pool: P) -> Self {
        Self { pool }
    }
}

impl<P: ExecPool> Deref for PoolGuard<P> {
    type Target = P;

    fn deref(&self) -> &P {
        &self.pool
    }
}

impl<P: ExecPool> Drop for PoolGuard<P> {
    fn drop(&mut self) {
        self.pool.shutdown();
        debug!(target: "tandem.pool", "pool released");
    }
}
