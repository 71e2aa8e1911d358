use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

mod fn_task;
pub use fn_task::FnTask;

/// A unit of work run by the coordinator.
///
/// `ctx` is cancelled when the owning pool shuts down. Honouring it is
/// optional; the coordinator never depends on it.
#[async_trait]
pub trait Task: Send + Sync + 'static {
    type Output: Send + 'static;

    fn name(&self) -> &'static str;

    async fn run(&self, ctx: CancellationToken) -> Result<Self::Output, TaskError>;
}

pub type TaskRef<T> = Arc<dyn Task<Output = T>>;
