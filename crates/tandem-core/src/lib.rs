pub mod error;
pub use error::{CoordinatorError, PoolError, SecondaryFailure, TaskError};

pub mod task;
pub use task::{FnTask, Task, TaskRef};

pub mod pool;
pub use pool::{ExecPool, PoolFuture, PoolGuard, TokioPool};

pub mod events;
pub use events::{Bus, Event, EventKind, Subscribe};

pub mod state;
pub use state::RunTracker;

pub mod coordinator;
pub use coordinator::Coordinator;
