mod run_id;
pub use run_id::RunId;

mod task_role;
pub use task_role::TaskRole;

mod run_state;
pub use run_state::RunState;

mod combined;
pub use combined::CombinedResult;

/// Timeout value in milliseconds.
pub type TimeoutMs = u64;
