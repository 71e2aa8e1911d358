use serde::{Deserialize, Serialize};

/// Which side of the coordination policy a task runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskRole {
    /// Failure halts the run.
    Primary,
    /// Failure or timeout degrades the result to "absent".
    Secondary,
}

impl TaskRole {
    /// Short identifier for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskRole::Primary => "primary",
            TaskRole::Secondary => "secondary",
        }
    }
}
