use std::fmt;

use serde::{Deserialize, Serialize};

/// Merged output of a successful run.
///
/// The primary value is always present; the secondary value is absent when the
/// secondary task failed or lost the race against its timeout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedResult {
    primary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    secondary: Option<String>,
}

impl CombinedResult {
    pub fn new(primary: impl Into<String>, secondary: Option<String>) -> Self {
        Self {
            primary: primary.into(),
            secondary,
        }
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn secondary(&self) -> Option<&str> {
        self.secondary.as_deref()
    }

    /// Returns `true` if the secondary contribution was dropped.
    pub fn is_degraded(&self) -> bool {
        self.secondary.is_none()
    }

    /// Primary value immediately followed by the secondary value, if any.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CombinedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.primary)?;
        if let Some(secondary) = &self.secondary {
            f.write_str(secondary)?;
        }
        Ok(())
    }
}
