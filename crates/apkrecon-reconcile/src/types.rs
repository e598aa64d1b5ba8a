use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A unit of work handed over by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub key: String,
    /// Opaque to the reconciler; carried for logging only.
    #[serde(default)]
    pub priority: i64,
}

impl ProcessRequest {
    pub fn new(key: impl Into<String>, priority: i64) -> Self {
        Self {
            key: key.into(),
            priority,
        }
    }
}

/// Positive answer to the dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    /// Zero means no requeue was requested.
    pub requeue_after_seconds: u64,
}

impl ProcessResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A response asking for another attempt after `after`. Fractional seconds
    /// round up, so a non-zero delay never turns into "no requeue".
    pub fn requeue(after: Duration) -> Self {
        let mut secs = after.as_secs();
        if after.subsec_nanos() > 0 {
            secs = secs.saturating_add(1);
        }
        Self {
            requeue_after_seconds: secs,
        }
    }

    pub fn is_requeue(&self) -> bool {
        self.requeue_after_seconds > 0
    }
}
