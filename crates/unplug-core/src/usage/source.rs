//! Read-only seams over the OS usage-statistics collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::UsageError;

/// Accumulated foreground time for one app within a queried window.
///
/// A window may contain several records for the same app id; consumers
/// sum them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub app_id: String,
    pub foreground_ms: u64,
}

/// A foreground/background transition reported for one app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageEvent {
    pub app_id: String,
    pub kind: UsageEventKind,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageEventKind {
    MovedToForeground,
    MovedToBackground,
}

/// Queryable usage-statistics source.
///
/// Implementations are read-only; Unplug never writes usage data.
pub trait UsageSource {
    /// Per-app foreground totals for `[start, end)`.
    fn usage_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<UsageRecord>, UsageError>;

    /// Transition events for `[start, end)`, in chronological order.
    fn events_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<UsageEvent>, UsageError>;
}
