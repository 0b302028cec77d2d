//! Screen-time usage -- query seams, daily summary, foreground poller.

mod poller;
mod source;
mod summary;

pub use poller::{
    first_foreground_hit, ForegroundHit, PollerHandle, UsagePoller, DEFAULT_POLL_INTERVAL_SECS,
};
pub use source::{UsageEvent, UsageEventKind, UsageRecord, UsageSource};
pub use summary::{summarize, summarize_today, AppShare, DailySummary};
