//! Daily screen-time summary.
//!
//! One-shot aggregation over [local midnight, now): per-app foreground
//! totals summed across records, ranked, and reduced to the top apps.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, LocalResult, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::UsageError;
use crate::usage::source::{UsageRecord, UsageSource};

/// How many apps the breakdown ranks.
const TOP_APPS: usize = 5;

const MS_PER_MINUTE: u64 = 60 * 1000;

/// One ranked app. `share_pct` is the app's proportion of the ranked
/// apps' combined minutes, not of total usage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppShare {
    pub app_id: String,
    pub minutes: u64,
    pub share_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    /// Total foreground minutes across all apps, not just the ranked ones.
    pub total_minutes: u64,
    pub top: Vec<AppShare>,
}

/// Aggregate today's usage for the window [local midnight, now).
///
/// Returns `None` when the source reports no usage data for the window.
pub fn summarize_today<S: UsageSource>(
    source: &S,
    now: DateTime<Utc>,
) -> Result<Option<DailySummary>, UsageError> {
    let records = source.usage_between(local_midnight(now), now)?;
    Ok(summarize(&records))
}

fn local_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    let local = now.with_timezone(&Local);
    let midnight = local.date_naive().and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        // Midnight skipped by a DST jump; degrade to an empty window.
        LocalResult::None => now,
    }
}

/// Aggregate a record set: sum per app, drop zero-duration apps, rank by
/// usage and keep the top entries.
pub fn summarize(records: &[UsageRecord]) -> Option<DailySummary> {
    if records.is_empty() {
        return None;
    }

    let mut per_app: BTreeMap<&str, u64> = BTreeMap::new();
    let mut total_ms: u64 = 0;
    for record in records {
        total_ms += record.foreground_ms;
        if record.foreground_ms > 0 {
            *per_app.entry(record.app_id.as_str()).or_insert(0) += record.foreground_ms;
        }
    }

    let mut ranked: Vec<(&str, u64)> = per_app.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(TOP_APPS);

    let combined_min: u64 = ranked.iter().map(|(_, ms)| ms / MS_PER_MINUTE).sum();
    let top = ranked
        .into_iter()
        .map(|(app_id, ms)| {
            let minutes = ms / MS_PER_MINUTE;
            let share_pct = if combined_min == 0 {
                0.0
            } else {
                minutes as f64 / combined_min as f64 * 100.0
            };
            AppShare {
                app_id: app_id.to_string(),
                minutes,
                share_pct,
            }
        })
        .collect();

    Some(DailySummary {
        total_minutes: total_ms / MS_PER_MINUTE,
        top,
    })
}
