//! Foreground-transition poller.
//!
//! A cooperative periodic task: wait one interval, check the trailing
//! window of usage events, reschedule -- indefinitely until cancelled.
//! Each check scans its batch in chronological order and reports at most
//! one hit; consecutive checks perform no cross-batch suppression.

use chrono::{DateTime, Duration as TimeDelta, Utc};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::error::UsageError;
use crate::usage::source::{UsageEvent, UsageEventKind, UsageSource};

/// Default delay between checks; the scanned window has the same length.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

/// A matched foreground transition of the target app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForegroundHit {
    pub app_id: String,
    pub at: DateTime<Utc>,
}

/// First foreground transition matching the target, scanning the batch
/// chronologically. At most one hit per batch.
pub fn first_foreground_hit(events: &[UsageEvent], target_app: &str) -> Option<ForegroundHit> {
    events
        .iter()
        .find(|e| e.kind == UsageEventKind::MovedToForeground && e.app_id == target_app)
        .map(|e| ForegroundHit {
            app_id: e.app_id.clone(),
            at: e.at,
        })
}

pub struct UsagePoller<S> {
    source: S,
    target_app: String,
    interval_secs: u64,
}

impl<S: UsageSource> UsagePoller<S> {
    pub fn new(source: S, target_app: impl Into<String>) -> Self {
        Self {
            source,
            target_app: target_app.into(),
            interval_secs: DEFAULT_POLL_INTERVAL_SECS,
        }
    }

    pub fn with_interval_secs(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs;
        self
    }

    pub fn target_app(&self) -> &str {
        &self.target_app
    }

    /// Run one check over the trailing window ending at `now`.
    pub fn check(&self, now: DateTime<Utc>) -> Result<Option<ForegroundHit>, UsageError> {
        let window = TimeDelta::seconds(self.interval_secs as i64);
        let events = self.source.events_between(now - window, now)?;
        Ok(first_foreground_hit(&events, &self.target_app))
    }

    /// Spawn the polling loop.
    ///
    /// Hits arrive on the returned channel; the handle cancels future
    /// checks. Stopping is best-effort: the pending delay is cancelled
    /// but an in-flight check runs to completion. A failed check is
    /// logged and the loop keeps going.
    pub fn spawn(self) -> (PollerHandle, mpsc::Receiver<ForegroundHit>)
    where
        S: Send + 'static,
    {
        let (hit_tx, hit_rx) = mpsc::channel(8);
        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            info!(target_app = %self.target_app, interval_secs = self.interval_secs, "usage monitor started");
            loop {
                tokio::select! {
                    _ = tokio::time::sleep(Duration::from_secs(self.interval_secs)) => {}
                    _ = cancel_rx.changed() => break,
                }
                match self.check(Utc::now()) {
                    Ok(Some(hit)) => {
                        debug!(app_id = %hit.app_id, "target app moved to foreground");
                        if hit_tx.send(hit).await.is_err() {
                            // Receiver gone; nobody left to notify.
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(err) => error!(error = %err, "usage check failed"),
                }
                if *cancel_rx.borrow() {
                    break;
                }
            }
            info!("usage monitor stopped");
        });
        (
            PollerHandle {
                cancel: cancel_tx,
                task,
            },
            hit_rx,
        )
    }
}

/// Cancellation handle for a spawned poller.
pub struct PollerHandle {
    cancel: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Suppress future checks and cancel the pending delay.
    pub fn stop(&self) {
        let _ = self.cancel.send(true);
    }

    /// Stop and wait for the loop to wind down.
    pub async fn join(self) {
        self.stop();
        let _ = self.task.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: &str = "com.instagram.android";

    fn event(app_id: &str, kind: UsageEventKind, offset_secs: i64) -> UsageEvent {
        UsageEvent {
            app_id: app_id.to_string(),
            kind,
            at: Utc::now() + TimeDelta::seconds(offset_secs),
        }
    }

    struct FixedSource {
        events: Vec<UsageEvent>,
    }

    impl UsageSource for FixedSource {
        fn usage_between(
            &self,
            _start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> Result<Vec<crate::usage::UsageRecord>, UsageError> {
            Ok(Vec::new())
        }

        fn events_between(
            &self,
            _start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> Result<Vec<UsageEvent>, UsageError> {
            Ok(self.events.clone())
        }
    }

    #[test]
    fn first_match_wins_within_a_batch() {
        let events = vec![
            event("com.example.other", UsageEventKind::MovedToForeground, -9),
            event(TARGET, UsageEventKind::MovedToForeground, -7),
            event(TARGET, UsageEventKind::MovedToForeground, -2),
        ];
        let hit = first_foreground_hit(&events, TARGET).unwrap();
        assert_eq!(hit.at, events[1].at);
    }

    #[test]
    fn background_transitions_do_not_trigger() {
        let events = vec![event(TARGET, UsageEventKind::MovedToBackground, -5)];
        assert!(first_foreground_hit(&events, TARGET).is_none());
    }

    #[test]
    fn other_apps_do_not_trigger() {
        let events = vec![event(
            "com.example.other",
            UsageEventKind::MovedToForeground,
            -5,
        )];
        assert!(first_foreground_hit(&events, TARGET).is_none());
    }

    #[test]
    fn check_reports_at_most_one_hit_per_batch() {
        let poller = UsagePoller::new(
            FixedSource {
                events: vec![
                    event(TARGET, UsageEventKind::MovedToForeground, -8),
                    event(TARGET, UsageEventKind::MovedToBackground, -6),
                    event(TARGET, UsageEventKind::MovedToForeground, -3),
                ],
            },
            TARGET,
        );
        let hit = poller.check(Utc::now()).unwrap().unwrap();
        assert_eq!(hit.app_id, TARGET);
    }

    #[tokio::test(start_paused = true)]
    async fn spawned_loop_forwards_hits() {
        let poller = UsagePoller::new(
            FixedSource {
                events: vec![event(TARGET, UsageEventKind::MovedToForeground, -1)],
            },
            TARGET,
        );
        let (handle, mut hits) = poller.spawn();

        let hit = hits.recv().await.expect("monitor forwards the hit");
        assert_eq!(hit.app_id, TARGET);

        handle.join().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_pending_checks() {
        let poller = UsagePoller::new(FixedSource { events: Vec::new() }, TARGET);
        let (handle, mut hits) = poller.spawn();

        handle.stop();
        // The loop exits without ever producing a hit.
        assert!(hits.recv().await.is_none());
    }
}
