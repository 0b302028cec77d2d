//! Monitor subcommand -- watch for the target app entering the foreground.
//!
//! Runs the poller with a persistent status line. On a hit the monitor
//! winds down and hands off to the chat view with the stored label.

use chrono::Utc;
use clap::Subcommand;
use unplug_core::storage::Config;
use unplug_core::usage::{ForegroundHit, UsagePoller};

use crate::common;

#[derive(Subcommand)]
pub enum MonitorAction {
    /// Start the foreground monitor
    Start {
        /// App identifier to watch (defaults to monitor.target_app)
        #[arg(long)]
        target: Option<String>,
        /// Check a single window and exit
        #[arg(long)]
        once: bool,
    },
}

pub fn run(action: MonitorAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        MonitorAction::Start { target, once } => start(target, once),
    }
}

fn start(target: Option<String>, once: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let target = target.unwrap_or_else(|| config.monitor.target_app.clone());

    let Some(db) = common::open_usage_db()? else {
        return Ok(());
    };
    let poller =
        UsagePoller::new(db, target).with_interval_secs(config.monitor.poll_interval_secs);

    if once {
        return match poller.check(Utc::now())? {
            Some(hit) => open_chat(&hit),
            None => {
                println!(
                    "no foreground transition for {}",
                    poller.target_app()
                );
                Ok(())
            }
        };
    }

    let rt = common::runtime()?;
    let hit = rt.block_on(async move {
        println!(
            "Unplug monitor running -- watching {} (press ctrl-c to stop)",
            poller.target_app()
        );
        let (handle, mut hits) = poller.spawn();
        tokio::select! {
            hit = hits.recv() => {
                handle.join().await;
                hit
            }
            _ = tokio::signal::ctrl_c() => {
                handle.join().await;
                None
            }
        }
    });

    match hit {
        Some(hit) => open_chat(&hit),
        None => Ok(()),
    }
}

fn open_chat(hit: &ForegroundHit) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "{} moved to foreground at {} -- opening chat",
        hit.app_id,
        hit.at.format("%H:%M:%S")
    );
    // Chat picks up the stored personality label itself.
    crate::commands::chat::run(None)
}
