//! Stats subcommand -- today's screen-time summary.

use chrono::Utc;
use clap::Subcommand;
use unplug_core::usage::summarize_today;

use crate::common;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's screen time
    Today,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StatsAction::Today => render_today(),
    }
}

/// Render total minutes since local midnight and the top-5 breakdown.
pub fn render_today() -> Result<(), Box<dyn std::error::Error>> {
    let Some(db) = common::open_usage_db()? else {
        return Ok(());
    };

    match summarize_today(&db, Utc::now())? {
        Some(summary) => {
            println!("Today's Screen Time: {} minutes", summary.total_minutes);
            for share in &summary.top {
                println!(
                    "  {:<40} {:>5} min  {:>5.1}%",
                    share.app_id, share.minutes, share.share_pct
                );
            }
        }
        None => println!("Screen time data not available."),
    }
    Ok(())
}
