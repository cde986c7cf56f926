pub mod activity;
pub mod config;
pub mod day;
pub mod init;
pub mod serve;
pub mod template;
pub mod watch;

use anyhow::Context;
use chronos_core::types::DayOfWeek;

/// Parse an optional day argument, defaulting to today.
pub(crate) fn day_or_today(day: Option<&str>) -> anyhow::Result<DayOfWeek> {
    match day {
        Some(d) => d
            .parse::<DayOfWeek>()
            .with_context(|| format!("invalid --day '{d}'")),
        None => Ok(DayOfWeek::today()),
    }
}
