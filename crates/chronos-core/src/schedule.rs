//! Time-relative status of activities and the per-day view built on it.
//!
//! Status is derived from `(activity, now)` alone and never persisted. An
//! activity on any day other than `now.day` is `Future`, including days that
//! already went by this week.

use crate::activity::{self, Activity};
use crate::types::{DayOfWeek, Moment, Status};
use serde::{Deserialize, Serialize};

pub fn classify(activity: &Activity, now: Moment) -> Status {
    if activity.day_of_week != now.day {
        return Status::Future;
    }
    if now.time > activity.end_time {
        Status::Past
    } else if now.time >= activity.start_time {
        Status::Now
    } else {
        Status::Future
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    Now,
    Ended,
}

impl Badge {
    pub fn label(self) -> &'static str {
        match self {
            Badge::Now => "Now",
            Badge::Ended => "Ended",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    pub status: Status,
    pub dimmed: bool,
    pub badge: Option<Badge>,
}

pub fn present(activity: &Activity, now: Moment) -> Presentation {
    let status = classify(activity, now);
    let badge = match status {
        Status::Now => Some(Badge::Now),
        Status::Past if !activity.completed => Some(Badge::Ended),
        _ => None,
    };
    Presentation {
        status,
        dimmed: activity.is_dimmed(status),
        badge,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledActivity {
    #[serde(flatten)]
    pub activity: Activity,
    #[serde(flatten)]
    pub presentation: Presentation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    pub day: DayOfWeek,
    pub day_name: String,
    pub now: Moment,
    pub entries: Vec<ScheduledActivity>,
    pub is_empty: bool,
    pub summary: String,
}

/// Activities on `day` in start order, each with its status against `now`.
pub fn day_view(activities: &[Activity], day: DayOfWeek, now: Moment) -> DayView {
    let selected = activity::for_day(activities, day);
    let summary = activity::summarize(selected.iter().copied());
    let entries: Vec<ScheduledActivity> = selected
        .into_iter()
        .map(|a| ScheduledActivity {
            activity: a.clone(),
            presentation: present(a, now),
        })
        .collect();
    DayView {
        day,
        day_name: day.name().to_string(),
        now,
        is_empty: entries.is_empty(),
        entries,
        summary,
    }
}
