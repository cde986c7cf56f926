use axum::extract::{Query, State};
use axum::Json;
use chronos_core::schedule::{self, DayView};
use chronos_core::types::{ClockTime, DayOfWeek, Moment};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, serde::Deserialize)]
pub struct ScheduleParams {
    /// Day to show; defaults to today.
    pub day: Option<String>,
    /// Override the current time (HH:mm).
    pub at: Option<String>,
    /// Override the current day of week.
    pub today: Option<String>,
}

impl ScheduleParams {
    fn resolve(&self) -> chronos_core::Result<(DayOfWeek, Moment)> {
        let mut now = Moment::now();
        if let Some(today) = self.today.as_deref() {
            now.day = today.parse()?;
        }
        if let Some(at) = self.at.as_deref() {
            now.time = at.parse::<ClockTime>()?;
        }
        let day = match self.day.as_deref() {
            Some(d) => d.parse()?,
            None => now.day,
        };
        Ok((day, now))
    }
}

/// GET /api/schedule: the selected day's activities with derived status.
pub async fn get_schedule(
    State(app): State<AppState>,
    Query(params): Query<ScheduleParams>,
) -> Result<Json<DayView>, AppError> {
    let (day, now) = params.resolve()?;
    let activities = app.with_store(|store| store.list_activities()).await?;
    Ok(Json(schedule::day_view(&activities, day, now)))
}
