use crate::error::{ChronosError, Result};
use crate::types::{ClockTime, DayOfWeek, Status, DEFAULT_CATEGORY, DEFAULT_COLOR};
use serde::{Deserialize, Serialize};

/// A titled time block on one day of the week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: i64,
    pub title: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub day_of_week: DayOfWeek,
    pub category: Option<String>,
    pub color: Option<String>,
    pub completed: bool,
}

impl Activity {
    /// Copy with `completed` flipped.
    pub fn toggled(&self) -> Activity {
        Activity {
            completed: !self.completed,
            ..self.clone()
        }
    }

    /// Completed or already over: rendered de-emphasized.
    pub fn is_dimmed(&self, status: Status) -> bool {
        self.completed || status == Status::Past
    }
}

/// Fields submitted to create an activity. Doubles as the client's draft
/// form state before the user confirms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    pub title: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub day_of_week: DayOfWeek,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl NewActivity {
    /// Empty form for `day` with the given default window.
    pub fn draft(day: DayOfWeek, start: ClockTime, end: ClockTime) -> Self {
        Self {
            title: String::new(),
            start_time: start,
            end_time: end,
            day_of_week: day,
            category: Some(DEFAULT_CATEGORY.to_string()),
            color: Some(DEFAULT_COLOR.to_string()),
        }
    }

    /// Rejects a blank title. An end time before the start time is accepted.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ChronosError::EmptyTitle);
        }
        Ok(())
    }

    /// `true` when the submitted fields match `activity`, ignoring identity
    /// and completion.
    pub fn matches(&self, activity: &Activity) -> bool {
        self.title == activity.title
            && self.start_time == activity.start_time
            && self.end_time == activity.end_time
            && self.day_of_week == activity.day_of_week
            && self.category == activity.category
            && self.color == activity.color
    }
}

// ---------------------------------------------------------------------------
// List operations
// ---------------------------------------------------------------------------

/// Activities scheduled on `day`, earliest start first. The sort is stable,
/// so equal start times keep their order from `activities`.
pub fn for_day(activities: &[Activity], day: DayOfWeek) -> Vec<&Activity> {
    let mut selected: Vec<&Activity> = activities
        .iter()
        .filter(|a| a.day_of_week == day)
        .collect();
    selected.sort_by_key(|a| a.start_time);
    selected
}

/// Flip `completed` on the activity with `id`. Returns `false` when absent.
pub fn toggle_in(activities: &mut [Activity], id: i64) -> bool {
    match activities.iter_mut().find(|a| a.id == id) {
        Some(a) => {
            a.completed = !a.completed;
            true
        }
        None => false,
    }
}

/// Drop the activity with `id`. Missing ids leave the list unchanged.
pub fn remove_from(activities: &mut Vec<Activity>, id: i64) {
    activities.retain(|a| a.id != id);
}

/// Human-readable summary: "2/5 completed"
pub fn summarize<'a>(activities: impl IntoIterator<Item = &'a Activity>) -> String {
    let (done, total) = activities
        .into_iter()
        .fold((0, 0), |(d, t), a| (d + usize::from(a.completed), t + 1));
    format!("{done}/{total} completed")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn activity(id: i64, title: &str, start: &str, end: &str, day: u8) -> Activity {
        Activity {
            id,
            title: title.into(),
            start_time: t(start),
            end_time: t(end),
            day_of_week: DayOfWeek::new(day).unwrap(),
            category: None,
            color: None,
            completed: false,
        }
    }

    #[test]
    fn for_day_filters_and_sorts() {
        let list = vec![
            activity(1, "Lunch", "12:00", "13:00", 1),
            activity(2, "Gym", "07:00", "08:00", 1),
            activity(3, "Other day", "06:00", "07:00", 2),
            activity(4, "Standup", "09:00", "09:15", 1),
        ];
        let ids: Vec<i64> = for_day(&list, DayOfWeek::MONDAY).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 4, 1]);
    }

    #[test]
    fn for_day_keeps_source_order_on_ties() {
        let list = vec![
            activity(7, "B", "09:00", "10:00", 3),
            activity(3, "A", "09:00", "09:30", 3),
            activity(5, "C", "08:00", "09:00", 3),
        ];
        let ids: Vec<i64> = for_day(&list, DayOfWeek::WEDNESDAY).iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![5, 7, 3]);
    }

    #[test]
    fn for_day_empty_when_nothing_scheduled() {
        let list = vec![activity(1, "Gym", "07:00", "08:00", 1)];
        assert!(for_day(&list, DayOfWeek::SUNDAY).is_empty());
    }

    #[test]
    fn for_day_contains_exactly_matching_days() {
        let list: Vec<Activity> = (0..21)
            .map(|i| {
                let start = format!("{:02}:{:02}", (i * 7) % 24, (i * 13) % 60);
                activity(i as i64, "x", &start, "23:59", (i % 7) as u8)
            })
            .collect();
        for day in DayOfWeek::all() {
            let selected = for_day(&list, day);
            assert_eq!(selected.len(), 3);
            assert!(selected.iter().all(|a| a.day_of_week == day));
            assert!(selected
                .windows(2)
                .all(|w| w[0].start_time.to_string() <= w[1].start_time.to_string()));
        }
    }

    #[test]
    fn toggle_is_an_involution() {
        let a = activity(1, "Read", "20:00", "21:00", 4);
        assert!(a.toggled().completed);
        assert_eq!(a.toggled().toggled(), a);
    }

    #[test]
    fn toggle_in_missing_id_is_noop() {
        let mut list = vec![activity(1, "Read", "20:00", "21:00", 4)];
        assert!(!toggle_in(&mut list, 99));
        assert!(!list[0].completed);
        assert!(toggle_in(&mut list, 1));
        assert!(list[0].completed);
    }

    #[test]
    fn remove_from_missing_id_leaves_list_unchanged() {
        let mut list = vec![activity(1, "Read", "20:00", "21:00", 4)];
        let before = list.clone();
        remove_from(&mut list, 42);
        assert_eq!(list, before);
        remove_from(&mut list, 1);
        assert!(list.is_empty());
    }

    #[test]
    fn blank_title_rejected() {
        let mut draft = NewActivity::draft(DayOfWeek::MONDAY, t("09:00"), t("10:00"));
        assert!(matches!(draft.validate(), Err(ChronosError::EmptyTitle)));
        draft.title = "   ".into();
        assert!(draft.validate().is_err());
        draft.title = "Write".into();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn end_before_start_is_accepted() {
        let mut draft = NewActivity::draft(DayOfWeek::MONDAY, t("18:00"), t("08:00"));
        draft.title = "Night shift".into();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn new_activity_uses_camel_case_on_the_wire() {
        let body = r#"{"title":"Run","startTime":"06:00","endTime":"06:45","dayOfWeek":2}"#;
        let n: NewActivity = serde_json::from_str(body).unwrap();
        assert_eq!(n.day_of_week, DayOfWeek::TUESDAY);
        assert_eq!(n.category, None);

        let json = serde_json::to_value(activity(1, "Run", "06:00", "06:45", 2)).unwrap();
        assert_eq!(json["startTime"], "06:00");
        assert_eq!(json["dayOfWeek"], 2);
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn dimmed_when_completed_or_past() {
        let a = activity(1, "Read", "20:00", "21:00", 4);
        assert!(!a.is_dimmed(Status::Now));
        assert!(a.is_dimmed(Status::Past));
        assert!(a.toggled().is_dimmed(Status::Future));
    }

    #[test]
    fn summary_counts_completed() {
        let list = vec![
            activity(1, "A", "08:00", "09:00", 1).toggled(),
            activity(2, "B", "09:00", "10:00", 1),
        ];
        assert_eq!(summarize(&list), "1/2 completed");
    }
}
