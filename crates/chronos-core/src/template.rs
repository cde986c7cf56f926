use crate::activity::{Activity, NewActivity};
use crate::error::{ChronosError, Result};
use crate::types::{DayOfWeek, DEFAULT_CATEGORY, DEFAULT_COLOR};
use serde::{Deserialize, Serialize};

/// A reusable (title, category, color) preset. Carries no time or day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub title: String,
    pub category: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTemplate {
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl NewTemplate {
    /// Save-as-template projection. Identical templates are not deduplicated.
    pub fn from_activity(activity: &Activity) -> Self {
        Self {
            title: activity.title.clone(),
            category: activity.category.clone(),
            color: activity.color.clone(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ChronosError::EmptyTitle);
        }
        Ok(())
    }
}

/// Fill `draft` from `template` for the selected `day`.
///
/// The draft's start and end times are kept as they are; category and color
/// fall back to the defaults when the template has none.
pub fn instantiate(template: &Template, day: DayOfWeek, draft: &NewActivity) -> NewActivity {
    NewActivity {
        title: template.title.clone(),
        start_time: draft.start_time,
        end_time: draft.end_time,
        day_of_week: day,
        category: Some(
            template
                .category
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        ),
        color: Some(
            template
                .color
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| DEFAULT_COLOR.to_string()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClockTime, PALETTE};

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn instantiate_falls_back_to_defaults() {
        let tpl = Template {
            id: 1,
            title: "Run".into(),
            category: None,
            color: None,
        };
        let draft = NewActivity::draft(DayOfWeek::MONDAY, t("09:00"), t("10:00"));
        let filled = instantiate(&tpl, DayOfWeek::FRIDAY, &draft);
        assert_eq!(filled.title, "Run");
        assert_eq!(filled.category.as_deref(), Some("General"));
        assert_eq!(filled.color.as_deref(), Some(PALETTE[0]));
        assert_eq!(filled.day_of_week, DayOfWeek::FRIDAY);
    }

    #[test]
    fn instantiate_keeps_draft_times() {
        let tpl = Template {
            id: 2,
            title: "Piano".into(),
            category: Some("Music".into()),
            color: Some("violet".into()),
        };
        let mut draft = NewActivity::draft(DayOfWeek::SUNDAY, t("17:30"), t("18:15"));
        draft.title = "something else".into();
        let filled = instantiate(&tpl, DayOfWeek::SATURDAY, &draft);
        assert_eq!(filled.start_time, t("17:30"));
        assert_eq!(filled.end_time, t("18:15"));
        assert_eq!(filled.category.as_deref(), Some("Music"));
        assert_eq!(filled.color.as_deref(), Some("violet"));
        assert_eq!(filled.title, "Piano");
    }

    #[test]
    fn empty_category_treated_as_absent() {
        let tpl = Template {
            id: 3,
            title: "Chores".into(),
            category: Some(String::new()),
            color: Some(String::new()),
        };
        let draft = NewActivity::draft(DayOfWeek::MONDAY, t("09:00"), t("10:00"));
        let filled = instantiate(&tpl, DayOfWeek::MONDAY, &draft);
        assert_eq!(filled.category.as_deref(), Some("General"));
        assert_eq!(filled.color.as_deref(), Some("blue"));
    }

    #[test]
    fn from_activity_copies_descriptive_fields() {
        let a = Activity {
            id: 9,
            title: "Yoga".into(),
            start_time: t("07:00"),
            end_time: t("08:00"),
            day_of_week: DayOfWeek::TUESDAY,
            category: Some("Health".into()),
            color: None,
            completed: true,
        };
        let tpl = NewTemplate::from_activity(&a);
        assert_eq!(tpl.title, "Yoga");
        assert_eq!(tpl.category.as_deref(), Some("Health"));
        assert_eq!(tpl.color, None);
    }
}
