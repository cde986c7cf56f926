use crate::output::{format_table, print_json};
use anyhow::Context;
use chronos_core::schedule::{self, DayView};
use chronos_core::store::Store;
use chronos_core::types::{ClockTime, DayOfWeek, Moment};
use std::path::Path;

pub struct DayArgs {
    pub day: Option<String>,
    pub at: Option<String>,
    pub today: Option<String>,
    pub next: bool,
    pub prev: bool,
}

impl DayArgs {
    fn resolve(&self) -> anyhow::Result<Moment> {
        let mut now = Moment::now();
        if let Some(today) = self.today.as_deref() {
            now.day = today
                .parse::<DayOfWeek>()
                .with_context(|| format!("invalid --today '{today}'"))?;
        }
        if let Some(at) = self.at.as_deref() {
            now.time = at
                .parse::<ClockTime>()
                .with_context(|| format!("invalid --at '{at}'"))?;
        }
        Ok(now)
    }
}

pub fn run(root: &Path, args: DayArgs, json: bool) -> anyhow::Result<()> {
    let now = args.resolve()?;
    let mut day = match args.day.as_deref() {
        Some(d) => d.parse::<DayOfWeek>().with_context(|| format!("invalid --day '{d}'"))?,
        None => now.day,
    };
    if args.next {
        day = day.next();
    } else if args.prev {
        day = day.previous();
    }

    let activities = Store::open_project(root)
        .context("failed to open store")?
        .list_activities()?;
    let view = schedule::day_view(&activities, day, now);

    if json {
        return print_json(&view);
    }
    for line in render(&view) {
        println!("{line}");
    }
    Ok(())
}

/// The board as printable lines: a heading, then either the entries or an
/// empty-state hint.
pub fn render(view: &DayView) -> Vec<String> {
    let mut lines = vec![format!("{}  ({})", view.day_name, view.summary)];
    if view.is_empty {
        lines.push("No activities scheduled.".to_string());
        return lines;
    }

    let rows: Vec<Vec<String>> = view
        .entries
        .iter()
        .map(|e| {
            let a = &e.activity;
            let check = if a.completed { "[x]" } else { "[ ]" };
            vec![
                check.to_string(),
                a.id.to_string(),
                format!("{}-{}", a.start_time, a.end_time),
                a.title.clone(),
                a.category.clone().unwrap_or_default(),
                e.presentation.status.to_string(),
                e.presentation
                    .badge
                    .map(|b| b.label().to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect();
    lines.extend(format_table(
        &["", "ID", "TIME", "TITLE", "CATEGORY", "STATUS", ""],
        &rows,
    ));
    lines
}
