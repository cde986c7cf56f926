use crate::output::{print_json, print_table};
use anyhow::Context;
use chronos_core::activity::{self, Activity, NewActivity};
use chronos_core::store::Store;
use chronos_core::template::NewTemplate;
use chronos_core::types::{ClockTime, DEFAULT_CATEGORY, DEFAULT_COLOR};
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum ActivitySubcommand {
    /// Add an activity
    Add {
        #[arg(required = true)]
        title: Vec<String>,
        /// Start time (HH:mm)
        #[arg(long)]
        start: String,
        /// End time (HH:mm)
        #[arg(long)]
        end: String,
        /// Day of week: 0-6 (Sunday = 0) or a day name (default: today)
        #[arg(long)]
        day: Option<String>,
        #[arg(long, default_value = DEFAULT_CATEGORY)]
        category: String,
        #[arg(long, default_value = DEFAULT_COLOR)]
        color: String,
    },
    /// List activities, optionally for one day
    List {
        #[arg(long)]
        day: Option<String>,
    },
    /// Flip an activity's completed flag
    Toggle { id: i64 },
    /// Delete an activity permanently
    Delete { id: i64 },
    /// Save an activity's title, category and color as a template
    SaveTemplate { id: i64 },
}

pub fn run(root: &Path, subcmd: ActivitySubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ActivitySubcommand::Add {
            title,
            start,
            end,
            day,
            category,
            color,
        } => {
            let new = NewActivity {
                title: title.join(" "),
                start_time: parse_time(&start, "--start")?,
                end_time: parse_time(&end, "--end")?,
                day_of_week: super::day_or_today(day.as_deref())?,
                category: Some(category),
                color: Some(color),
            };
            add(root, &new, json)
        }
        ActivitySubcommand::List { day } => list(root, day.as_deref(), json),
        ActivitySubcommand::Toggle { id } => toggle(root, id, json),
        ActivitySubcommand::Delete { id } => delete(root, id, json),
        ActivitySubcommand::SaveTemplate { id } => save_template(root, id, json),
    }
}

fn open(root: &Path) -> anyhow::Result<Store> {
    Store::open_project(root).context("failed to open store")
}

fn parse_time(value: &str, flag: &str) -> anyhow::Result<ClockTime> {
    value
        .parse::<ClockTime>()
        .with_context(|| format!("invalid {flag} '{value}'"))
}

/// Create `new` and report it. Shared with `template use`.
pub(crate) fn add(root: &Path, new: &NewActivity, json: bool) -> anyhow::Result<()> {
    let store = open(root)?;
    let id = store.create_activity(new)?;
    tracing::debug!(id, "activity created");

    if json {
        print_json(&serde_json::json!({ "id": id, "activity": new }))?;
    } else {
        println!(
            "Added activity [{id}]: {} ({} {}-{})",
            new.title,
            new.day_of_week.short_name(),
            new.start_time,
            new.end_time
        );
    }
    Ok(())
}

fn list(root: &Path, day: Option<&str>, json: bool) -> anyhow::Result<()> {
    let store = open(root)?;
    let all = store.list_activities()?;
    let shown: Vec<&Activity> = match day {
        Some(d) => activity::for_day(&all, super::day_or_today(Some(d))?),
        None => all.iter().collect(),
    };

    if json {
        return print_json(&shown);
    }
    if shown.is_empty() {
        println!("No activities.");
        return Ok(());
    }

    let rows: Vec<Vec<String>> = shown
        .iter()
        .map(|a| {
            vec![
                a.id.to_string(),
                a.day_of_week.short_name().to_string(),
                format!("{}-{}", a.start_time, a.end_time),
                a.title.clone(),
                a.category.clone().unwrap_or_default(),
                a.color.clone().unwrap_or_default(),
                if a.completed { "yes" } else { "" }.to_string(),
            ]
        })
        .collect();
    print_table(
        &["ID", "DAY", "TIME", "TITLE", "CATEGORY", "COLOR", "DONE"],
        rows,
    );
    Ok(())
}

fn toggle(root: &Path, id: i64, json: bool) -> anyhow::Result<()> {
    let store = open(root)?;
    let matched = store.toggle_activity(id)?;
    let completed = store.get_activity(id)?.map(|a| a.completed);

    if json {
        print_json(&serde_json::json!({ "id": id, "success": true, "completed": completed }))?;
    } else if !matched {
        println!("No activity [{id}]; nothing changed");
    } else if completed == Some(true) {
        println!("Completed activity [{id}]");
    } else {
        println!("Reopened activity [{id}]");
    }
    Ok(())
}

fn delete(root: &Path, id: i64, json: bool) -> anyhow::Result<()> {
    let store = open(root)?;
    let matched = store.delete_activity(id)?;

    if json {
        print_json(&serde_json::json!({ "id": id, "success": true }))?;
    } else if matched {
        println!("Deleted activity [{id}]");
    } else {
        println!("No activity [{id}]; nothing changed");
    }
    Ok(())
}

fn save_template(root: &Path, id: i64, json: bool) -> anyhow::Result<()> {
    let store = open(root)?;
    let activity = store
        .get_activity(id)?
        .with_context(|| format!("activity [{id}] not found"))?;
    let template_id = store.create_template(&NewTemplate::from_activity(&activity))?;

    if json {
        print_json(&serde_json::json!({ "id": template_id, "activity_id": id }))?;
    } else {
        println!(
            "Saved template [{template_id}]: {} (from activity [{id}])",
            activity.title
        );
    }
    Ok(())
}
