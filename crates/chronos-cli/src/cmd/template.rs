use crate::output::{print_json, print_table};
use anyhow::Context;
use chronos_core::config::Config;
use chronos_core::store::Store;
use chronos_core::template::{self, NewTemplate};
use chronos_core::types::ClockTime;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum TemplateSubcommand {
    /// Save a reusable template
    Add {
        #[arg(required = true)]
        title: Vec<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// List templates
    List,
    /// Delete a template permanently
    Delete { id: i64 },
    /// Create an activity from a template
    Use {
        id: i64,
        /// Day of week (default: today)
        #[arg(long)]
        day: Option<String>,
        /// Start time (HH:mm, default: from config)
        #[arg(long)]
        start: Option<String>,
        /// End time (HH:mm, default: from config)
        #[arg(long)]
        end: Option<String>,
    },
}

pub fn run(root: &Path, subcmd: TemplateSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        TemplateSubcommand::Add {
            title,
            category,
            color,
        } => add(
            root,
            &NewTemplate {
                title: title.join(" "),
                category,
                color,
            },
            json,
        ),
        TemplateSubcommand::List => list(root, json),
        TemplateSubcommand::Delete { id } => delete(root, id, json),
        TemplateSubcommand::Use {
            id,
            day,
            start,
            end,
        } => use_template(root, id, day.as_deref(), start.as_deref(), end.as_deref(), json),
    }
}

fn open(root: &Path) -> anyhow::Result<Store> {
    Store::open_project(root).context("failed to open store")
}

fn add(root: &Path, new: &NewTemplate, json: bool) -> anyhow::Result<()> {
    let id = open(root)?.create_template(new)?;
    if json {
        print_json(&serde_json::json!({ "id": id, "title": new.title }))?;
    } else {
        println!("Saved template [{id}]: {}", new.title);
    }
    Ok(())
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let templates = open(root)?.list_templates()?;
    if json {
        return print_json(&templates);
    }
    if templates.is_empty() {
        println!("No templates.");
        return Ok(());
    }
    let rows = templates
        .iter()
        .map(|t| {
            vec![
                t.id.to_string(),
                t.title.clone(),
                t.category.clone().unwrap_or_default(),
                t.color.clone().unwrap_or_default(),
            ]
        })
        .collect();
    print_table(&["ID", "TITLE", "CATEGORY", "COLOR"], rows);
    Ok(())
}

fn delete(root: &Path, id: i64, json: bool) -> anyhow::Result<()> {
    let matched = open(root)?.delete_template(id)?;
    if json {
        print_json(&serde_json::json!({ "id": id, "success": true }))?;
    } else if matched {
        println!("Deleted template [{id}]");
    } else {
        println!("No template [{id}]; nothing changed");
    }
    Ok(())
}

fn use_template(
    root: &Path,
    id: i64,
    day: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let tpl = open(root)?
        .get_template(id)?
        .with_context(|| format!("template [{id}] not found"))?;

    let day = super::day_or_today(day)?;
    let mut form = config.draft_for(day);
    if let Some(s) = start {
        form.start_time = s
            .parse::<ClockTime>()
            .with_context(|| format!("invalid --start '{s}'"))?;
    }
    if let Some(e) = end {
        form.end_time = e
            .parse::<ClockTime>()
            .with_context(|| format!("invalid --end '{e}'"))?;
    }

    let draft = template::instantiate(&tpl, day, &form);
    super::activity::add(root, &draft, json)
}
