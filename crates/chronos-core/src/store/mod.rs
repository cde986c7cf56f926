//! SQLite-backed storage for activities and templates.
//!
//! One `Store` wraps one connection. Every operation is a single statement,
//! so no cross-table transactions are involved.

mod migrations;

use crate::activity::{Activity, NewActivity};
use crate::config::Config;
use crate::error::Result;
use crate::template::{NewTemplate, Template};
use crate::types::DayOfWeek;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

pub use migrations::run_migrations;

const ACTIVITY_COLUMNS: &str =
    "id, title, startTime, endTime, dayOfWeek, category, color, completed";

const TEMPLATE_COLUMNS: &str = "id, title, category, color";

fn row_to_activity(row: &Row) -> Result<Activity> {
    let start: String = row.get("startTime")?;
    let end: String = row.get("endTime")?;
    let day: i64 = row.get("dayOfWeek")?;
    let completed: Option<i64> = row.get("completed")?;

    Ok(Activity {
        id: row.get("id")?,
        title: row.get("title")?,
        start_time: start.parse()?,
        end_time: end.parse()?,
        day_of_week: DayOfWeek::try_from(day)?,
        category: row.get("category")?,
        color: row.get("color")?,
        completed: completed.unwrap_or(0) != 0,
    })
}

fn row_to_template(row: &Row) -> Result<Template> {
    Ok(Template {
        id: row.get("id")?,
        title: row.get("title")?,
        category: row.get("category")?,
        color: row.get("color")?,
    })
}

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create the database at `path`, applying pending migrations.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open the database configured for the project at `root`.
    pub fn open_project(root: &Path) -> Result<Self> {
        let config = Config::load(root)?;
        Self::open(&config.database_path(root))
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        run_migrations(&mut conn)?;
        Ok(Self { conn })
    }

    // -----------------------------------------------------------------------
    // Activities
    // -----------------------------------------------------------------------

    /// All activities, ordered by start time (then id).
    pub fn list_activities(&self) -> Result<Vec<Activity>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities ORDER BY startTime, id"
        ))?;
        let mut rows = stmt.query([])?;
        let mut activities = Vec::new();
        while let Some(row) = rows.next()? {
            activities.push(row_to_activity(row)?);
        }
        Ok(activities)
    }

    pub fn get_activity(&self, id: i64) -> Result<Option<Activity>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE id = ?1"
        ))?;
        let mut rows = stmt.query(params![id])?;
        match rows.next()? {
            Some(row) => Ok(Some(row_to_activity(row)?)),
            None => Ok(None),
        }
    }

    /// Insert a validated activity; `completed` starts false. Returns the new id.
    pub fn create_activity(&self, new: &NewActivity) -> Result<i64> {
        new.validate()?;
        self.conn.execute(
            "INSERT INTO activities (title, startTime, endTime, dayOfWeek, category, color, completed)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0)",
            params![
                new.title,
                new.start_time.to_string(),
                new.end_time.to_string(),
                new.day_of_week.index(),
                new.category,
                new.color,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Flip `completed`. Returns whether a row matched; a missing id is not an error.
    pub fn toggle_activity(&self, id: i64) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE activities SET completed = 1 - COALESCE(completed, 0) WHERE id = ?1",
            params![id],
        )?;
        Ok(changed > 0)
    }

    /// Remove permanently. Returns whether a row matched.
    pub fn delete_activity(&self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM activities WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    // -----------------------------------------------------------------------
    // Templates
    // -----------------------------------------------------------------------

    pub fn list_templates(&self) -> Result<Vec<Template>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {TEMPLATE_COLUMNS} FROM templates ORDER BY id"))?;
        let mut rows = stmt.query([])?;
        let mut templates = Vec::new();
        while let Some(row) = rows.next()? {
            templates.push(row_to_template(row)?);
        }
        Ok(templates)
    }

    pub fn get_template(&self, id: i64) -> Result<Option<Template>> {
        let template = self
            .conn
            .query_row(
                &format!("SELECT {TEMPLATE_COLUMNS} FROM templates WHERE id = ?1"),
                params![id],
                |row| {
                    Ok(Template {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        category: row.get(2)?,
                        color: row.get(3)?,
                    })
                },
            )
            .optional()?;
        Ok(template)
    }

    pub fn create_template(&self, new: &NewTemplate) -> Result<i64> {
        new.validate()?;
        self.conn.execute(
            "INSERT INTO templates (title, category, color) VALUES (?1, ?2, ?3)",
            params![new.title, new.category, new.color],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn delete_template(&self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM templates WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}
