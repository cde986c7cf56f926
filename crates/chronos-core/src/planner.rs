//! Planner view state as an explicit reducer.
//!
//! `Planner::update` applies one `Msg` and returns the `Command`s the caller
//! must run against a `Backend`. `execute` runs a command and hands back the
//! message describing its outcome, which is fed into `update` again.
//! Local list edits for toggle and delete are applied only after the backend
//! confirmed them; a failure leaves the lists untouched.

use crate::activity::{self, Activity, NewActivity};
use crate::config::Config;
use crate::error::Result;
use crate::schedule::{self, DayView};
use crate::store::Store;
use crate::template::{self, NewTemplate, Template};
use crate::types::{DayOfWeek, Moment};

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// Storage operations the planner depends on.
pub trait Backend {
    fn list_activities(&self) -> Result<Vec<Activity>>;
    fn create_activity(&self, new: &NewActivity) -> Result<i64>;
    fn toggle_activity(&self, id: i64) -> Result<()>;
    fn delete_activity(&self, id: i64) -> Result<()>;
    fn list_templates(&self) -> Result<Vec<Template>>;
    fn create_template(&self, new: &NewTemplate) -> Result<i64>;
    fn delete_template(&self, id: i64) -> Result<()>;
}

impl Backend for Store {
    fn list_activities(&self) -> Result<Vec<Activity>> {
        Store::list_activities(self)
    }

    fn create_activity(&self, new: &NewActivity) -> Result<i64> {
        Store::create_activity(self, new)
    }

    fn toggle_activity(&self, id: i64) -> Result<()> {
        Store::toggle_activity(self, id).map(|_| ())
    }

    fn delete_activity(&self, id: i64) -> Result<()> {
        Store::delete_activity(self, id).map(|_| ())
    }

    fn list_templates(&self) -> Result<Vec<Template>> {
        Store::list_templates(self)
    }

    fn create_template(&self, new: &NewTemplate) -> Result<i64> {
        Store::create_template(self, new)
    }

    fn delete_template(&self, id: i64) -> Result<()> {
        Store::delete_template(self, id).map(|_| ())
    }
}

// ---------------------------------------------------------------------------
// Messages and commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Closed,
    ActivityForm,
    Templates,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DraftEdit {
    Title(String),
    StartTime(crate::types::ClockTime),
    EndTime(crate::types::ClockTime),
    Day(DayOfWeek),
    Category(Option<String>),
    Color(Option<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    Loaded {
        activities: Vec<Activity>,
        templates: Vec<Template>,
    },
    Tick(Moment),
    /// Re-read everything from the backend.
    Refresh,
    SelectDay(DayOfWeek),
    NextDay,
    PreviousDay,
    OpenActivityForm,
    OpenTemplates,
    CloseModal,
    EditDraft(DraftEdit),
    SubmitDraft,
    ActivityCreated(i64),
    Toggle(i64),
    Toggled(i64),
    Delete(i64),
    Deleted(i64),
    SaveAsTemplate(i64),
    TemplateSaved(i64),
    UseTemplate(i64),
    DeleteTemplate(i64),
    TemplateDeleted(i64),
    Failed { operation: &'static str, error: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    LoadAll,
    CreateActivity(NewActivity),
    ToggleActivity(i64),
    DeleteActivity(i64),
    CreateTemplate(NewTemplate),
    DeleteTemplate(i64),
}

impl Command {
    pub fn operation(&self) -> &'static str {
        match self {
            Command::LoadAll => "load",
            Command::CreateActivity(_) => "create activity",
            Command::ToggleActivity(_) => "toggle activity",
            Command::DeleteActivity(_) => "delete activity",
            Command::CreateTemplate(_) => "save template",
            Command::DeleteTemplate(_) => "delete template",
        }
    }
}

/// Run one command and describe its outcome as the follow-up message.
pub fn execute<B: Backend + ?Sized>(backend: &B, command: Command) -> Msg {
    let operation = command.operation();
    let outcome = match command {
        Command::LoadAll => backend.list_activities().and_then(|activities| {
            Ok(Msg::Loaded {
                activities,
                templates: backend.list_templates()?,
            })
        }),
        Command::CreateActivity(new) => backend.create_activity(&new).map(Msg::ActivityCreated),
        Command::ToggleActivity(id) => backend.toggle_activity(id).map(|_| Msg::Toggled(id)),
        Command::DeleteActivity(id) => backend.delete_activity(id).map(|_| Msg::Deleted(id)),
        Command::CreateTemplate(new) => backend.create_template(&new).map(Msg::TemplateSaved),
        Command::DeleteTemplate(id) => backend.delete_template(id).map(|_| Msg::TemplateDeleted(id)),
    };
    outcome.unwrap_or_else(|e| Msg::Failed {
        operation,
        error: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Planner
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Planner {
    pub activities: Vec<Activity>,
    pub templates: Vec<Template>,
    pub selected_day: DayOfWeek,
    pub now: Moment,
    pub draft: NewActivity,
    pub modal: Modal,
    pub loading: bool,
    pub last_error: Option<String>,
}

impl Planner {
    /// Fresh state opened on the current day, with a load requested.
    pub fn new(config: &Config, now: Moment) -> (Self, Vec<Command>) {
        let planner = Self {
            activities: Vec::new(),
            templates: Vec::new(),
            selected_day: now.day,
            now,
            draft: config.draft_for(now.day),
            modal: Modal::Closed,
            loading: true,
            last_error: None,
        };
        (planner, vec![Command::LoadAll])
    }

    /// The board for the selected day.
    pub fn view(&self) -> DayView {
        schedule::day_view(&self.activities, self.selected_day, self.now)
    }

    pub fn update(&mut self, msg: Msg) -> Vec<Command> {
        match msg {
            Msg::Loaded {
                activities,
                templates,
            } => {
                self.activities = activities;
                self.templates = templates;
                self.loading = false;
                self.last_error = None;
                Vec::new()
            }
            Msg::Tick(now) => {
                self.now = now;
                Vec::new()
            }
            Msg::Refresh => {
                self.loading = true;
                vec![Command::LoadAll]
            }
            Msg::SelectDay(day) => {
                self.selected_day = day;
                Vec::new()
            }
            Msg::NextDay => {
                self.selected_day = self.selected_day.next();
                Vec::new()
            }
            Msg::PreviousDay => {
                self.selected_day = self.selected_day.previous();
                Vec::new()
            }
            Msg::OpenActivityForm => {
                self.modal = Modal::ActivityForm;
                Vec::new()
            }
            Msg::OpenTemplates => {
                self.modal = Modal::Templates;
                Vec::new()
            }
            Msg::CloseModal => {
                self.modal = Modal::Closed;
                Vec::new()
            }
            Msg::EditDraft(edit) => {
                match edit {
                    DraftEdit::Title(t) => self.draft.title = t,
                    DraftEdit::StartTime(t) => self.draft.start_time = t,
                    DraftEdit::EndTime(t) => self.draft.end_time = t,
                    DraftEdit::Day(d) => self.draft.day_of_week = d,
                    DraftEdit::Category(c) => self.draft.category = c,
                    DraftEdit::Color(c) => self.draft.color = c,
                }
                Vec::new()
            }
            Msg::SubmitDraft => match self.draft.validate() {
                Ok(()) => vec![Command::CreateActivity(self.draft.clone())],
                Err(e) => {
                    self.last_error = Some(e.to_string());
                    Vec::new()
                }
            },
            Msg::ActivityCreated(_) => {
                self.modal = Modal::Closed;
                self.draft.title.clear();
                vec![Command::LoadAll]
            }
            Msg::Toggle(id) => vec![Command::ToggleActivity(id)],
            Msg::Toggled(id) => {
                activity::toggle_in(&mut self.activities, id);
                Vec::new()
            }
            Msg::Delete(id) => vec![Command::DeleteActivity(id)],
            Msg::Deleted(id) => {
                activity::remove_from(&mut self.activities, id);
                Vec::new()
            }
            Msg::SaveAsTemplate(id) => match self.activities.iter().find(|a| a.id == id) {
                Some(a) => vec![Command::CreateTemplate(NewTemplate::from_activity(a))],
                None => Vec::new(),
            },
            Msg::TemplateSaved(_) => vec![Command::LoadAll],
            Msg::UseTemplate(id) => {
                if let Some(t) = self.templates.iter().find(|t| t.id == id) {
                    self.draft = template::instantiate(t, self.selected_day, &self.draft);
                    self.modal = Modal::ActivityForm;
                }
                Vec::new()
            }
            Msg::DeleteTemplate(id) => vec![Command::DeleteTemplate(id)],
            Msg::TemplateDeleted(id) => {
                self.templates.retain(|t| t.id != id);
                Vec::new()
            }
            Msg::Failed { operation, error } => {
                self.loading = false;
                self.last_error = Some(format!("failed to {operation}: {error}"));
                Vec::new()
            }
        }
    }

    /// Apply `msg` and keep executing the resulting commands until none remain.
    pub fn dispatch<B: Backend + ?Sized>(&mut self, backend: &B, msg: Msg) {
        let mut pending = self.update(msg);
        while !pending.is_empty() {
            let mut next = Vec::new();
            for command in pending {
                let outcome = execute(backend, command);
                next.extend(self.update(outcome));
            }
            pending = next;
        }
    }
}
