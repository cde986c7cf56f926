use axum::extract::{Path, Query, State};
use axum::Json;
use chronos_core::activity::NewActivity;
use chronos_core::config::Config;
use chronos_core::error::ChronosError;
use chronos_core::template::{self, NewTemplate, Template};
use chronos_core::types::{ClockTime, DayOfWeek};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/templates: every saved template.
pub async fn list_templates(
    State(app): State<AppState>,
) -> Result<Json<Vec<Template>>, AppError> {
    let templates = app.with_store(|store| store.list_templates()).await?;
    Ok(Json(templates))
}

/// POST /api/templates: save a new template.
pub async fn create_template(
    State(app): State<AppState>,
    Json(body): Json<NewTemplate>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = app.with_store(move |store| store.create_template(&body)).await?;
    app.notify_update();
    Ok(Json(serde_json::json!({ "id": id })))
}

/// DELETE /api/templates/{id}: remove permanently. Unknown ids succeed.
pub async fn delete_template(
    State(app): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let matched = app.with_store(move |store| store.delete_template(id)).await?;
    if matched {
        app.notify_update();
    }
    Ok(Json(serde_json::json!({ "success": true })))
}

#[derive(Debug, Default, serde::Deserialize)]
pub struct DraftParams {
    pub day: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// GET /api/templates/{id}/draft: a pre-filled activity for the selected day.
///
/// Nothing is stored; the client confirms by POSTing the draft to
/// `/api/activities`.
pub async fn template_draft(
    State(app): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<DraftParams>,
) -> Result<Json<NewActivity>, AppError> {
    let root = app.root.clone();
    let draft = app
        .with_store(move |store| {
            let config = Config::load(&root)?;
            let day = match params.day.as_deref() {
                Some(d) => d.parse::<DayOfWeek>()?,
                None => DayOfWeek::today(),
            };
            let mut form = config.draft_for(day);
            if let Some(start) = params.start.as_deref() {
                form.start_time = start.parse::<ClockTime>()?;
            }
            if let Some(end) = params.end.as_deref() {
                form.end_time = end.parse::<ClockTime>()?;
            }
            let tpl = store
                .get_template(id)?
                .ok_or(ChronosError::TemplateNotFound(id))?;
            Ok(template::instantiate(&tpl, day, &form))
        })
        .await?;
    Ok(Json(draft))
}
