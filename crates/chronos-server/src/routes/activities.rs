use axum::extract::{Path, State};
use axum::Json;
use chronos_core::activity::{Activity, NewActivity};
use chronos_core::error::ChronosError;
use chronos_core::template::NewTemplate;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/activities: every activity, ordered by start time.
pub async fn list_activities(
    State(app): State<AppState>,
) -> Result<Json<Vec<Activity>>, AppError> {
    let activities = app.with_store(|store| store.list_activities()).await?;
    Ok(Json(activities))
}

/// POST /api/activities: create an activity; it starts incomplete.
pub async fn create_activity(
    State(app): State<AppState>,
    Json(body): Json<NewActivity>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = app.with_store(move |store| store.create_activity(&body)).await?;
    tracing::debug!(id, "activity created");
    app.notify_update();
    Ok(Json(serde_json::json!({ "id": id })))
}

/// PATCH /api/activities/{id}/toggle: flip completion. Unknown ids succeed.
pub async fn toggle_activity(
    State(app): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let matched = app.with_store(move |store| store.toggle_activity(id)).await?;
    if matched {
        app.notify_update();
    }
    Ok(Json(serde_json::json!({ "success": true })))
}

/// DELETE /api/activities/{id}: remove permanently. Unknown ids succeed.
pub async fn delete_activity(
    State(app): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let matched = app.with_store(move |store| store.delete_activity(id)).await?;
    if matched {
        app.notify_update();
    }
    Ok(Json(serde_json::json!({ "success": true })))
}

/// POST /api/activities/{id}/template: save an activity's title, category
/// and color as a new template.
pub async fn save_as_template(
    State(app): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let template_id = app
        .with_store(move |store| {
            let activity = store
                .get_activity(id)?
                .ok_or(ChronosError::ActivityNotFound(id))?;
            store.create_template(&NewTemplate::from_activity(&activity))
        })
        .await?;
    app.notify_update();
    Ok(Json(serde_json::json!({ "id": template_id })))
}
