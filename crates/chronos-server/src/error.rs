use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chronos_core::error::ChronosError;

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = if let Some(e) = self.0.downcast_ref::<ChronosError>() {
            match e {
                ChronosError::NotInitialized => StatusCode::BAD_REQUEST,
                ChronosError::ActivityNotFound(_) | ChronosError::TemplateNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                ChronosError::EmptyTitle
                | ChronosError::InvalidTime(_)
                | ChronosError::InvalidDay(_)
                | ChronosError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
                ChronosError::SchemaTooNew { .. }
                | ChronosError::Io(_)
                | ChronosError::Yaml(_)
                | ChronosError::Json(_)
                | ChronosError::Sqlite(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::warn!(error = %self.0, "request failed");
        }

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
