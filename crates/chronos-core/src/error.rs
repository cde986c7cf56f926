use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChronosError {
    #[error("not initialized: run 'chronos init'")]
    NotInitialized,

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("invalid time '{0}': expected zero-padded 24-hour HH:mm")]
    InvalidTime(String),

    #[error("invalid day of week '{0}': expected 0-6 (Sunday = 0) or a day name")]
    InvalidDay(String),

    #[error("invalid status: {0}")]
    InvalidStatus(String),

    #[error("activity not found: {0}")]
    ActivityNotFound(i64),

    #[error("template not found: {0}")]
    TemplateNotFound(i64),

    #[error("database schema version {found} is newer than supported version {supported}")]
    SchemaTooNew { found: i32, supported: i32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, ChronosError>;
