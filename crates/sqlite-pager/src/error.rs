use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Nothing to paginate: the row count is zero or unknown.
    #[error("no data to paginate")]
    NoData,

    #[error("wrong \"{0}\" param")]
    InvalidParameter(&'static str),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("failed to open database: {path}: {source}")]
    DbOpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("sql error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("query is not read-only")]
    NotReadonly,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NoData => "NO_DATA",
            AppError::InvalidParameter(_) => "INVALID_PARAMETER",
            AppError::InvalidRequest(_) => "INVALID_REQUEST",
            AppError::DbOpenFailed { .. } => "DB_OPEN_FAILED",
            AppError::Sql(_) => "SQL_ERROR",
            AppError::NotReadonly => "NOT_READONLY",
            AppError::Io(_) => "IO_ERROR",
            AppError::Json(_) => "JSON_ERROR",
            AppError::Internal(_) => "INTERNAL",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
