use thiserror::Error;

#[derive(Error, Debug)]
pub enum GddError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Another coordinator holds the instance's owner lease.
    #[error("Instance locked: {0}")]
    InstanceLocked(String),

    /// The update cycle could not produce any data; the scheduler retries on its next tick.
    #[error("Update failed: {0}")]
    UpdateFailed(String),
}

pub type Result<T> = std::result::Result<T, GddError>;
