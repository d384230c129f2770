use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("invalid stored data: {0}")]
    Data(String),
    #[error("not found")]
    NotFound,
    #[error("location permission not granted")]
    PermissionDenied,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// True for errors raised before any persistence call was attempted.
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}
