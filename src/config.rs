use std::env;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// How many trips the upcoming/past list queries return.
    pub trip_list_limit: i64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://voyage.db".to_string());

        let trip_list_limit = env::var("TRIP_LIST_LIMIT")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid TRIP_LIST_LIMIT: {err}")))?;

        Ok(Self {
            database_url,
            trip_list_limit,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://voyage.db".to_string(),
            trip_list_limit: 5,
        }
    }
}
