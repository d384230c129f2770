use std::fs::File;

use anyhow::Context;
use tempfile::TempDir;
use voyage::config::AppConfig;
use voyage::db::{init_pool, run_migrations};
use voyage::state::AppState;

/// A migrated application state backed by a sqlite file in a temp dir.
/// Dropping it removes the directory and the database with it.
pub struct TestApp {
    pub state: AppState,
    _root: TempDir,
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        let root = TempDir::new().context("create temp dir for test app")?;
        let db_path = root.path().join("test.sqlite");
        File::create(&db_path)?;
        let database_url = format!("sqlite://{}", db_path.to_string_lossy());

        let config = AppConfig {
            database_url: database_url.clone(),
            ..AppConfig::default()
        };

        let db = init_pool(&config.database_url).await?;
        run_migrations(&db).await?;

        let state = AppState::new(config, db);
        Ok(Self { state, _root: root })
    }
}
