use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sqlx::migrate::Migrator;
use tracing::{error, info};

use crate::domain::common::DatabaseConfig;

/// Schema migrations embedded at compile time, as reversible `up`/`down` pairs.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

#[derive(Debug, Clone)]
pub struct Postgres {
    db: DatabaseConnection,
}

impl Postgres {
    pub async fn new(config: &DatabaseConfig) -> Result<Self, anyhow::Error> {
        let mut options = ConnectOptions::new(config.url());
        options
            .max_connections(20)
            .connect_timeout(Duration::from_secs(8))
            .sqlx_logging(false);

        let db = Database::connect(options).await.map_err(|e| {
            error!("Failed to connect to database {}: {}", config.name, e);
            anyhow::anyhow!("failed to connect to database: {e}")
        })?;

        Ok(Self { db })
    }

    pub fn get_db(&self) -> DatabaseConnection {
        self.db.clone()
    }

    pub async fn run_migrations(&self) -> Result<(), anyhow::Error> {
        let pool = self.db.get_postgres_connection_pool();
        MIGRATOR.run(pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Reverts every applied migration newer than `target` (`0` reverts all).
    pub async fn revert_migrations(&self, target: i64) -> Result<(), anyhow::Error> {
        let pool = self.db.get_postgres_connection_pool();
        MIGRATOR.undo(pool, target).await?;
        info!("Database migrations reverted to version {}", target);
        Ok(())
    }
}
