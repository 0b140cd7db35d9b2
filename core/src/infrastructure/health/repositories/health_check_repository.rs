use std::time::Instant;

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::error;

use crate::domain::{
    common::entities::app_errors::CoreError,
    health::{entities::DatabaseHealthStatus, ports::HealthCheckRepository},
};

#[derive(Debug, Clone)]
pub struct PostgresHealthCheckRepository {
    pub db: DatabaseConnection,
}

impl PostgresHealthCheckRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn probe(&self) -> Result<u64, CoreError> {
        let started = Instant::now();
        self.db
            .execute(Statement::from_string(DatabaseBackend::Postgres, "SELECT 1"))
            .await
            .map_err(|e| {
                error!("Database health probe failed: {}", e);
                CoreError::DatabaseUnavailable
            })?;

        Ok(started.elapsed().as_millis() as u64)
    }
}

impl HealthCheckRepository for PostgresHealthCheckRepository {
    async fn readness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        let latency_ms = self.probe().await?;

        Ok(DatabaseHealthStatus {
            database: "postgres".to_string(),
            healthy: true,
            latency_ms,
        })
    }

    async fn health(&self) -> Result<u64, CoreError> {
        self.probe().await
    }
}
