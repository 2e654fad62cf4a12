use super::component::Component;
use super::context::CheckContext;
use super::models::ComponentStatus;
use crate::connectors::YunikornConnector;
use crate::helpers::error_chain;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Instant;

pub const YUNIKORN_IDENTIFIER: &str = "yunikorn";
pub const POSTGRES_IDENTIFIER: &str = "postgres";

/// Probes the scheduler's healthcheck endpoint.
pub struct SchedulerComponent {
    client: Arc<dyn YunikornConnector>,
}

impl SchedulerComponent {
    pub fn new(client: Arc<dyn YunikornConnector>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Component for SchedulerComponent {
    fn identifier(&self) -> &str {
        YUNIKORN_IDENTIFIER
    }

    #[tracing::instrument(name = "Check scheduler health", skip(self, ctx))]
    async fn health_check(&self, ctx: &CheckContext) -> ComponentStatus {
        let start = Instant::now();

        match ctx.run(self.client.check_health()).await {
            Ok(Ok(info)) => {
                tracing::debug!(
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    scheduler_healthy = info.healthy,
                    "Scheduler healthcheck succeeded"
                );
                ComponentStatus::healthy(self.identifier())
            }
            Ok(Err(err)) => {
                tracing::warn!("Scheduler health check failed: {}", err);
                ComponentStatus::unhealthy(self.identifier(), err.to_string())
            }
            Err(err) => {
                tracing::warn!("Scheduler health check interrupted: {}", err);
                ComponentStatus::unhealthy(self.identifier(), err.to_string())
            }
        }
    }
}

/// Pings the shared Postgres pool.
pub struct DatabaseComponent {
    pool: PgPool,
}

impl DatabaseComponent {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Component for DatabaseComponent {
    fn identifier(&self) -> &str {
        POSTGRES_IDENTIFIER
    }

    #[tracing::instrument(name = "Check database health", skip(self, ctx))]
    async fn health_check(&self, ctx: &CheckContext) -> ComponentStatus {
        let start = Instant::now();
        let ping = sqlx::query("SELECT 1 as health_check").execute(&self.pool);

        match ctx.run(ping).await {
            Ok(Ok(_)) => {
                tracing::debug!(
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    pool_size = self.pool.size(),
                    idle_connections = self.pool.num_idle() as u64,
                    "Database ping succeeded"
                );
                ComponentStatus::healthy(self.identifier())
            }
            Ok(Err(err)) => {
                tracing::error!("Database health check failed: {:?}", err);
                ComponentStatus::unhealthy(self.identifier(), error_chain(&err))
            }
            Err(err) => {
                tracing::warn!("Database health check interrupted: {}", err);
                ComponentStatus::unhealthy(self.identifier(), err.to_string())
            }
        }
    }
}
