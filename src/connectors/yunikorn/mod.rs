//! YuniKorn scheduler connector.

use super::errors::ConnectorError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod client;

pub use client::YunikornClient;

pub const ROUTE_SCHEDULER_HEALTHCHECK: &str = "/ws/v1/scheduler/healthcheck";

/// Health report returned by the scheduler's own healthcheck endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SchedulerHealthInfo {
    #[serde(rename = "Healthy", default)]
    pub healthy: bool,
    #[serde(rename = "HealthChecks", default)]
    pub health_checks: Vec<HealthCheckInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HealthCheckInfo {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Succeeded", default)]
    pub succeeded: bool,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "DiagnosisMessage", default)]
    pub diagnosis_message: String,
}

#[async_trait]
pub trait YunikornConnector: Send + Sync {
    /// One `GET /ws/v1/scheduler/healthcheck`. No retries.
    async fn check_health(&self) -> Result<SchedulerHealthInfo, ConnectorError>;
}
