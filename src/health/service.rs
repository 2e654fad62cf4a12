use super::component::Component;
use super::context::CheckContext;
use super::models::{ComponentStatus, Status};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use futures::FutureExt;
use std::any::Any;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::Instrument;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum HealthServiceError {
    #[error("component {0:?} is registered more than once")]
    DuplicateComponent(String),
}

/// Process-wide liveness and readiness reporting.
///
/// State is fixed at construction, so a shared `Arc<HealthService>` needs no locking.
pub struct HealthService {
    started_at: DateTime<Utc>,
    version: String,
    components: Vec<Arc<dyn Component>>,
}

impl HealthService {
    pub fn new(
        started_at: DateTime<Utc>,
        version: impl Into<String>,
        components: Vec<Arc<dyn Component>>,
    ) -> Result<Self, HealthServiceError> {
        let mut seen = HashSet::new();
        for component in &components {
            if !seen.insert(component.identifier().to_string()) {
                return Err(HealthServiceError::DuplicateComponent(
                    component.identifier().to_string(),
                ));
            }
        }

        Ok(Self {
            started_at,
            version: version.into(),
            components,
        })
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|component| component.identifier())
    }

    /// The process is up and answering. Never touches a dependency.
    pub async fn liveness(&self, _ctx: &CheckContext) -> Status {
        Status::aggregate(vec![], self.started_at, self.version.clone())
    }

    /// Probes every component concurrently and ANDs the verdicts.
    ///
    /// One result slot per component, in registration order. A failing, slow or panicking
    /// component only affects its own slot.
    #[tracing::instrument(name = "Readiness check", skip(self, ctx), fields(components = self.components.len()))]
    pub async fn readiness(&self, ctx: &CheckContext) -> Status {
        let checks = self.components.iter().map(|component| {
            let identifier = component.identifier().to_string();
            let span = tracing::info_span!("component_health_check", component = %identifier);

            AssertUnwindSafe(component.health_check(ctx))
                .catch_unwind()
                .map(move |outcome| match outcome {
                    Ok(status) => status.attributed_to(identifier),
                    Err(panic) => ComponentStatus::unhealthy(
                        identifier,
                        format!("health check panicked: {}", panic_message(panic.as_ref())),
                    ),
                })
                .instrument(span)
        });

        let component_statuses = join_all(checks).await;

        let status = Status::aggregate(component_statuses, self.started_at, self.version.clone());
        for component in status.unhealthy_components() {
            tracing::warn!(
                component = %component.identifier,
                error = component.error.as_deref().unwrap_or_default(),
                "Component is not ready"
            );
        }

        status
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
