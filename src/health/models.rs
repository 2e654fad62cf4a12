use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Verdict for one component at one instant. `error` is present exactly when unhealthy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentStatus {
    pub identifier: String,
    pub healthy: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComponentStatus {
    pub fn healthy(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            healthy: true,
            error: None,
        }
    }

    /// An empty message is replaced, an unhealthy status always explains itself.
    pub fn unhealthy(identifier: impl Into<String>, error: impl Into<String>) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = "unknown error".to_string();
        }

        Self {
            identifier: identifier.into(),
            healthy: false,
            error: Some(error),
        }
    }

    /// Rebuilds the status for `identifier`, restoring the error/healthy pairing when a
    /// component assembled the fields by hand.
    pub fn attributed_to(self, identifier: impl Into<String>) -> Self {
        if self.healthy {
            Self::healthy(identifier)
        } else {
            Self::unhealthy(identifier, self.error.unwrap_or_default())
        }
    }
}

/// Aggregate answer for liveness and readiness.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    pub healthy: bool,
    pub component_statuses: Vec<ComponentStatus>,
    pub started_at: DateTime<Utc>,
    pub version: String,
}

impl Status {
    /// `healthy` is the AND of every component, true for an empty list.
    pub fn aggregate(
        component_statuses: Vec<ComponentStatus>,
        started_at: DateTime<Utc>,
        version: String,
    ) -> Self {
        let healthy = component_statuses.iter().all(|status| status.healthy);
        Self {
            healthy,
            component_statuses,
            started_at,
            version,
        }
    }

    pub fn component(&self, identifier: &str) -> Option<&ComponentStatus> {
        self.component_statuses
            .iter()
            .find(|status| status.identifier == identifier)
    }

    pub fn unhealthy_components(&self) -> impl Iterator<Item = &ComponentStatus> {
        self.component_statuses.iter().filter(|status| !status.healthy)
    }
}
