use serde::{Deserialize, Serialize};

/// Discriminator stored in `history.history_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryType {
    Application,
    Container,
}

impl HistoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryType::Application => "application",
            HistoryType::Container => "container",
        }
    }
}

/// Number of applications known to the scheduler at `timestamp` (unix nanos).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AppHistory {
    pub id: String,
    pub created_at_nano: i64,
    pub deleted_at_nano: Option<i64>,
    #[sqlx(rename = "total_number")]
    pub total_applications: i64,
    pub timestamp: i64,
}

/// Number of containers known to the scheduler at `timestamp` (unix nanos).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ContainerHistory {
    pub id: String,
    pub created_at_nano: i64,
    pub deleted_at_nano: Option<i64>,
    #[sqlx(rename = "total_number")]
    pub total_containers: i64,
    pub timestamp: i64,
}
