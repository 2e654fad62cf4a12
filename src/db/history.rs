use crate::models::{AppHistory, ContainerHistory, HistoryType};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::Instrument;

const SELECT_HISTORY: &str =
    "SELECT id, created_at_nano, deleted_at_nano, total_number, timestamp FROM history";

/// Optional narrowing of a history query. All bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilters {
    pub timestamp_start: Option<DateTime<Utc>>,
    pub timestamp_end: Option<DateTime<Utc>>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

/// Saturates towards the side of the epoch the time falls on.
fn unix_nanos(time: &DateTime<Utc>) -> i64 {
    time.timestamp_nanos_opt().unwrap_or(if time.timestamp() < 0 {
        i64::MIN
    } else {
        i64::MAX
    })
}

fn history_query(
    history_type: HistoryType,
    filters: &HistoryFilters,
) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SELECT_HISTORY);
    builder.push(" WHERE history_type = ").push_bind(history_type.as_str());

    if let Some(start) = &filters.timestamp_start {
        builder.push(" AND timestamp >= ").push_bind(unix_nanos(start));
    }
    if let Some(end) = &filters.timestamp_end {
        builder.push(" AND timestamp <= ").push_bind(unix_nanos(end));
    }

    builder.push(" ORDER BY timestamp DESC");

    if let Some(limit) = filters.limit {
        builder.push(" LIMIT ").push_bind(limit);
    }
    if let Some(offset) = filters.offset {
        builder.push(" OFFSET ").push_bind(offset);
    }

    builder
}

async fn insert(
    pool: &PgPool,
    history_type: HistoryType,
    id: &str,
    created_at_nano: i64,
    deleted_at_nano: Option<i64>,
    total_number: i64,
    timestamp: i64,
) -> Result<(), String> {
    let query_span = tracing::info_span!(
        "Saving history record into the database",
        history_type = history_type.as_str()
    );
    sqlx::query(
        r#"
        INSERT INTO history (id, created_at_nano, deleted_at_nano, history_type, total_number, timestamp)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(id)
    .bind(created_at_nano)
    .bind(deleted_at_nano)
    .bind(history_type.as_str())
    .bind(total_number)
    .bind(timestamp)
    .execute(pool)
    .instrument(query_span)
    .await
    .map(|_| ())
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        format!("could not create {} history: {}", history_type.as_str(), err)
    })
}

pub async fn insert_app_history(pool: &PgPool, history: &AppHistory) -> Result<(), String> {
    insert(
        pool,
        HistoryType::Application,
        &history.id,
        history.created_at_nano,
        history.deleted_at_nano,
        history.total_applications,
        history.timestamp,
    )
    .await
}

pub async fn insert_container_history(
    pool: &PgPool,
    history: &ContainerHistory,
) -> Result<(), String> {
    insert(
        pool,
        HistoryType::Container,
        &history.id,
        history.created_at_nano,
        history.deleted_at_nano,
        history.total_containers,
        history.timestamp,
    )
    .await
}

pub async fn fetch_applications(
    pool: &PgPool,
    filters: &HistoryFilters,
) -> Result<Vec<AppHistory>, String> {
    let query_span = tracing::info_span!("Fetch applications history.");
    history_query(HistoryType::Application, filters)
        .build_query_as::<AppHistory>()
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch applications history: {:?}", err);
            format!("could not get applications history: {}", err)
        })
}

pub async fn fetch_containers(
    pool: &PgPool,
    filters: &HistoryFilters,
) -> Result<Vec<ContainerHistory>, String> {
    let query_span = tracing::info_span!("Fetch containers history.");
    history_query(HistoryType::Container, filters)
        .build_query_as::<ContainerHistory>()
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch containers history: {:?}", err);
            format!("could not get containers history: {}", err)
        })
}
