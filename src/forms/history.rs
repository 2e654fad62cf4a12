use crate::db::history::HistoryFilters;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Query string accepted by the history endpoints. Timestamps are unix milliseconds.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub timestamp_start: Option<i64>,
    pub timestamp_end: Option<i64>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

fn parse_millis(name: &str, value: Option<i64>) -> Result<Option<DateTime<Utc>>, String> {
    value
        .map(|millis| {
            // stored as unix nanos, so the bound has to fit an i64 of nanoseconds
            DateTime::<Utc>::from_timestamp_millis(millis)
                .filter(|time| time.timestamp_nanos_opt().is_some())
                .ok_or_else(|| format!("{} is out of range: {}", name, millis))
        })
        .transpose()
}

impl TryFrom<HistoryQuery> for HistoryFilters {
    type Error = String;

    fn try_from(query: HistoryQuery) -> Result<Self, Self::Error> {
        let timestamp_start = parse_millis("timestampStart", query.timestamp_start)?;
        let timestamp_end = parse_millis("timestampEnd", query.timestamp_end)?;

        if let (Some(start), Some(end)) = (&timestamp_start, &timestamp_end) {
            if start > end {
                return Err("timestampStart must not be after timestampEnd".to_string());
            }
        }
        if matches!(query.limit, Some(limit) if limit < 0) {
            return Err("limit must not be negative".to_string());
        }
        if matches!(query.offset, Some(offset) if offset < 0) {
            return Err("offset must not be negative".to_string());
        }

        Ok(HistoryFilters {
            timestamp_start,
            timestamp_end,
            offset: query.offset,
            limit: query.limit,
        })
    }
}
