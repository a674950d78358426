use crate::api::errors::{api_error, ApiError};
use crate::constants::DEFAULT_COST_LIMIT;
use crate::db::CostEntry;
use crate::db::{CostRepository, CostSummary, Database};
use axum::http::StatusCode;
use axum::{
    extract::{Extension, Query},
    Json,
};
use chrono::{DateTime, NaiveTime, Utc};
use serde::Deserialize;

/// Represents the request payload for recording a cost ledger entry
#[derive(Deserialize)]
pub struct RecordCostRequest {
    pub agent: String,
    pub model: String,
    pub tokens_in: i64,
    pub tokens_out: i64,
    pub estimated_cost: f64,
    pub task_id: Option<String>,
    pub session_id: Option<String>,
    pub turn_type: Option<String>,
}

#[derive(Deserialize)]
pub struct CostsQuery {
    /// Restrict the ledger to one agent
    pub agent: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Deserialize)]
pub struct SummaryQuery {
    /// Inclusive window start (RFC 3339); defaults to the current UTC
    /// start of day
    pub since: Option<String>,
    /// Exclusive window end (RFC 3339)
    pub until: Option<String>,
}

fn parse_window_bound(raw: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            api_error(
                StatusCode::BAD_REQUEST,
                &format!("Invalid RFC 3339 timestamp '{}': {}", raw, e),
            )
        })
}

/// Retrieves recent cost entries, newest first, optionally filtered by
/// agent
#[axum::debug_handler]
pub async fn get_costs(
    Query(query): Query<CostsQuery>,
    Extension(database): Extension<Database>,
) -> Result<Json<Vec<CostEntry>>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = CostRepository::new(&mut conn);

    let limit = query.limit.unwrap_or(DEFAULT_COST_LIMIT);
    let entries = match query.agent {
        Some(agent) => repo.by_agent(&agent, limit)?,
        None => repo.recent(limit)?,
    };

    Ok(Json(entries))
}

/// Records one cost ledger entry
#[axum::debug_handler]
pub async fn record_cost(
    Extension(database): Extension<Database>,
    Json(payload): Json<RecordCostRequest>,
) -> Result<Json<CostEntry>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = CostRepository::new(&mut conn);

    let entry = repo.record(
        payload.agent,
        payload.model,
        payload.tokens_in,
        payload.tokens_out,
        payload.estimated_cost,
        payload.task_id,
        payload.session_id,
        payload.turn_type,
    )?;

    Ok(Json(entry))
}

/// Aggregates the cost ledger over a window into per-agent totals. The
/// window start defaults to the current UTC start of day, so a bare
/// call reports today's usage.
#[axum::debug_handler]
pub async fn daily_summary(
    Query(query): Query<SummaryQuery>,
    Extension(database): Extension<Database>,
) -> Result<Json<CostSummary>, ApiError> {
    let since = match query.since.as_deref() {
        Some(raw) => parse_window_bound(raw)?,
        None => Utc::now()
            .date_naive()
            .and_time(NaiveTime::MIN)
            .and_utc(),
    };
    let until = query
        .until
        .as_deref()
        .map(parse_window_bound)
        .transpose()?;

    let mut conn = database.get_conn();
    let mut repo = CostRepository::new(&mut conn);
    let summary = repo.summary(since, until)?;
    Ok(Json(summary))
}
