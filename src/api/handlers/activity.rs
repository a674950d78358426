use crate::api::errors::ApiError;
use crate::api::handlers::parse_details;
use crate::constants::{AGENT_ACTIVITY_LIMIT, DEFAULT_ACTIVITY_LIMIT};
use crate::db::ActivityLog;
use crate::db::{ActivityRepository, Database};
use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::{Deserialize, Serialize};

/// Activity entry returned by the API, detail payload expanded from
/// its JSON column
#[derive(Serialize)]
pub struct ActivityDto {
    pub id: String,
    pub agent: String,
    pub action_type: String,
    pub task_id: Option<String>,
    pub details: Option<serde_json::Value>,
    pub session_id: Option<String>,
    pub created_at: String,
}

impl From<ActivityLog> for ActivityDto {
    fn from(log: ActivityLog) -> Self {
        ActivityDto {
            details: parse_details(&log.details),
            id: log.id,
            agent: log.agent,
            action_type: log.action_type,
            task_id: log.task_id,
            session_id: log.session_id,
            created_at: log.created_at,
        }
    }
}

/// Represents the request payload for logging an activity entry
#[derive(Deserialize)]
pub struct LogActivityRequest {
    pub agent: String,
    pub action_type: String,
    pub task_id: Option<String>,
    pub details: Option<serde_json::Value>,
    pub session_id: Option<String>,
}

#[derive(Deserialize)]
pub struct ActivityQuery {
    /// Restrict the feed to one agent
    pub agent: Option<String>,
    pub limit: Option<i64>,
}

/// Retrieves recent activity, newest first, optionally filtered by
/// agent
#[axum::debug_handler]
pub async fn get_activity(
    Query(query): Query<ActivityQuery>,
    Extension(database): Extension<Database>,
) -> Result<Json<Vec<ActivityDto>>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = ActivityRepository::new(&mut conn);

    let logs = match query.agent {
        Some(agent) => repo.by_agent(&agent, query.limit.unwrap_or(AGENT_ACTIVITY_LIMIT))?,
        None => repo.recent(query.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT))?,
    };

    Ok(Json(logs.into_iter().map(ActivityDto::from).collect()))
}

/// Appends one activity entry
#[axum::debug_handler]
pub async fn log_activity(
    Extension(database): Extension<Database>,
    Json(payload): Json<LogActivityRequest>,
) -> Result<Json<ActivityDto>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = ActivityRepository::new(&mut conn);

    let entry = repo.log(
        payload.agent,
        payload.action_type,
        payload.task_id,
        payload.details,
        payload.session_id,
    )?;

    Ok(Json(entry.into()))
}
