use crate::api::errors::ApiError;
use crate::db::OperatorStatus;
use crate::db::{Database, OperatorCounters, OperatorRepository};
use axum::{extract::Extension, Json};
use serde::Deserialize;

/// Represents the request payload for replacing the operator-status
/// snapshot
#[derive(Deserialize)]
pub struct UpdateOperatorStatusRequest {
    pub credits_free_remaining: f64,
    pub credits_free_total: f64,
    pub workspace_balance: f64,
    pub loop_running: bool,
    pub loop_current_task: Option<i64>,
    pub loop_total_tasks: Option<i64>,
    pub loop_project: Option<String>,
}

/// Retrieves the operator-status snapshot, null when never written
#[axum::debug_handler]
pub async fn get_operator_status(
    Extension(database): Extension<Database>,
) -> Result<Json<Option<OperatorStatus>>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = OperatorRepository::new(&mut conn);
    let status = repo.get()?;
    Ok(Json(status))
}

/// Replaces the operator-status snapshot wholesale
#[axum::debug_handler]
pub async fn update_operator_status(
    Extension(database): Extension<Database>,
    Json(payload): Json<UpdateOperatorStatusRequest>,
) -> Result<Json<OperatorStatus>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = OperatorRepository::new(&mut conn);

    let status = repo.update(OperatorCounters {
        credits_free_remaining: payload.credits_free_remaining,
        credits_free_total: payload.credits_free_total,
        workspace_balance: payload.workspace_balance,
        loop_running: payload.loop_running,
        loop_current_task: payload.loop_current_task,
        loop_total_tasks: payload.loop_total_tasks,
        loop_project: payload.loop_project,
    })?;

    Ok(Json(status))
}
