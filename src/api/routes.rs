//! API routes configuration module

use crate::api::handlers::{
    add_task_comment, agent_heartbeat, assign_task, create_task, daily_summary, get_activity,
    get_agent, get_costs, get_operator_status, get_task, get_task_comments, get_task_history,
    list_agents, list_tasks, log_activity, record_cost, remove_comment, reset_daily_costs,
    update_agent_costs, update_agent_status, update_operator_status, update_task,
    update_task_status, upsert_agent,
};
use crate::db::Database;
use crate::storage::BlobStore;
use axum::{
    routing::{delete, get, post, put},
    Extension, Router,
};

/// Creates and configures the API router with all routes
///
/// # Arguments
/// * `database` - Database connection pool to be shared across handlers
/// * `blobs` - Attachment blob store shared across handlers
///
/// # Returns
/// * `Router` - Configured router with all API endpoints and middleware
pub fn app(database: Database, blobs: BlobStore) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/:id", get(get_task).patch(update_task))
        .route("/tasks/:id/status", put(update_task_status))
        .route("/tasks/:id/assignee", put(assign_task))
        .route("/tasks/:id/history", get(get_task_history))
        .route(
            "/tasks/:id/comments",
            get(get_task_comments).post(add_task_comment),
        )
        .route("/comments/:id", delete(remove_comment))
        .route("/activity", get(get_activity).post(log_activity))
        .route("/agents", get(list_agents))
        .route("/agents/reset-daily-costs", post(reset_daily_costs))
        .route("/agents/:name", get(get_agent).put(upsert_agent))
        .route("/agents/:name/status", put(update_agent_status))
        .route("/agents/:name/heartbeat", post(agent_heartbeat))
        .route("/agents/:name/costs", put(update_agent_costs))
        .route("/costs", get(get_costs).post(record_cost))
        .route("/costs/daily-summary", get(daily_summary))
        .route(
            "/operator-status",
            get(get_operator_status).put(update_operator_status),
        )
        .layer(Extension(database))
        .layer(Extension(blobs))
}
