use crate::schema::{
    activity_logs, agents, costs, operator_status, task_comments, task_history, tasks,
};
use diesel::{AsChangeset, Identifiable, Insertable, Queryable};
use serde::{Deserialize, Serialize};

/// Represents a task in the shared queue
#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, AsChangeset, Insertable,
)]
#[diesel(table_name = tasks)]
pub struct Task {
    /// Unique identifier for the task
    pub id: String,
    /// Short human-readable title
    pub title: String,
    /// Optional longer description of the work
    pub description: Option<String>,
    /// Current status, one of the `TaskStatus` wire strings
    pub status: String,
    /// Scheduling priority, one of the `TaskPriority` wire strings
    pub priority: String,
    /// Agent or user that created the task
    pub created_by: String,
    /// Agent currently assigned, if any
    pub assigned_to: Option<String>,
    /// Optional project the task belongs to
    pub project: Option<String>,
    /// Optional JSON array of tag strings
    pub tags: Option<String>,
    /// Optional JSON array of mentioned agent names
    pub mentions: Option<String>,
    /// Optional due timestamp (RFC 3339)
    pub due_at: Option<String>,
    /// Stamped once on the first transition into `in_progress`
    pub started_at: Option<String>,
    /// Stamped once on the first transition into `done`
    pub completed_at: Option<String>,
    /// Timestamp when the task was created
    pub created_at: String,
    /// Timestamp when the task was last updated
    pub updated_at: String,
}

/// One immutable field-level change on a task, forming the audit trail
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, Insertable)]
#[diesel(table_name = task_history)]
pub struct TaskHistoryEntry {
    pub id: String,
    /// Task the change applies to
    pub task_id: String,
    /// Actor that made the change
    pub changed_by: String,
    /// Name of the field that changed, e.g. "status"
    pub field_changed: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub created_at: String,
}

/// One append-only event on the dashboard activity feed
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, Insertable)]
#[diesel(table_name = activity_logs)]
pub struct ActivityLog {
    pub id: String,
    /// Agent that performed the action
    pub agent: String,
    /// Action label, e.g. "task_completed"
    pub action_type: String,
    /// Related task, if any
    pub task_id: Option<String>,
    /// Optional JSON payload with free-form detail
    pub details: Option<String>,
    pub session_id: Option<String>,
    pub created_at: String,
}

/// Represents a registered agent and its presence state
#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, AsChangeset, Insertable,
)]
#[diesel(table_name = agents)]
pub struct Agent {
    pub id: String,
    /// Unique agent name, the upsert key
    pub name: String,
    /// Presence status, one of the `AgentStatus` wire strings
    pub status: String,
    /// Health status, one of the `HealthStatus` wire strings
    pub health: String,
    /// Task the agent reported working on in its last heartbeat
    pub current_task_id: Option<String>,
    /// Timestamp of the last heartbeat (RFC 3339)
    pub last_heartbeat: Option<String>,
    /// Running token counter for the current day
    pub tokens_today: i64,
    /// Running cost counter for the current day
    pub cost_today: f64,
    /// JSON serialized `AgentConfig`
    pub config: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A comment on a task, optionally carrying attachment metadata
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, Insertable)]
#[diesel(table_name = task_comments)]
pub struct TaskComment {
    pub id: String,
    pub task_id: String,
    pub author: String,
    pub content: String,
    /// "text" or "markdown"
    pub content_type: String,
    /// JSON serialized list of `Attachment` metadata, "[]" when empty
    pub attachments: String,
    pub created_at: String,
}

/// Metadata for one file attached to a comment. The blob itself lives
/// in the blob store under `storage_ref`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    /// Key of the blob in the blob store
    pub storage_ref: String,
    pub filename: String,
    pub mime_type: String,
    /// Size in bytes
    pub size: i64,
}

/// One per-turn cost ledger entry, insert-only
#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, Insertable)]
#[diesel(table_name = costs)]
pub struct CostEntry {
    pub id: String,
    pub agent: String,
    /// Model that served the turn
    pub model: String,
    pub tokens_in: i64,
    pub tokens_out: i64,
    pub estimated_cost: f64,
    pub task_id: Option<String>,
    pub session_id: Option<String>,
    pub turn_type: Option<String>,
    pub created_at: String,
}

/// Singleton snapshot of external tool-usage counters, replaced
/// wholesale on each update
#[derive(
    Debug, Clone, Serialize, Deserialize, Queryable, Identifiable, AsChangeset, Insertable,
)]
#[diesel(table_name = operator_status)]
pub struct OperatorStatus {
    pub id: String,
    pub credits_free_remaining: f64,
    pub credits_free_total: f64,
    pub workspace_balance: f64,
    pub loop_running: bool,
    pub loop_current_task: Option<i64>,
    pub loop_total_tasks: Option<i64>,
    pub loop_project: Option<String>,
    pub last_updated: String,
}
