use crate::api::errors::{api_error, ApiError};
use crate::api::handlers::parse_string_list;
use crate::core::{TaskPriority, TaskStatus};
use crate::db::{Task, TaskHistoryEntry};
use crate::db::{Database, TaskPatch, TaskRepository};
use axum::http::StatusCode;
use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use serde::{Deserialize, Serialize};

/// Task representation returned by the API; JSON-array columns are
/// expanded into proper lists
#[derive(Serialize)]
pub struct TaskDto {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub created_by: String,
    pub assigned_to: Option<String>,
    pub project: Option<String>,
    pub tags: Vec<String>,
    pub mentions: Vec<String>,
    pub due_at: Option<String>,
    pub started_at: Option<String>,
    pub completed_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Task> for TaskDto {
    fn from(task: Task) -> Self {
        TaskDto {
            tags: parse_string_list(&task.tags),
            mentions: parse_string_list(&task.mentions),
            id: task.id,
            title: task.title,
            description: task.description,
            status: task.status,
            priority: task.priority,
            created_by: task.created_by,
            assigned_to: task.assigned_to,
            project: task.project,
            due_at: task.due_at,
            started_at: task.started_at,
            completed_at: task.completed_at,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}

/// Represents the request payload for creating a new task
#[derive(Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub created_by: String,
    pub assigned_to: Option<String>,
    pub project: Option<String>,
    pub tags: Option<Vec<String>>,
    pub mentions: Option<Vec<String>>,
    pub due_at: Option<String>,
}

/// Partial update payload; absent fields are left untouched
#[derive(Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<String>,
    pub project: Option<String>,
    pub tags: Option<Vec<String>>,
    pub due_at: Option<String>,
}

/// Status transition payload
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: TaskStatus,
    pub changed_by: Option<String>,
}

/// Assignment change payload; a missing assignee clears the field
#[derive(Deserialize)]
pub struct AssignRequest {
    pub assigned_to: Option<String>,
    pub changed_by: Option<String>,
}

#[derive(Deserialize)]
pub struct ListTasksQuery {
    /// Cancelled tasks are hidden unless set
    pub include_cancelled: Option<bool>,
    /// Restrict to one status
    pub status: Option<TaskStatus>,
    /// Restrict to one assignee
    pub assignee: Option<String>,
}

/// Lists tasks in queue order, optionally filtered by status or
/// assignee
#[axum::debug_handler]
pub async fn list_tasks(
    Query(query): Query<ListTasksQuery>,
    Extension(database): Extension<Database>,
) -> Result<Json<Vec<TaskDto>>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);

    let tasks = if let Some(status) = query.status {
        repo.get_tasks_by_status(&status)?
    } else if let Some(assignee) = query.assignee {
        repo.get_tasks_by_assignee(&assignee)?
    } else {
        repo.list_tasks(query.include_cancelled.unwrap_or(false))?
    };

    Ok(Json(tasks.into_iter().map(TaskDto::from).collect()))
}

/// Retrieves one task by id
#[axum::debug_handler]
pub async fn get_task(
    Path(id): Path<String>,
    Extension(database): Extension<Database>,
) -> Result<Json<TaskDto>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);
    let task = repo.get_task(&id)?;
    Ok(Json(task.into()))
}

/// Creates a new pending task
#[axum::debug_handler]
pub async fn create_task(
    Extension(database): Extension<Database>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<Json<TaskDto>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);

    let task = repo.create_task(
        payload.title,
        payload.description,
        payload.priority.unwrap_or(TaskPriority::Normal),
        payload.created_by,
        payload.assigned_to,
        payload.project,
        payload.tags,
        payload.mentions,
        payload.due_at,
    )?;

    Ok(Json(task.into()))
}

/// Applies a partial update to a task
#[axum::debug_handler]
pub async fn update_task(
    Path(id): Path<String>,
    Extension(database): Extension<Database>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<TaskDto>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);

    let tags = payload
        .tags
        .map(|t| serde_json::to_string(&t))
        .transpose()
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()))?;

    let patch = TaskPatch {
        title: payload.title,
        description: payload.description,
        priority: payload.priority.map(|p| p.to_string()),
        assigned_to: payload.assigned_to,
        project: payload.project,
        tags,
        due_at: payload.due_at,
    };

    let task = repo.update_task(&id, patch)?;
    Ok(Json(task.into()))
}

/// Transitions a task to a new status, recording the audit trail and
/// activity entries
#[axum::debug_handler]
pub async fn update_task_status(
    Path(id): Path<String>,
    Extension(database): Extension<Database>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<TaskDto>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);
    let task = repo.update_status(&id, payload.status, payload.changed_by.as_deref())?;
    Ok(Json(task.into()))
}

/// Changes or clears the assignee of a task
#[axum::debug_handler]
pub async fn assign_task(
    Path(id): Path<String>,
    Extension(database): Extension<Database>,
    Json(payload): Json<AssignRequest>,
) -> Result<Json<TaskDto>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);
    let task = repo.assign(&id, payload.assigned_to, payload.changed_by.as_deref())?;
    Ok(Json(task.into()))
}

/// Retrieves the audit trail of a task, oldest change first
#[axum::debug_handler]
pub async fn get_task_history(
    Path(id): Path<String>,
    Extension(database): Extension<Database>,
) -> Result<Json<Vec<TaskHistoryEntry>>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = TaskRepository::new(&mut conn);
    // Surface NotFound for unknown tasks rather than an empty list.
    repo.get_task(&id)?;
    let history = repo.get_task_history(&id)?;
    Ok(Json(history))
}
