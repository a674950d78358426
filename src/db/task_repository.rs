use crate::constants::{ACTION_TASK_CREATED, SYSTEM_ACTOR};
use crate::core::{TaskPriority, TaskStatus};
use crate::db::models::{ActivityLog, Task, TaskHistoryEntry};
use crate::errors::Error;
use crate::schema::tasks;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::str::FromStr;
use uuid::Uuid;

/// Changeset applied on a status transition. `started_at` and
/// `completed_at` stay `None` unless this transition is the first one
/// into `in_progress` / `done`, so already-stamped values are never
/// overwritten.
#[derive(AsChangeset)]
#[diesel(table_name = tasks)]
struct StatusPatch<'a> {
    status: String,
    updated_at: &'a str,
    started_at: Option<&'a str>,
    completed_at: Option<&'a str>,
}

/// Changeset for the general task update; `None` fields are left
/// untouched.
#[derive(AsChangeset, Default)]
#[diesel(table_name = tasks)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub assigned_to: Option<String>,
    pub project: Option<String>,
    pub tags: Option<String>,
    pub due_at: Option<String>,
}

impl TaskPatch {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.assigned_to.is_none()
            && self.project.is_none()
            && self.tags.is_none()
            && self.due_at.is_none()
    }
}

/// Repository for the shared task queue, its audit trail and the
/// activity entries written as side effects of task mutations
pub struct TaskRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> TaskRepository<'a> {
    /// Creates a new TaskRepository instance
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        TaskRepository { conn }
    }

    /// Inserts a new task with status `pending` and records the
    /// `task_created` activity entry in the same transaction.
    ///
    /// # Arguments
    ///
    /// * `title` - Short human-readable title
    /// * `description` - Optional longer description
    /// * `priority` - Scheduling priority
    /// * `created_by` - Agent or user creating the task
    /// * `assigned_to` - Optional initial assignee
    /// * `project` - Optional project label
    /// * `tags` - Optional tag list
    /// * `mentions` - Optional list of mentioned agent names
    /// * `due_at` - Optional due timestamp (RFC 3339)
    ///
    /// # Returns
    ///
    /// The inserted task row
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    #[allow(clippy::too_many_arguments)]
    pub fn create_task(
        &mut self,
        title: String,
        description: Option<String>,
        priority: TaskPriority,
        created_by: String,
        assigned_to: Option<String>,
        project: Option<String>,
        tags: Option<Vec<String>>,
        mentions: Option<Vec<String>>,
        due_at: Option<String>,
    ) -> Result<Task, Error> {
        let now = Utc::now().to_rfc3339();

        let new_task = Task {
            id: Uuid::new_v4().to_string(),
            title,
            description,
            status: TaskStatus::Pending.to_string(),
            priority: priority.to_string(),
            created_by,
            assigned_to,
            project,
            tags: tags.map(|t| serde_json::to_string(&t)).transpose()?,
            mentions: mentions.map(|m| serde_json::to_string(&m)).transpose()?,
            due_at,
            started_at: None,
            completed_at: None,
            created_at: now.clone(),
            updated_at: now.clone(),
        };

        self.conn.transaction::<_, Error, _>(|conn| {
            diesel::insert_into(tasks::table)
                .values(&new_task)
                .execute(conn)?;

            insert_activity(
                conn,
                &new_task.created_by,
                ACTION_TASK_CREATED,
                Some(&new_task.id),
                serde_json::json!({ "title": new_task.title }),
                &now,
            )?;

            Ok(())
        })?;

        Ok(new_task)
    }

    /// Retrieves all tasks in queue order: urgent first, then by
    /// recency. Cancelled tasks are excluded unless requested.
    pub fn list_tasks(&mut self, include_cancelled: bool) -> Result<Vec<Task>, Error> {
        let mut found_tasks = tasks::table.load::<Task>(self.conn)?;

        if !include_cancelled {
            found_tasks.retain(|t| t.status != TaskStatus::Cancelled.to_string());
        }

        found_tasks.sort_by(|a, b| {
            let rank_a = TaskPriority::from_str(&a.priority)
                .unwrap_or(TaskPriority::Normal)
                .rank();
            let rank_b = TaskPriority::from_str(&b.priority)
                .unwrap_or(TaskPriority::Normal)
                .rank();
            rank_a
                .cmp(&rank_b)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        Ok(found_tasks)
    }

    /// Retrieves all tasks with the given status
    pub fn get_tasks_by_status(&mut self, filter_status: &TaskStatus) -> Result<Vec<Task>, Error> {
        use crate::schema::tasks::dsl::*;
        let found_tasks = tasks
            .filter(status.eq(filter_status.to_string()))
            .load::<Task>(self.conn)?;
        Ok(found_tasks)
    }

    /// Retrieves all tasks assigned to the given agent
    pub fn get_tasks_by_assignee(&mut self, assignee: &str) -> Result<Vec<Task>, Error> {
        use crate::schema::tasks::dsl::*;
        let found_tasks = tasks
            .filter(assigned_to.eq(assignee))
            .load::<Task>(self.conn)?;
        Ok(found_tasks)
    }

    /// Retrieves a single task by id
    ///
    /// # Errors
    ///
    /// Returns `Error::TaskNotFound` if no task has this id
    pub fn get_task(&mut self, task_id: &str) -> Result<Task, Error> {
        let found = tasks::table
            .filter(tasks::id.eq(task_id))
            .first::<Task>(self.conn)
            .optional()?;
        found.ok_or_else(|| Error::TaskNotFound(task_id.to_string()))
    }

    /// Transitions a task to `new_status`.
    ///
    /// Stamps `started_at` on the first transition into `in_progress`
    /// and `completed_at` on the first transition into `done`; both are
    /// idempotent and never overwritten. Writes one audit-trail row
    /// (field "status") and one activity entry whose action is derived
    /// from the target status. All three writes commit in a single
    /// transaction.
    ///
    /// # Arguments
    ///
    /// * `task_id` - The task to transition
    /// * `new_status` - Target status
    /// * `changed_by` - Optional actor; defaults to the current
    ///   assignee, then "system"
    ///
    /// # Returns
    ///
    /// The task row as it was after the transition
    ///
    /// # Errors
    ///
    /// Returns `Error::TaskNotFound` if no task has this id, or an
    /// Error if database operations fail
    pub fn update_status(
        &mut self,
        task_id: &str,
        new_status: TaskStatus,
        changed_by: Option<&str>,
    ) -> Result<Task, Error> {
        let task = self.get_task(task_id)?;
        let now = Utc::now().to_rfc3339();

        let actor = changed_by
            .map(|c| c.to_string())
            .or_else(|| task.assigned_to.clone())
            .unwrap_or_else(|| SYSTEM_ACTOR.to_string());

        let stamp_started =
            new_status == TaskStatus::InProgress && task.started_at.is_none();
        let stamp_completed = new_status == TaskStatus::Done && task.completed_at.is_none();

        let patch = StatusPatch {
            status: new_status.to_string(),
            updated_at: &now,
            started_at: stamp_started.then_some(now.as_str()),
            completed_at: stamp_completed.then_some(now.as_str()),
        };

        self.conn.transaction::<_, Error, _>(|conn| {
            diesel::update(tasks::table.filter(tasks::id.eq(task_id)))
                .set(&patch)
                .execute(conn)?;

            insert_history(
                conn,
                task_id,
                &actor,
                "status",
                Some(task.status.clone()),
                Some(new_status.to_string()),
                &now,
            )?;

            insert_activity(
                conn,
                &actor,
                new_status.activity_action(),
                Some(task_id),
                serde_json::json!({
                    "title": task.title,
                    "old_status": task.status,
                    "new_status": new_status.to_string(),
                }),
                &now,
            )?;

            Ok(())
        })?;

        self.get_task(task_id)
    }

    /// Changes the assignee of a task and writes one audit-trail row
    /// (field "assigned_to"). Passing `None` clears the assignment.
    /// Assignment changes do not appear on the activity feed; the
    /// audit trail is their only record.
    ///
    /// # Errors
    ///
    /// Returns `Error::TaskNotFound` if no task has this id
    pub fn assign(
        &mut self,
        task_id: &str,
        new_assignee: Option<String>,
        changed_by: Option<&str>,
    ) -> Result<Task, Error> {
        let task = self.get_task(task_id)?;
        let now = Utc::now().to_rfc3339();
        let actor = changed_by.unwrap_or(SYSTEM_ACTOR).to_string();

        self.conn.transaction::<_, Error, _>(|conn| {
            diesel::update(tasks::table.filter(tasks::id.eq(task_id)))
                .set((
                    tasks::assigned_to.eq(new_assignee.clone()),
                    tasks::updated_at.eq(&now),
                ))
                .execute(conn)?;

            insert_history(
                conn,
                task_id,
                &actor,
                "assigned_to",
                task.assigned_to.clone(),
                new_assignee.clone(),
                &now,
            )?;

            Ok(())
        })?;

        self.get_task(task_id)
    }

    /// Applies a partial update to a task. Fields left `None` in the
    /// patch keep their current value; an entirely empty patch is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// Returns `Error::TaskNotFound` if no task has this id
    pub fn update_task(&mut self, task_id: &str, patch: TaskPatch) -> Result<Task, Error> {
        let task = self.get_task(task_id)?;
        if patch.is_empty() {
            return Ok(task);
        }

        let now = Utc::now().to_rfc3339();
        diesel::update(tasks::table.filter(tasks::id.eq(task_id)))
            .set((&patch, tasks::updated_at.eq(&now)))
            .execute(self.conn)?;

        self.get_task(task_id)
    }

    /// Retrieves the audit trail of a task, oldest change first
    pub fn get_task_history(&mut self, for_task: &str) -> Result<Vec<TaskHistoryEntry>, Error> {
        use crate::schema::task_history::dsl::*;
        let entries = task_history
            .filter(task_id.eq(for_task))
            .order_by(created_at.asc())
            .load::<TaskHistoryEntry>(self.conn)?;
        Ok(entries)
    }
}

/// Inserts one audit-trail row. Shared by the status and assignment
/// paths so both write the same shape.
fn insert_history(
    conn: &mut SqliteConnection,
    for_task: &str,
    actor: &str,
    field: &str,
    old: Option<String>,
    new: Option<String>,
    now: &str,
) -> Result<(), Error> {
    let entry = TaskHistoryEntry {
        id: Uuid::new_v4().to_string(),
        task_id: for_task.to_string(),
        changed_by: actor.to_string(),
        field_changed: field.to_string(),
        old_value: old,
        new_value: new,
        created_at: now.to_string(),
    };

    diesel::insert_into(crate::schema::task_history::table)
        .values(&entry)
        .execute(conn)?;
    Ok(())
}

/// Inserts one activity-feed row from within a task mutation
pub(crate) fn insert_activity(
    conn: &mut SqliteConnection,
    agent: &str,
    action_type: &str,
    task_id: Option<&str>,
    details: serde_json::Value,
    now: &str,
) -> Result<(), Error> {
    let entry = ActivityLog {
        id: Uuid::new_v4().to_string(),
        agent: agent.to_string(),
        action_type: action_type.to_string(),
        task_id: task_id.map(|t| t.to_string()),
        details: Some(serde_json::to_string(&details)?),
        session_id: None,
        created_at: now.to_string(),
    };

    diesel::insert_into(crate::schema::activity_logs::table)
        .values(&entry)
        .execute(conn)?;
    Ok(())
}
