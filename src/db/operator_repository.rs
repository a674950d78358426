use crate::db::models::OperatorStatus;
use crate::errors::Error;
use crate::schema::operator_status;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

/// Counter values accepted by an operator-status update; the snapshot
/// is replaced wholesale with these on every call.
#[derive(Debug, Clone)]
pub struct OperatorCounters {
    pub credits_free_remaining: f64,
    pub credits_free_total: f64,
    pub workspace_balance: f64,
    pub loop_running: bool,
    pub loop_current_task: Option<i64>,
    pub loop_total_tasks: Option<i64>,
    pub loop_project: Option<String>,
}

/// Repository for the singleton operator-status snapshot
pub struct OperatorRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> OperatorRepository<'a> {
    /// Creates a new OperatorRepository instance
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        OperatorRepository { conn }
    }

    /// Retrieves the snapshot, or `None` when it was never written
    pub fn get(&mut self) -> Result<Option<OperatorStatus>, Error> {
        let found = operator_status::table
            .first::<OperatorStatus>(self.conn)
            .optional()?;
        Ok(found)
    }

    /// Replaces the snapshot with the supplied counters and stamps
    /// `last_updated`. Inserts the row on first use.
    pub fn update(&mut self, counters: OperatorCounters) -> Result<OperatorStatus, Error> {
        let now = Utc::now().to_rfc3339();

        let row = OperatorStatus {
            id: match self.get()? {
                Some(existing) => existing.id,
                None => Uuid::new_v4().to_string(),
            },
            credits_free_remaining: counters.credits_free_remaining,
            credits_free_total: counters.credits_free_total,
            workspace_balance: counters.workspace_balance,
            loop_running: counters.loop_running,
            loop_current_task: counters.loop_current_task,
            loop_total_tasks: counters.loop_total_tasks,
            loop_project: counters.loop_project,
            last_updated: now,
        };

        diesel::replace_into(operator_status::table)
            .values(&row)
            .execute(self.conn)?;
        Ok(row)
    }
}
