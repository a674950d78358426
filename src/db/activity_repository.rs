use crate::db::models::ActivityLog;
use crate::errors::Error;
use crate::schema::activity_logs;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

/// Repository for the append-only activity feed
pub struct ActivityRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> ActivityRepository<'a> {
    /// Creates a new ActivityRepository instance
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        ActivityRepository { conn }
    }

    /// Appends one activity entry
    ///
    /// # Arguments
    ///
    /// * `agent` - Agent that performed the action
    /// * `action_type` - Action label, e.g. "task_completed"
    /// * `task_id` - Optional related task
    /// * `details` - Optional free-form JSON detail payload
    /// * `session_id` - Optional session the action belongs to
    ///
    /// # Returns
    ///
    /// The inserted activity row
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    pub fn log(
        &mut self,
        agent: String,
        action_type: String,
        task_id: Option<String>,
        details: Option<serde_json::Value>,
        session_id: Option<String>,
    ) -> Result<ActivityLog, Error> {
        let entry = ActivityLog {
            id: Uuid::new_v4().to_string(),
            agent,
            action_type,
            task_id,
            details: details.map(|d| serde_json::to_string(&d)).transpose()?,
            session_id,
            created_at: Utc::now().to_rfc3339(),
        };

        diesel::insert_into(activity_logs::table)
            .values(&entry)
            .execute(self.conn)?;
        Ok(entry)
    }

    /// Retrieves the most recent activity entries, newest first
    pub fn recent(&mut self, limit: i64) -> Result<Vec<ActivityLog>, Error> {
        use crate::schema::activity_logs::dsl::*;
        let logs = activity_logs
            .order_by(created_at.desc())
            .limit(limit)
            .load::<ActivityLog>(self.conn)?;
        Ok(logs)
    }

    /// Retrieves the most recent activity entries for one agent,
    /// newest first
    pub fn by_agent(&mut self, for_agent: &str, limit: i64) -> Result<Vec<ActivityLog>, Error> {
        use crate::schema::activity_logs::dsl::*;
        let logs = activity_logs
            .filter(agent.eq(for_agent))
            .order_by(created_at.desc())
            .limit(limit)
            .load::<ActivityLog>(self.conn)?;
        Ok(logs)
    }
}
