use crate::core::{AgentConfig, AgentStatus, HealthStatus};
use crate::db::models::Agent;
use crate::errors::Error;
use crate::schema::agents;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

/// Partial update applied by upsert when the agent already exists;
/// `None` fields keep their current value.
#[derive(AsChangeset)]
#[diesel(table_name = agents)]
struct AgentPatch<'a> {
    status: Option<String>,
    health: Option<String>,
    config: Option<String>,
    updated_at: &'a str,
}

/// Repository for the agent presence registry
pub struct AgentRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> AgentRepository<'a> {
    /// Creates a new AgentRepository instance
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        AgentRepository { conn }
    }

    /// Retrieves all agents, oldest registration first
    pub fn list_agents(&mut self) -> Result<Vec<Agent>, Error> {
        use crate::schema::agents::dsl::*;
        let found = agents.order_by(created_at.asc()).load::<Agent>(self.conn)?;
        Ok(found)
    }

    /// Retrieves an agent by its unique name
    ///
    /// # Errors
    ///
    /// Returns `Error::AgentNotFound` if no agent has this name
    pub fn get_agent_by_name(&mut self, agent_name: &str) -> Result<Agent, Error> {
        self.find_agent_by_name(agent_name)?
            .ok_or_else(|| Error::AgentNotFound(agent_name.to_string()))
    }

    fn find_agent_by_name(&mut self, agent_name: &str) -> Result<Option<Agent>, Error> {
        let found = agents::table
            .filter(agents::name.eq(agent_name))
            .first::<Agent>(self.conn)
            .optional()?;
        Ok(found)
    }

    /// Creates the agent on first reference or patches it in place.
    /// Only the fields supplied are updated; an absent agent is created
    /// with defaults (`offline`, `healthy`, default display config).
    ///
    /// # Arguments
    ///
    /// * `agent_name` - Unique agent name, the upsert key
    /// * `status` - Optional presence status
    /// * `config` - Optional display configuration
    /// * `health` - Optional health status
    ///
    /// # Returns
    ///
    /// The agent row after the upsert
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    pub fn upsert_agent(
        &mut self,
        agent_name: &str,
        status: Option<AgentStatus>,
        config: Option<AgentConfig>,
        health: Option<HealthStatus>,
    ) -> Result<Agent, Error> {
        let now = Utc::now().to_rfc3339();

        if let Some(existing) = self.find_agent_by_name(agent_name)? {
            let patch = AgentPatch {
                status: status.map(|s| s.to_string()),
                health: health.map(|h| h.to_string()),
                config: config.map(|c| serde_json::to_string(&c)).transpose()?,
                updated_at: &now,
            };

            diesel::update(agents::table.filter(agents::id.eq(&existing.id)))
                .set(&patch)
                .execute(self.conn)?;

            return self.get_agent_by_name(agent_name);
        }

        let new_agent = Agent {
            id: Uuid::new_v4().to_string(),
            name: agent_name.to_string(),
            status: status.unwrap_or(AgentStatus::Offline).to_string(),
            health: health.unwrap_or(HealthStatus::Healthy).to_string(),
            current_task_id: None,
            last_heartbeat: None,
            tokens_today: 0,
            cost_today: 0.0,
            config: serde_json::to_string(&config.unwrap_or_default())?,
            created_at: now.clone(),
            updated_at: now,
        };

        diesel::insert_into(agents::table)
            .values(&new_agent)
            .execute(self.conn)?;
        Ok(new_agent)
    }

    /// Changes an agent's presence status. Going offline marks the
    /// agent degraded; any other status marks it healthy.
    ///
    /// # Errors
    ///
    /// Returns `Error::AgentNotFound` if no agent has this name
    pub fn update_agent_status(
        &mut self,
        agent_name: &str,
        status: AgentStatus,
    ) -> Result<Agent, Error> {
        let agent = self.get_agent_by_name(agent_name)?;
        let now = Utc::now().to_rfc3339();

        let health = if status == AgentStatus::Offline {
            HealthStatus::Degraded
        } else {
            HealthStatus::Healthy
        };

        diesel::update(agents::table.filter(agents::id.eq(&agent.id)))
            .set((
                agents::status.eq(status.to_string()),
                agents::health.eq(health.to_string()),
                agents::updated_at.eq(&now),
            ))
            .execute(self.conn)?;

        self.get_agent_by_name(agent_name)
    }

    /// Records a heartbeat: stamps the current time, marks the agent
    /// healthy, and overwrites status and current task from the call.
    /// Unlike upsert, a heartbeat never creates the agent.
    ///
    /// # Arguments
    ///
    /// * `agent_name` - Unique agent name
    /// * `status` - Presence status; defaults to `online`
    /// * `current_task_id` - Task the agent is working on; cleared when
    ///   omitted
    ///
    /// # Returns
    ///
    /// The agent row after the heartbeat
    ///
    /// # Errors
    ///
    /// Returns `Error::AgentNotFound` if no agent has this name
    pub fn heartbeat(
        &mut self,
        agent_name: &str,
        status: Option<AgentStatus>,
        current_task_id: Option<String>,
    ) -> Result<Agent, Error> {
        let agent = self.get_agent_by_name(agent_name)?;
        let now = Utc::now().to_rfc3339();

        diesel::update(agents::table.filter(agents::id.eq(&agent.id)))
            .set((
                agents::last_heartbeat.eq(Some(now.clone())),
                agents::status.eq(status.unwrap_or(AgentStatus::Online).to_string()),
                agents::health.eq(HealthStatus::Healthy.to_string()),
                agents::current_task_id.eq(current_task_id),
                agents::updated_at.eq(&now),
            ))
            .execute(self.conn)?;

        self.get_agent_by_name(agent_name)
    }

    /// Replaces an agent's daily token/cost counters
    ///
    /// # Errors
    ///
    /// Returns `Error::AgentNotFound` if no agent has this name
    pub fn update_costs(
        &mut self,
        agent_name: &str,
        tokens_today: i64,
        cost_today: f64,
    ) -> Result<Agent, Error> {
        let agent = self.get_agent_by_name(agent_name)?;
        let now = Utc::now().to_rfc3339();

        diesel::update(agents::table.filter(agents::id.eq(&agent.id)))
            .set((
                agents::tokens_today.eq(tokens_today),
                agents::cost_today.eq(cost_today),
                agents::updated_at.eq(&now),
            ))
            .execute(self.conn)?;

        self.get_agent_by_name(agent_name)
    }

    /// Zeroes the daily token/cost counters of every agent
    pub fn reset_daily_costs(&mut self) -> Result<usize, Error> {
        let now = Utc::now().to_rfc3339();
        let updated = diesel::update(agents::table)
            .set((
                agents::tokens_today.eq(0i64),
                agents::cost_today.eq(0.0f64),
                agents::updated_at.eq(&now),
            ))
            .execute(self.conn)?;
        Ok(updated)
    }
}
