use crate::db::models::CostEntry;
use crate::errors::Error;
use crate::schema::costs;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Accumulated usage for one agent inside a summary window
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AgentCostSummary {
    pub tokens_in: i64,
    pub tokens_out: i64,
    pub cost: f64,
    /// Number of ledger entries, i.e. turns, in the window
    pub turns: i64,
}

/// Aggregated cost report over a time window
#[derive(Debug, Clone, Serialize)]
pub struct CostSummary {
    /// Per-agent accumulation, keyed by agent name
    pub by_agent: BTreeMap<String, AgentCostSummary>,
    /// Sum of estimated cost across all agents in the window
    pub total_cost: f64,
    /// Total number of turns in the window
    pub turn_count: i64,
}

/// Repository for the per-turn cost ledger
pub struct CostRepository<'a> {
    /// Database connection
    pub conn: &'a mut SqliteConnection,
}

impl<'a> CostRepository<'a> {
    /// Creates a new CostRepository instance
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        CostRepository { conn }
    }

    /// Records one cost ledger entry
    ///
    /// # Arguments
    ///
    /// * `agent` - Agent the turn belongs to
    /// * `model` - Model that served the turn
    /// * `tokens_in` - Input token count
    /// * `tokens_out` - Output token count
    /// * `estimated_cost` - Estimated cost of the turn
    /// * `task_id` - Optional related task
    /// * `session_id` - Optional session identifier
    /// * `turn_type` - Optional turn classification
    ///
    /// # Returns
    ///
    /// The inserted ledger row
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    #[allow(clippy::too_many_arguments)]
    pub fn record(
        &mut self,
        agent: String,
        model: String,
        tokens_in: i64,
        tokens_out: i64,
        estimated_cost: f64,
        task_id: Option<String>,
        session_id: Option<String>,
        turn_type: Option<String>,
    ) -> Result<CostEntry, Error> {
        let entry = CostEntry {
            id: Uuid::new_v4().to_string(),
            agent,
            model,
            tokens_in,
            tokens_out,
            estimated_cost,
            task_id,
            session_id,
            turn_type,
            created_at: Utc::now().to_rfc3339(),
        };

        diesel::insert_into(costs::table)
            .values(&entry)
            .execute(self.conn)?;
        Ok(entry)
    }

    /// Retrieves the most recent ledger entries, newest first
    pub fn recent(&mut self, limit: i64) -> Result<Vec<CostEntry>, Error> {
        use crate::schema::costs::dsl::*;
        let entries = costs
            .order_by(created_at.desc())
            .limit(limit)
            .load::<CostEntry>(self.conn)?;
        Ok(entries)
    }

    /// Retrieves the most recent ledger entries for one agent, newest
    /// first
    pub fn by_agent(&mut self, for_agent: &str, limit: i64) -> Result<Vec<CostEntry>, Error> {
        use crate::schema::costs::dsl::*;
        let entries = costs
            .filter(agent.eq(for_agent))
            .order_by(created_at.desc())
            .limit(limit)
            .load::<CostEntry>(self.conn)?;
        Ok(entries)
    }

    /// Aggregates the ledger over `[since, until)` into per-agent
    /// token/cost/turn totals plus grand totals. The window is supplied
    /// by the caller; entries whose timestamp cannot be parsed are
    /// skipped. Recomputed in full on every call.
    ///
    /// # Arguments
    ///
    /// * `since` - Inclusive window start
    /// * `until` - Optional exclusive window end
    ///
    /// # Returns
    ///
    /// The aggregated summary for the window
    ///
    /// # Errors
    ///
    /// Returns an Error if database operations fail
    pub fn summary(
        &mut self,
        since: DateTime<Utc>,
        until: Option<DateTime<Utc>>,
    ) -> Result<CostSummary, Error> {
        let entries = costs::table.load::<CostEntry>(self.conn)?;

        let mut by_agent: BTreeMap<String, AgentCostSummary> = BTreeMap::new();
        let mut total_cost = 0.0;
        let mut turn_count = 0;

        for entry in entries {
            let created = match DateTime::parse_from_rfc3339(&entry.created_at) {
                Ok(t) => t.with_timezone(&Utc),
                Err(_) => continue,
            };
            if created < since {
                continue;
            }
            if let Some(end) = until {
                if created >= end {
                    continue;
                }
            }

            let agent_summary = by_agent.entry(entry.agent).or_default();
            agent_summary.tokens_in += entry.tokens_in;
            agent_summary.tokens_out += entry.tokens_out;
            agent_summary.cost += entry.estimated_cost;
            agent_summary.turns += 1;

            total_cost += entry.estimated_cost;
            turn_count += 1;
        }

        Ok(CostSummary {
            by_agent,
            total_cost,
            turn_count,
        })
    }
}
