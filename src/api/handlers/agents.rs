use crate::api::errors::ApiError;
use crate::core::{AgentConfig, AgentStatus, HealthStatus};
use crate::db::Agent;
use crate::db::{AgentRepository, Database};
use axum::{
    extract::{Extension, Path},
    Json,
};
use serde::{Deserialize, Serialize};

/// Agent representation returned by the API, display config expanded
/// from its JSON column
#[derive(Serialize)]
pub struct AgentDto {
    pub id: String,
    pub name: String,
    pub status: String,
    pub health: String,
    pub current_task_id: Option<String>,
    pub last_heartbeat: Option<String>,
    pub tokens_today: i64,
    pub cost_today: f64,
    pub config: AgentConfig,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Agent> for AgentDto {
    fn from(agent: Agent) -> Self {
        AgentDto {
            config: serde_json::from_str(&agent.config).unwrap_or_default(),
            id: agent.id,
            name: agent.name,
            status: agent.status,
            health: agent.health,
            current_task_id: agent.current_task_id,
            last_heartbeat: agent.last_heartbeat,
            tokens_today: agent.tokens_today,
            cost_today: agent.cost_today,
            created_at: agent.created_at,
            updated_at: agent.updated_at,
        }
    }
}

/// Upsert payload; only the supplied fields are written
#[derive(Deserialize)]
pub struct UpsertAgentRequest {
    pub status: Option<AgentStatus>,
    pub config: Option<AgentConfig>,
    pub health: Option<HealthStatus>,
}

#[derive(Deserialize)]
pub struct UpdateAgentStatusRequest {
    pub status: AgentStatus,
}

/// Heartbeat payload; status defaults to `online`, an omitted task id
/// clears the agent's current task
#[derive(Deserialize, Default)]
pub struct HeartbeatRequest {
    pub status: Option<AgentStatus>,
    pub current_task_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateAgentCostsRequest {
    pub tokens_today: i64,
    pub cost_today: f64,
}

/// Lists all registered agents, oldest registration first
#[axum::debug_handler]
pub async fn list_agents(
    Extension(database): Extension<Database>,
) -> Result<Json<Vec<AgentDto>>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = AgentRepository::new(&mut conn);
    let agents = repo.list_agents()?;
    Ok(Json(agents.into_iter().map(AgentDto::from).collect()))
}

/// Retrieves one agent by name
#[axum::debug_handler]
pub async fn get_agent(
    Path(name): Path<String>,
    Extension(database): Extension<Database>,
) -> Result<Json<AgentDto>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = AgentRepository::new(&mut conn);
    let agent = repo.get_agent_by_name(&name)?;
    Ok(Json(agent.into()))
}

/// Creates an agent on first reference or patches the supplied fields
#[axum::debug_handler]
pub async fn upsert_agent(
    Path(name): Path<String>,
    Extension(database): Extension<Database>,
    Json(payload): Json<UpsertAgentRequest>,
) -> Result<Json<AgentDto>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = AgentRepository::new(&mut conn);
    let agent = repo.upsert_agent(&name, payload.status, payload.config, payload.health)?;
    Ok(Json(agent.into()))
}

/// Changes an agent's presence status
#[axum::debug_handler]
pub async fn update_agent_status(
    Path(name): Path<String>,
    Extension(database): Extension<Database>,
    Json(payload): Json<UpdateAgentStatusRequest>,
) -> Result<Json<AgentDto>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = AgentRepository::new(&mut conn);
    let agent = repo.update_agent_status(&name, payload.status)?;
    Ok(Json(agent.into()))
}

/// Records a heartbeat for an already-registered agent
#[axum::debug_handler]
pub async fn agent_heartbeat(
    Path(name): Path<String>,
    Extension(database): Extension<Database>,
    Json(payload): Json<HeartbeatRequest>,
) -> Result<Json<AgentDto>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = AgentRepository::new(&mut conn);
    let agent = repo.heartbeat(&name, payload.status, payload.current_task_id)?;
    Ok(Json(agent.into()))
}

/// Replaces an agent's daily token/cost counters
#[axum::debug_handler]
pub async fn update_agent_costs(
    Path(name): Path<String>,
    Extension(database): Extension<Database>,
    Json(payload): Json<UpdateAgentCostsRequest>,
) -> Result<Json<AgentDto>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = AgentRepository::new(&mut conn);
    let agent = repo.update_costs(&name, payload.tokens_today, payload.cost_today)?;
    Ok(Json(agent.into()))
}

/// Zeroes the daily counters of every agent
#[axum::debug_handler]
pub async fn reset_daily_costs(
    Extension(database): Extension<Database>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut conn = database.get_conn();
    let mut repo = AgentRepository::new(&mut conn);
    let reset = repo.reset_daily_costs()?;
    Ok(Json(serde_json::json!({ "reset": reset })))
}
