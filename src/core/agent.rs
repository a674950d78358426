use crate::constants::{DEFAULT_AGENT_EMOJI, DEFAULT_AGENT_ROLE};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Presence status reported by an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Online,
    Busy,
    Offline,
}

#[allow(clippy::to_string_trait_impl)]
impl ToString for AgentStatus {
    fn to_string(&self) -> String {
        match self {
            AgentStatus::Online => "online".to_string(),
            AgentStatus::Busy => "busy".to_string(),
            AgentStatus::Offline => "offline".to_string(),
        }
    }
}

impl FromStr for AgentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(AgentStatus::Online),
            "busy" => Ok(AgentStatus::Busy),
            "offline" => Ok(AgentStatus::Offline),
            _ => Err(()),
        }
    }
}

/// Health assessment derived from heartbeats and status changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Error,
}

#[allow(clippy::to_string_trait_impl)]
impl ToString for HealthStatus {
    fn to_string(&self) -> String {
        match self {
            HealthStatus::Healthy => "healthy".to_string(),
            HealthStatus::Degraded => "degraded".to_string(),
            HealthStatus::Error => "error".to_string(),
        }
    }
}

impl FromStr for HealthStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "healthy" => Ok(HealthStatus::Healthy),
            "degraded" => Ok(HealthStatus::Degraded),
            "error" => Ok(HealthStatus::Error),
            _ => Err(()),
        }
    }
}

/// Display configuration attached to an agent record, stored as a JSON
/// column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentConfig {
    /// Role label shown on the dashboard
    pub role: String,
    /// Emoji shown next to the agent name
    pub emoji: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        AgentConfig {
            role: DEFAULT_AGENT_ROLE.to_string(),
            emoji: DEFAULT_AGENT_EMOJI.to_string(),
        }
    }
}
