//! Agent models

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A worker agent registered with the control plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,

    pub name: String,

    #[serde(rename = "type", default)]
    pub agent_type: String,

    pub status: AgentStatus,

    #[serde(default)]
    pub capabilities: Vec<String>,

    #[serde(default)]
    pub last_heartbeat: Option<String>,

    #[serde(default)]
    pub version: Option<String>,

    /// Concurrency requested by an operator
    #[serde(default)]
    pub desired_concurrency: u32,

    /// Concurrency the backend has reconciled so far; may lag
    /// `desired_concurrency`
    #[serde(default)]
    pub current_concurrency: u32,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Agent {
    /// Whether the backend has caught up with the requested concurrency
    pub fn is_reconciled(&self) -> bool {
        self.current_concurrency == self.desired_concurrency
    }
}

/// Agent status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Online,
    Offline,
    Degraded,
    Maintenance,
}

/// Agent list filters
#[derive(Debug, Clone, Default, Serialize)]
pub struct AgentFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AgentStatus>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<String>,
}
