//! Agent fleet API client

use std::sync::Arc;

use openapi_client::models::ActionAck;
use reqwest::Method;
use serde_json::json;
use tracing::info;

use crate::errors::McpError;
use crate::http::{to_query, Transport};
use crate::models::agent::{Agent, AgentFilter, AgentStatus};
use crate::services::{call, call_ack, call_validated, to_body};

const AGENT_FIELDS: &[&str] = &["id", "name", "status"];

#[derive(Clone)]
pub struct AgentsService {
    transport: Arc<dyn Transport>,
}

impl AgentsService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn list(&self, filter: &AgentFilter) -> Result<Vec<Agent>, McpError> {
        call(&*self.transport, Method::GET, "/mcp/agents", &to_query(filter)?, None).await
    }

    pub async fn get(&self, id: &str) -> Result<Agent, McpError> {
        let path = format!("/mcp/agents/{}", id);
        call_validated(&*self.transport, Method::GET, &path, None, AGENT_FIELDS).await
    }

    /// Request a new concurrency level.
    ///
    /// The returned agent's `current_concurrency` may still lag until the
    /// backend reconciles.
    pub async fn scale(&self, id: &str, desired_concurrency: u32) -> Result<Agent, McpError> {
        info!(agent_id = id, desired_concurrency, "Scaling agent");
        let path = format!("/mcp/agents/{}", id);
        let body = json!({ "desired_concurrency": desired_concurrency });
        call(&*self.transport, Method::PATCH, &path, &[], Some(body)).await
    }

    pub async fn restart(&self, id: &str) -> Result<ActionAck, McpError> {
        info!(agent_id = id, "Restarting agent");
        let path = format!("/mcp/agents/{}/restart", id);
        call_ack(&*self.transport, Method::POST, &path, None).await
    }

    pub async fn upgrade(&self, id: &str, version: &str) -> Result<ActionAck, McpError> {
        info!(agent_id = id, version, "Upgrading agent");
        let path = format!("/mcp/agents/{}/upgrade", id);
        call_ack(&*self.transport, Method::POST, &path, Some(json!({ "version": version }))).await
    }

    pub async fn enable(&self, id: &str) -> Result<Agent, McpError> {
        self.set_status(id, AgentStatus::Online).await
    }

    pub async fn disable(&self, id: &str) -> Result<Agent, McpError> {
        self.set_status(id, AgentStatus::Offline).await
    }

    async fn set_status(&self, id: &str, status: AgentStatus) -> Result<Agent, McpError> {
        let path = format!("/mcp/agents/{}", id);
        let body = json!({ "status": to_body(&status)? });
        call(&*self.transport, Method::PATCH, &path, &[], Some(body)).await
    }
}
