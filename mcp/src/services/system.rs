//! System operations API client

use std::sync::Arc;

use openapi_client::models::{ActionAck, HealthReport};
use reqwest::Method;
use tracing::warn;

use crate::errors::McpError;
use crate::http::Transport;
use crate::services::{call, call_ack};

#[derive(Clone)]
pub struct SystemService {
    transport: Arc<dyn Transport>,
}

impl SystemService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn health(&self) -> Result<HealthReport, McpError> {
        call(&*self.transport, Method::GET, "/mcp/system/health", &[], None).await
    }

    pub async fn restart(&self) -> Result<ActionAck, McpError> {
        warn!("Requesting platform restart");
        self.action("/mcp/system/restart").await
    }

    /// Stop accepting new work and let running tasks finish
    pub async fn drain(&self) -> Result<ActionAck, McpError> {
        warn!("Requesting platform drain");
        self.action("/mcp/system/drain").await
    }

    pub async fn reindex(&self) -> Result<ActionAck, McpError> {
        self.action("/mcp/system/reindex").await
    }

    pub async fn refresh_caches(&self) -> Result<ActionAck, McpError> {
        self.action("/mcp/system/refresh-caches").await
    }

    async fn action(&self, path: &str) -> Result<ActionAck, McpError> {
        call_ack(&*self.transport, Method::POST, path, None).await
    }
}
