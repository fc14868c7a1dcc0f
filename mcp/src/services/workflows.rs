//! Workflow API client

use std::sync::Arc;

use openapi_client::models::{ActionAck, DryRunReport};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info};

use crate::errors::McpError;
use crate::http::{to_query, Transport};
use crate::models::workflow::{validate_steps, Workflow, WorkflowDraft, WorkflowFilter, WorkflowUpdate};
use crate::services::{call, call_ack, call_validated, to_body};

const WORKFLOW_FIELDS: &[&str] = &["id", "name", "status"];
const CREATED_WORKFLOW_FIELDS: &[&str] = &["id", "name"];

#[derive(Clone)]
pub struct WorkflowsService {
    transport: Arc<dyn Transport>,
}

impl WorkflowsService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn list(&self, filter: &WorkflowFilter) -> Result<Vec<Workflow>, McpError> {
        call(&*self.transport, Method::GET, "/mcp/workflows", &to_query(filter)?, None).await
    }

    pub async fn get(&self, id: &str) -> Result<Workflow, McpError> {
        let path = format!("/mcp/workflows/{}", id);
        call_validated(&*self.transport, Method::GET, &path, None, WORKFLOW_FIELDS).await
    }

    /// Create a workflow; the step graph is checked locally before sending
    pub async fn create(&self, draft: &WorkflowDraft) -> Result<Workflow, McpError> {
        let order = validate_steps(&draft.steps)?;
        debug!(name = %draft.name, ?order, "Workflow step order");

        call_validated(
            &*self.transport,
            Method::POST,
            "/mcp/workflows",
            Some(to_body(draft)?),
            CREATED_WORKFLOW_FIELDS,
        )
        .await
    }

    pub async fn update(&self, id: &str, patch: &WorkflowUpdate) -> Result<Workflow, McpError> {
        if let Some(steps) = &patch.steps {
            validate_steps(steps)?;
        }
        let path = format!("/mcp/workflows/{}", id);
        call(&*self.transport, Method::PATCH, &path, &[], Some(to_body(patch)?)).await
    }

    pub async fn activate(&self, id: &str) -> Result<ActionAck, McpError> {
        info!(workflow_id = id, "Activating workflow");
        let path = format!("/mcp/workflows/{}/activate", id);
        call_ack(&*self.transport, Method::POST, &path, None).await
    }

    pub async fn deactivate(&self, id: &str) -> Result<ActionAck, McpError> {
        info!(workflow_id = id, "Deactivating workflow");
        let path = format!("/mcp/workflows/{}/deactivate", id);
        call_ack(&*self.transport, Method::POST, &path, None).await
    }

    /// Execute the workflow against `payload` without side effects
    pub async fn dry_run(&self, id: &str, payload: serde_json::Value) -> Result<DryRunReport, McpError> {
        let path = format!("/mcp/workflows/{}/dry-run", id);
        call(&*self.transport, Method::POST, &path, &[], Some(json!({ "payload": payload }))).await
    }

    pub async fn remove(&self, id: &str) -> Result<ActionAck, McpError> {
        let path = format!("/mcp/workflows/{}", id);
        call_ack(&*self.transport, Method::DELETE, &path, None).await
    }
}
