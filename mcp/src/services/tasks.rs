//! Task API client

use std::sync::Arc;

use openapi_client::models::{ActionAck, TaskCreateRequest};
use reqwest::Method;
use serde::Serialize;
use tracing::info;

use crate::errors::McpError;
use crate::http::{to_query, Transport};
use crate::models::task::{Task, TaskStatus};
use crate::services::{call, call_ack, call_validated, to_body};

const TASK_FIELDS: &[&str] = &["id", "status"];

/// Task list filter
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}

#[derive(Clone)]
pub struct TasksService {
    transport: Arc<dyn Transport>,
}

impl TasksService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn create(&self, task: &TaskCreateRequest) -> Result<Task, McpError> {
        info!(task_type = %task.task_type, "Submitting task");
        call_validated(
            &*self.transport,
            Method::POST,
            "/mcp/tasks",
            Some(to_body(task)?),
            TASK_FIELDS,
        )
        .await
    }

    pub async fn get(&self, id: &str) -> Result<Task, McpError> {
        let path = format!("/mcp/tasks/{}", id);
        call_validated(&*self.transport, Method::GET, &path, None, TASK_FIELDS).await
    }

    pub async fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>, McpError> {
        call(&*self.transport, Method::GET, "/mcp/tasks", &to_query(filter)?, None).await
    }

    /// Ask the backend to cancel a queued or running task
    pub async fn cancel(&self, id: &str) -> Result<ActionAck, McpError> {
        info!(task_id = id, "Cancelling task");
        let path = format!("/mcp/tasks/{}/cancel", id);
        call_ack(&*self.transport, Method::POST, &path, None).await
    }

    /// Resubmit a task; the backend returns the new attempt
    pub async fn retry(&self, id: &str) -> Result<Task, McpError> {
        let path = format!("/mcp/tasks/{}/retry", id);
        call(&*self.transport, Method::POST, &path, &[], None).await
    }
}
