//! Assistant API client

use std::sync::Arc;

use openapi_client::models::{AssistantRequest, AssistantResponse};
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::errors::McpError;
use crate::http::{to_query, Transport};
use crate::services::{call, call_validated, to_body};

const RESPONSE_FIELDS: &[&str] = &["conversation_id", "message"];

/// Conversation paging
#[derive(Debug, Clone, Default, Serialize)]
pub struct Page {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

#[derive(Clone)]
pub struct AssistantService {
    transport: Arc<dyn Transport>,
}

impl AssistantService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn invoke(&self, request: &AssistantRequest) -> Result<AssistantResponse, McpError> {
        call_validated(
            &*self.transport,
            Method::POST,
            "/mcp/assistant/invoke",
            Some(to_body(request)?),
            RESPONSE_FIELDS,
        )
        .await
    }

    // Conversation bodies have no fixed schema on the backend yet

    pub async fn list_conversations(&self, page: &Page) -> Result<Value, McpError> {
        self.transport
            .send(Method::GET, "/mcp/assistant/conversations", &to_query(page)?, None)
            .await
    }

    pub async fn get_conversation(&self, id: &str) -> Result<Value, McpError> {
        let path = format!("/mcp/assistant/conversations/{}", id);
        self.transport.send(Method::GET, &path, &[], None).await
    }

    pub async fn delete_conversation(&self, id: &str) -> Result<Value, McpError> {
        let path = format!("/mcp/assistant/conversations/{}", id);
        call(&*self.transport, Method::DELETE, &path, &[], None).await
    }
}
