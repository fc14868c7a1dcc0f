//! Resource-family services
//!
//! Each family is constructed independently from an injected [`Transport`].
//! [`McpClient`] bundles one of each for callers that want them all.

pub mod agents;
pub mod assistant;
pub mod documents;
pub mod logs;
pub mod metrics;
pub mod profile;
pub mod settings;
pub mod system;
pub mod tasks;
pub mod users;
pub mod workflows;

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use openapi_client::models::ActionAck;

use crate::errors::McpError;
use crate::http::Transport;
use crate::stream::ReconnectPolicy;
use crate::validate::validate_into;

pub use agents::AgentsService;
pub use assistant::AssistantService;
pub use documents::DocumentsService;
pub use logs::LogsService;
pub use metrics::MetricsService;
pub use profile::ProfileService;
pub use settings::SettingsService;
pub use system::SystemService;
pub use tasks::TasksService;
pub use users::UsersService;
pub use workflows::WorkflowsService;

/// All resource families over one transport
#[derive(Clone)]
pub struct McpClient {
    pub metrics: MetricsService,
    pub users: UsersService,
    pub settings: SettingsService,
    pub agents: AgentsService,
    pub workflows: WorkflowsService,
    pub logs: LogsService,
    pub tasks: TasksService,
    pub assistant: AssistantService,
    pub documents: DocumentsService,
    pub system: SystemService,
    pub profile: ProfileService,
}

impl McpClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_reconnect(transport, ReconnectPolicy::default())
    }

    /// Like [`McpClient::new`], with a reconnection policy for log streams
    pub fn with_reconnect(transport: Arc<dyn Transport>, policy: ReconnectPolicy) -> Self {
        Self {
            metrics: MetricsService::new(transport.clone()),
            users: UsersService::new(transport.clone()),
            settings: SettingsService::new(transport.clone()),
            agents: AgentsService::new(transport.clone()),
            workflows: WorkflowsService::new(transport.clone()),
            logs: LogsService::with_reconnect(transport.clone(), policy),
            tasks: TasksService::new(transport.clone()),
            assistant: AssistantService::new(transport.clone()),
            documents: DocumentsService::new(transport.clone()),
            system: SystemService::new(transport.clone()),
            profile: ProfileService::new(transport),
        }
    }
}

/// Serialize a request body
pub(crate) fn to_body<B: Serialize>(body: &B) -> Result<Value, McpError> {
    Ok(serde_json::to_value(body)?)
}

/// Send a request and decode a bare (unenveloped) payload
pub(crate) async fn call<T: DeserializeOwned>(
    transport: &dyn Transport,
    method: Method,
    path: &str,
    query: &[(String, String)],
    body: Option<Value>,
) -> Result<T, McpError> {
    let payload = transport.send(method, path, query, body).await?;
    Ok(serde_json::from_value(payload)?)
}

/// Send an action request; an empty success body counts as an ack
pub(crate) async fn call_ack(
    transport: &dyn Transport,
    method: Method,
    path: &str,
    body: Option<Value>,
) -> Result<ActionAck, McpError> {
    match transport.send(method, path, &[], body).await? {
        Value::Null => Ok(ActionAck::accepted()),
        payload => Ok(serde_json::from_value(payload)?),
    }
}

/// Send a request returning a single entity, checking its required fields
pub(crate) async fn call_validated<T: DeserializeOwned>(
    transport: &dyn Transport,
    method: Method,
    path: &str,
    body: Option<Value>,
    required: &[&str],
) -> Result<T, McpError> {
    let payload = transport.send(method, path, &[], body).await?;
    validate_into(payload, required)
}
