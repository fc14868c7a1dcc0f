//! Log query, export and live stream client

use std::sync::Arc;

use reqwest::Method;

use crate::errors::McpError;
use crate::http::{to_query, Transport};
use crate::models::log::{LogExportQuery, LogQuery, LogRecord, LogStreamFilter};
use crate::services::call;
use crate::stream::{LogStreamManager, LogSubscription, ReconnectPolicy};

#[derive(Clone)]
pub struct LogsService {
    transport: Arc<dyn Transport>,
    streams: LogStreamManager,
}

impl LogsService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_reconnect(transport, ReconnectPolicy::default())
    }

    pub fn with_reconnect(transport: Arc<dyn Transport>, policy: ReconnectPolicy) -> Self {
        Self {
            streams: LogStreamManager::new(transport.clone(), policy),
            transport,
        }
    }

    pub async fn list(&self, query: &LogQuery) -> Result<Vec<LogRecord>, McpError> {
        call(&*self.transport, Method::GET, "/mcp/logs", &to_query(query)?, None).await
    }

    /// Export matching records as a JSON or CSV file
    pub async fn export(&self, query: &LogExportQuery) -> Result<Vec<u8>, McpError> {
        self.transport
            .download("/mcp/logs/export", &to_query(query)?)
            .await
    }

    /// Live records; see [`LogStreamManager::stream_logs`]
    pub fn stream<M, E>(
        &self,
        filter: &LogStreamFilter,
        on_message: M,
        on_error: E,
    ) -> Result<LogSubscription, McpError>
    where
        M: FnMut(LogRecord) + Send + 'static,
        E: FnMut(McpError) + Send + 'static,
    {
        self.streams.stream_logs(filter, on_message, on_error)
    }
}
