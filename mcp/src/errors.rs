//! Error types for the MCP client

use thiserror::Error;

/// Main error type for the MCP client
#[derive(Error, Debug)]
pub enum McpError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: missing field '{field}'")]
    MalformedResponse { field: String },

    #[error("Envelope error: {0}")]
    Envelope(String),

    #[error("Task {task_id} did not complete within {attempts} attempts")]
    PollTimeout { task_id: String, attempts: u32 },

    #[error("Polling of task {task_id} was cancelled")]
    PollCancelled { task_id: String },

    #[error("Invalid task transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Malformed log record: {0}")]
    MalformedRecord(String),

    #[error("Invalid workflow: {0}")]
    InvalidWorkflow(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl McpError {
    /// True for failures of the transport itself (network or non-2xx status)
    pub fn is_transport(&self) -> bool {
        matches!(self, McpError::HttpError(_) | McpError::Status { .. })
    }

    /// HTTP status code if the backend answered with one
    pub fn status(&self) -> Option<u16> {
        match self {
            McpError::Status { status, .. } => Some(*status),
            McpError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
