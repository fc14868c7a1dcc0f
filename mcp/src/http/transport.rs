//! Transport abstraction consumed by the resource services

use async_trait::async_trait;
use futures::stream::BoxStream;
use reqwest::Method;
use serde::Serialize;

use crate::errors::McpError;

/// Query string as ordered key/value pairs
pub type Query = Vec<(String, String)>;

/// Raw event payloads delivered by a server-push channel
pub type EventStream = BoxStream<'static, Result<String, McpError>>;

/// One file part of a multipart upload
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Multipart form: one file plus optional text fields
#[derive(Debug, Clone)]
pub struct MultipartUpload {
    pub file: FilePart,
    pub fields: Vec<(String, String)>,
}

/// Request/response plumbing to the MCP backend.
///
/// Implementations hold the base configuration (URL, credentials), which is
/// fixed at construction. Bodies cross this boundary as JSON values; decoding
/// into typed models happens in the services.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a JSON request and decode the JSON response (empty body = `null`)
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, McpError>;

    /// POST a multipart form
    async fn upload(
        &self,
        path: &str,
        form: MultipartUpload,
    ) -> Result<serde_json::Value, McpError>;

    /// GET a binary (blob) response
    async fn download(&self, path: &str, query: &[(String, String)]) -> Result<Vec<u8>, McpError>;

    /// Open a server-push channel
    async fn open_stream(&self, path: &str, query: &[(String, String)])
        -> Result<EventStream, McpError>;
}

/// Flatten a serializable filter struct into query pairs.
///
/// `None` fields must be skipped by the struct's serde attributes; nested
/// values are sent as compact JSON.
pub fn to_query<T: Serialize>(params: &T) -> Result<Query, McpError> {
    let value = serde_json::to_value(params)?;
    let mut query = Vec::new();

    match value {
        serde_json::Value::Object(map) => {
            for (key, value) in map {
                match value {
                    serde_json::Value::Null => {}
                    serde_json::Value::String(s) => query.push((key, s)),
                    other => query.push((key, other.to_string())),
                }
            }
        }
        serde_json::Value::Null => {}
        other => {
            return Err(McpError::ConfigError(format!(
                "query parameters must serialize to an object, got {}",
                other
            )))
        }
    }

    Ok(query)
}
