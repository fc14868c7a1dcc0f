//! Document processing API client

use std::sync::Arc;

use openapi_client::models::UploadReceipt;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::info;

use crate::errors::McpError;
use crate::http::{FilePart, MultipartUpload, Transport};
use crate::services::call;

#[derive(Clone)]
pub struct DocumentsService {
    transport: Arc<dyn Transport>,
}

impl DocumentsService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Upload a document as the `file` form field, with optional JSON metadata
    pub async fn upload(
        &self,
        file_name: &str,
        mime_type: Option<&str>,
        bytes: Vec<u8>,
        metadata: Option<&Value>,
    ) -> Result<UploadReceipt, McpError> {
        info!(file_name, size = bytes.len(), "Uploading document");

        let mut fields = Vec::new();
        if let Some(metadata) = metadata {
            fields.push(("metadata".to_string(), metadata.to_string()));
        }

        let form = MultipartUpload {
            file: FilePart {
                field: "file".to_string(),
                file_name: file_name.to_string(),
                mime_type: mime_type.map(str::to_string),
                bytes,
            },
            fields,
        };

        let payload = self.transport.upload("/mcp/docs/upload", form).await?;
        Ok(serde_json::from_value(payload)?)
    }

    pub async fn get(&self, id: &str) -> Result<Value, McpError> {
        let path = format!("/mcp/docs/{}", id);
        self.transport.send(Method::GET, &path, &[], None).await
    }

    /// Run processing operations (e.g. `ocr`, `classify`) on an uploaded document
    pub async fn process(&self, id: &str, operations: &[&str]) -> Result<Value, McpError> {
        let path = format!("/mcp/docs/{}/process", id);
        call(
            &*self.transport,
            Method::POST,
            &path,
            &[],
            Some(json!({ "operations": operations })),
        )
        .await
    }

    pub async fn download(&self, id: &str) -> Result<Vec<u8>, McpError> {
        let path = format!("/mcp/docs/{}/download", id);
        self.transport.download(&path, &[]).await
    }
}
