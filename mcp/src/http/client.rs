//! HTTP client implementation

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use openapi_client::models::ErrorResponse;
use reqwest::{header, Client, Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error, info};
use url::Url;

use crate::config::BackendSettings;
use crate::errors::McpError;
use crate::http::sse::EventDecoder;
use crate::http::transport::{EventStream, MultipartUpload, Transport};
use crate::utils::generate_uuid;

/// HTTP client for backend communication
pub struct HttpClient {
    client: Client,
    base_url: String,
    api_token: Option<SecretString>,
    timeout: Duration,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(settings: &BackendSettings) -> Result<Self, McpError> {
        let parsed = Url::parse(&settings.base_url).map_err(|e| {
            McpError::ConfigError(format!("invalid base URL '{}': {}", settings.base_url, e))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(McpError::ConfigError(format!(
                "unsupported base URL scheme '{}'",
                parsed.scheme()
            )));
        }

        // No client-wide timeout: it would also cut long-lived log streams
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_token: settings.api_token.clone().map(SecretString::from),
            timeout: Duration::from_secs(settings.timeout_secs),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str, query: &[(String, String)]) -> RequestBuilder {
        let url = self.url(path);
        let request_id = generate_uuid();
        debug!(%method, %url, %request_id, "MCP request");

        let mut request = self
            .client
            .request(method, &url)
            .header("X-Request-ID", request_id);

        if !query.is_empty() {
            request = request.query(query);
        }

        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        request
    }

    /// Empty (or whitespace-only) success bodies decode to `null`
    async fn decode_body(response: Response) -> Result<serde_json::Value, McpError> {
        let bytes = response.bytes().await?;
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(serde_json::Value::Null);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn check_status(response: Response, method: &Method, path: &str) -> Result<Response, McpError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| format!("{}: {}", e.error, e.message))
            .unwrap_or_else(|_| body.clone());
        error!("HTTP {} {} failed: {} - {}", method, path, status, detail);
        Err(McpError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, McpError> {
        let mut request = self
            .request(method.clone(), path, query)
            .timeout(self.timeout);

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let response = Self::check_status(response, &method, path).await?;

        Self::decode_body(response).await
    }

    async fn upload(
        &self,
        path: &str,
        form: MultipartUpload,
    ) -> Result<serde_json::Value, McpError> {
        let mut part = reqwest::multipart::Part::bytes(form.file.bytes).file_name(form.file.file_name);
        if let Some(mime) = &form.file.mime_type {
            part = part.mime_str(mime)?;
        }

        let mut multipart = reqwest::multipart::Form::new().part(form.file.field, part);
        for (name, value) in form.fields {
            multipart = multipart.text(name, value);
        }

        let response = self
            .request(Method::POST, path, &[])
            .timeout(self.timeout)
            .multipart(multipart)
            .send()
            .await?;
        let response = Self::check_status(response, &Method::POST, path).await?;

        Self::decode_body(response).await
    }

    async fn download(&self, path: &str, query: &[(String, String)]) -> Result<Vec<u8>, McpError> {
        let response = self
            .request(Method::GET, path, query)
            .timeout(self.timeout)
            .send()
            .await?;
        let response = Self::check_status(response, &Method::GET, path).await?;

        Ok(response.bytes().await?.to_vec())
    }

    async fn open_stream(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<EventStream, McpError> {
        let response = self
            .request(Method::GET, path, query)
            .header(header::ACCEPT, "text/event-stream")
            .send()
            .await?;
        let response = Self::check_status(response, &Method::GET, path).await?;
        info!("Opened push channel {}", path);

        let mut body = response.bytes_stream();
        let stream = async_stream::stream! {
            let mut decoder = EventDecoder::new();
            while let Some(chunk) = body.next().await {
                match chunk {
                    Ok(chunk) => {
                        for payload in decoder.push(&chunk) {
                            yield Ok(payload);
                        }
                        if let Some(e) = decoder.take_overflow() {
                            yield Err(e);
                            return;
                        }
                    }
                    Err(e) => {
                        yield Err(McpError::Stream(e.to_string()));
                        return;
                    }
                }
            }
            for payload in decoder.finish() {
                yield Ok(payload);
            }
        };

        Ok(Box::pin(stream))
    }
}
