//! Platform settings API client

use std::sync::Arc;

use openapi_client::models::SettingsValidation;
use reqwest::Method;

use crate::errors::McpError;
use crate::http::Transport;
use crate::models::settings::PlatformSettings;
use crate::services::{call, call_validated, to_body};

const SETTINGS_FIELDS: &[&str] = &["organization", "security", "integrations"];

#[derive(Clone)]
pub struct SettingsService {
    transport: Arc<dyn Transport>,
}

impl SettingsService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn get(&self) -> Result<PlatformSettings, McpError> {
        call_validated(&*self.transport, Method::GET, "/mcp/settings", None, SETTINGS_FIELDS).await
    }

    /// Persist the full settings document
    pub async fn save(&self, settings: &PlatformSettings) -> Result<PlatformSettings, McpError> {
        call(
            &*self.transport,
            Method::PATCH,
            "/mcp/settings",
            &[],
            Some(to_body(settings)?),
        )
        .await
    }

    /// Ask the backend to check a settings document without saving it
    pub async fn validate(&self, settings: &PlatformSettings) -> Result<SettingsValidation, McpError> {
        call(
            &*self.transport,
            Method::POST,
            "/mcp/settings/validate",
            &[],
            Some(to_body(settings)?),
        )
        .await
    }
}
