//! Current-user profile API client

use std::sync::Arc;

use openapi_client::models::{
    ActionAck, AvatarStatus, AvatarUploadResponse, LoginHistoryEntry, PasswordChangeRequest,
    ProfileUpdateRequest,
};
use reqwest::Method;

use crate::errors::McpError;
use crate::http::{FilePart, MultipartUpload, Transport};
use crate::models::profile::{PreferencesUpdate, Profile};
use crate::services::{call, call_ack, to_body};

#[derive(Clone)]
pub struct ProfileService {
    transport: Arc<dyn Transport>,
}

impl ProfileService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn get(&self) -> Result<Profile, McpError> {
        call(&*self.transport, Method::GET, "/mcp/profile", &[], None).await
    }

    pub async fn update(&self, patch: &ProfileUpdateRequest) -> Result<Profile, McpError> {
        call(&*self.transport, Method::PATCH, "/mcp/profile", &[], Some(to_body(patch)?)).await
    }

    pub async fn change_password(&self, request: &PasswordChangeRequest) -> Result<ActionAck, McpError> {
        call_ack(
            &*self.transport,
            Method::POST,
            "/mcp/profile/change-password",
            Some(to_body(request)?),
        )
        .await
    }

    pub async fn update_preferences(&self, preferences: &PreferencesUpdate) -> Result<Profile, McpError> {
        call(
            &*self.transport,
            Method::PATCH,
            "/mcp/profile/preferences",
            &[],
            Some(to_body(preferences)?),
        )
        .await
    }

    /// Upload a new avatar image; processing completes asynchronously
    pub async fn upload_avatar(
        &self,
        file_name: &str,
        mime_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<AvatarUploadResponse, McpError> {
        let form = MultipartUpload {
            file: FilePart {
                field: "avatar".to_string(),
                file_name: file_name.to_string(),
                mime_type: mime_type.map(str::to_string),
                bytes,
            },
            fields: Vec::new(),
        };
        let payload = self.transport.upload("/mcp/profile/avatar", form).await?;
        Ok(serde_json::from_value(payload)?)
    }

    pub async fn avatar_status(&self, avatar_id: &str) -> Result<AvatarStatus, McpError> {
        let path = format!("/mcp/profile/avatar/{}/status", avatar_id);
        call(&*self.transport, Method::GET, &path, &[], None).await
    }

    /// Soft-delete the current account
    pub async fn delete_account(&self) -> Result<ActionAck, McpError> {
        call_ack(&*self.transport, Method::DELETE, "/mcp/profile", None).await
    }

    pub async fn login_history(&self) -> Result<Vec<LoginHistoryEntry>, McpError> {
        call(&*self.transport, Method::GET, "/mcp/profile/login-history", &[], None).await
    }
}
