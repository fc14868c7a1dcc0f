//! User administration API client

use std::sync::Arc;

use openapi_client::models::{ActionAck, BulkImportResponse, UserCreateRequest, UserUpdateRequest};
use reqwest::Method;
use serde_json::json;

use crate::errors::McpError;
use crate::http::{to_query, Transport};
use crate::models::user::{User, UserFilter};
use crate::services::{call, call_ack, call_validated, to_body};

const USER_FIELDS: &[&str] = &["id", "email", "name"];
const CREATED_USER_FIELDS: &[&str] = &["id", "email"];

#[derive(Clone)]
pub struct UsersService {
    transport: Arc<dyn Transport>,
}

impl UsersService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn list(&self, filter: &UserFilter) -> Result<Vec<User>, McpError> {
        call(&*self.transport, Method::GET, "/mcp/users", &to_query(filter)?, None).await
    }

    pub async fn get(&self, id: &str) -> Result<User, McpError> {
        let path = format!("/mcp/users/{}", id);
        call_validated(&*self.transport, Method::GET, &path, None, USER_FIELDS).await
    }

    pub async fn create(&self, user: &UserCreateRequest) -> Result<User, McpError> {
        call_validated(
            &*self.transport,
            Method::POST,
            "/mcp/users",
            Some(to_body(user)?),
            CREATED_USER_FIELDS,
        )
        .await
    }

    pub async fn update(&self, id: &str, patch: &UserUpdateRequest) -> Result<User, McpError> {
        let path = format!("/mcp/users/{}", id);
        call(&*self.transport, Method::PATCH, &path, &[], Some(to_body(patch)?)).await
    }

    pub async fn remove(&self, id: &str) -> Result<ActionAck, McpError> {
        let path = format!("/mcp/users/{}", id);
        call_ack(&*self.transport, Method::DELETE, &path, None).await
    }

    /// Create or update many users in one request
    pub async fn bulk_import(&self, users: &[UserCreateRequest]) -> Result<BulkImportResponse, McpError> {
        let body = json!({ "users": to_body(&users)? });
        call(&*self.transport, Method::POST, "/mcp/users/bulk", &[], Some(body)).await
    }

    /// Export matching users as a file (CSV as produced by the backend)
    pub async fn export(&self, filter: &UserFilter) -> Result<Vec<u8>, McpError> {
        self.transport
            .download("/mcp/users/export", &to_query(filter)?)
            .await
    }
}
