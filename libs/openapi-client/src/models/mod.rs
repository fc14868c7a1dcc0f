//! API models

use serde::{Deserialize, Serialize};

/// Generic acknowledgement returned by action endpoints
/// (restart, activate, cancel, drain, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionAck {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

impl ActionAck {
    /// Ack for an action the backend answered without a body (204, bare 202)
    pub fn accepted() -> Self {
        Self {
            success: true,
            message: String::new(),
        }
    }
}

/// Envelope used by the metrics family: `{ success, data, message }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// User creation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserCreateRequest {
    pub email: String,
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
}

/// Partial user update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    /// One of `active`, `inactive`, `pending`, `suspended`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// Result of a bulk user import
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkImportResponse {
    pub created: u64,
    pub updated: u64,
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
}

/// Result of a settings validation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsValidation {
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Task creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreateRequest {
    #[serde(rename = "type")]
    pub task_type: String,
    pub payload: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<String>,
}

/// Workflow dry-run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DryRunReport {
    pub success: bool,
    #[serde(default)]
    pub steps: Vec<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Assistant invocation request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
}

/// Tool call proposed by the assistant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// Assistant invocation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub conversation_id: String,
    pub message: String,
    #[serde(default)]
    pub tool_calls: Option<Vec<ToolCall>>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Receipt for a multipart upload (documents and avatars)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub id: String,
    /// `pending`, `processing`, `completed` or `failed`
    pub status: String,
    #[serde(default)]
    pub upload_url: Option<String>,
}

/// Avatar upload response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarUploadResponse {
    pub upload_url: String,
    pub avatar_id: String,
    pub status: String,
}

/// Avatar processing status
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarStatus {
    pub status: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Profile update request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

/// Password change request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChangeRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Login history entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginHistoryEntry {
    pub id: String,
    pub timestamp: String,
    pub ip_address: String,
    pub user_agent: String,
    #[serde(default)]
    pub location: Option<String>,
    pub success: bool,
}

/// Individual health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// System health report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// `healthy`, `degraded` or `unhealthy`
    pub status: String,
    #[serde(default)]
    pub checks: std::collections::BTreeMap<String, HealthCheck>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}
