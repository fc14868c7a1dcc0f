//! Log record models

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A structured log record emitted by a backend service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(default)]
    pub id: Option<String>,

    pub timestamp: String,

    pub level: LogSeverity,

    pub service: String,

    #[serde(default)]
    pub user_id: Option<String>,

    pub message: String,

    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,

    #[serde(default)]
    pub trace_id: Option<String>,

    #[serde(default)]
    pub span_id: Option<String>,
}

/// Severity of a backend log record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogSeverity {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// Historical log query
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LogSeverity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

/// Log export query
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogExportQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LogSeverity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ExportFormat>,
}

/// Live stream filter
#[derive(Debug, Clone, Serialize)]
pub struct LogStreamFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LogSeverity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    pub follow: bool,
}

impl Default for LogStreamFilter {
    fn default() -> Self {
        Self {
            level: None,
            service: None,
            follow: true,
        }
    }
}
