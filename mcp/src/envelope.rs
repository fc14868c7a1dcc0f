//! Response envelope decoding
//!
//! Two conventions coexist on the MCP API. Each service picks one and
//! decodes through [`Convention::decode`], so the inconsistency stays at a
//! single site per resource family.

use openapi_client::models::Envelope;
use serde_json::Value;

use crate::errors::McpError;

/// How an endpoint wraps its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    /// `{ "success": bool, "data": ..., "message": "..." }`
    Enveloped,

    /// The payload is the body itself
    Bare,
}

impl Convention {
    /// Unwrap the payload from a decoded response body
    pub fn decode(&self, body: Value) -> Result<Value, McpError> {
        match self {
            Convention::Bare => Ok(body),
            Convention::Enveloped => {
                let envelope: Envelope<Value> = serde_json::from_value(body)
                    .map_err(|e| McpError::Envelope(format!("not an envelope: {}", e)))?;

                if !envelope.success {
                    return Err(McpError::Envelope(
                        envelope
                            .message
                            .unwrap_or_else(|| "request was not successful".to_string()),
                    ));
                }

                match envelope.data {
                    Some(data) if !data.is_null() => Ok(data),
                    _ => Err(McpError::Envelope("envelope carries no data".to_string())),
                }
            }
        }
    }
}
