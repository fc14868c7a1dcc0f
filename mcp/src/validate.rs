//! Response shape validation

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::McpError;

/// Check that `payload` is an object carrying every field in `required`
/// with a non-null value.
///
/// Catches bodies that parse as JSON but are not the expected entity, such
/// as an error object returned with a 2xx status. Fails on the first missing
/// field, in `required` order.
pub fn validate_response(payload: Value, required: &[&str]) -> Result<Value, McpError> {
    for field in required {
        let present = payload
            .get(*field)
            .map(|value| !value.is_null())
            .unwrap_or(false);

        if !present {
            return Err(McpError::MalformedResponse {
                field: (*field).to_string(),
            });
        }
    }

    Ok(payload)
}

/// Validate and then decode into a typed entity
pub fn validate_into<T: DeserializeOwned>(payload: Value, required: &[&str]) -> Result<T, McpError> {
    let payload = validate_response(payload, required)?;
    Ok(serde_json::from_value(payload)?)
}
