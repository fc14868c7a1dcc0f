//! Utility functions

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Version information for the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
    pub git_hash: String,
    pub build_time: String,
}

/// Get version information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: option_env!("GIT_HASH").unwrap_or("unknown").to_string(),
        build_time: option_env!("BUILD_TIME").unwrap_or("unknown").to_string(),
    }
}

/// Calculate exponential backoff delay, capped at `max_delay`
pub fn calc_exp_backoff(base_delay: Duration, max_delay: Duration, multiplier: f64, attempt: u32) -> Duration {
    let delay_secs = base_delay.as_secs_f64() * multiplier.powi(attempt as i32);
    let capped_delay = delay_secs.min(max_delay.as_secs_f64());
    Duration::from_secs_f64(capped_delay)
}

/// Generate a random UUID v4
pub fn generate_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}
