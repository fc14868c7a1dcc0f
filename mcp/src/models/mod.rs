//! Entity models owned by the MCP backend
//!
//! Every value here is a point-in-time snapshot; the client never holds
//! authoritative state.

pub mod agent;
pub mod log;
pub mod metrics;
pub mod profile;
pub mod settings;
pub mod task;
pub mod user;
pub mod workflow;
