//! Lynx MCP Client Library
//!
//! Typed client for the MCP control-plane API: one service per resource
//! family over an injected transport, a cancellable task poller and a
//! managed live log stream.

pub mod config;
pub mod envelope;
pub mod errors;
pub mod fallback;
pub mod fetched;
pub mod http;
pub mod logging;
pub mod models;
pub mod poller;
pub mod retry;
pub mod services;
pub mod stream;
pub mod utils;
pub mod validate;

pub use errors::McpError;
pub use fetched::Fetched;
pub use services::McpClient;
