//! Wire bodies for the MCP control-plane REST API.

pub mod models;
