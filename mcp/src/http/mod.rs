//! Transport layer to the MCP backend

pub mod client;
pub mod sse;
pub mod transport;

pub use client::HttpClient;
pub use transport::{to_query, EventStream, FilePart, MultipartUpload, Query, Transport};
