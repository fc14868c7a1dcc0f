//! Scripted in-memory transport

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::Method;
use serde_json::{json, Value};

use lynx_mcp::errors::McpError;
use lynx_mcp::http::{EventStream, MultipartUpload, Transport};

/// Canned answer for one request
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Status(u16),
    Bytes(Vec<u8>),
}

/// Canned push channel
pub enum StreamScript {
    /// Deliver the events, then either stay open or end
    Events {
        events: Vec<Result<String, McpError>>,
        keep_open: bool,
    },

    /// Fail to open
    Refuse(String),
}

/// A recorded request
#[derive(Debug, Clone)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// Replies are queued per path; the last reply for a path repeats.
#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    streams: Mutex<VecDeque<StreamScript>>,
    calls: Mutex<Vec<Call>>,
    uploads: Mutex<Vec<(String, MultipartUpload)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, path: &str, reply: Reply) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn reply_json(&self, path: &str, body: Value) -> &Self {
        self.reply(path, Reply::Json(body))
    }

    pub fn script_stream(&self, script: StreamScript) -> &Self {
        self.streams.lock().unwrap().push_back(script);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls().iter().filter(|c| c.path == path).count()
    }

    pub fn last_call(&self) -> Call {
        self.calls().last().cloned().expect("no calls recorded")
    }

    pub fn uploads(&self) -> Vec<(String, MultipartUpload)> {
        self.uploads.lock().unwrap().clone()
    }

    fn record(&self, method: Method, path: &str, query: &[(String, String)], body: Option<Value>) {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            query: query.to_vec(),
            body,
        });
    }

    fn next_reply(&self, path: &str) -> Reply {
        let mut replies = self.replies.lock().unwrap();
        match replies.get_mut(path) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Reply::Status(404),
        }
    }
}

fn status_error(status: u16) -> McpError {
    McpError::Status {
        status,
        body: format!("scripted status {}", status),
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<Value>,
    ) -> Result<Value, McpError> {
        self.record(method, path, query, body);
        match self.next_reply(path) {
            Reply::Json(value) => Ok(value),
            Reply::Status(status) => Err(status_error(status)),
            Reply::Bytes(_) => Err(McpError::Stream("bytes scripted for a JSON call".to_string())),
        }
    }

    async fn upload(&self, path: &str, form: MultipartUpload) -> Result<Value, McpError> {
        self.record(Method::POST, path, &[], None);
        self.uploads.lock().unwrap().push((path.to_string(), form));
        match self.next_reply(path) {
            Reply::Json(value) => Ok(value),
            Reply::Status(status) => Err(status_error(status)),
            Reply::Bytes(_) => Err(McpError::Stream("bytes scripted for an upload".to_string())),
        }
    }

    async fn download(&self, path: &str, query: &[(String, String)]) -> Result<Vec<u8>, McpError> {
        self.record(Method::GET, path, query, None);
        match self.next_reply(path) {
            Reply::Bytes(bytes) => Ok(bytes),
            Reply::Json(value) => Ok(value.to_string().into_bytes()),
            Reply::Status(status) => Err(status_error(status)),
        }
    }

    async fn open_stream(&self, path: &str, query: &[(String, String)]) -> Result<EventStream, McpError> {
        self.record(Method::GET, path, query, None);
        let script = self.streams.lock().unwrap().pop_front();
        match script {
            Some(StreamScript::Events { events, keep_open }) => {
                let events = stream::iter(events);
                if keep_open {
                    Ok(events.chain(stream::pending()).boxed())
                } else {
                    Ok(events.boxed())
                }
            }
            Some(StreamScript::Refuse(reason)) => Err(McpError::Stream(reason)),
            None => Err(McpError::Stream("no stream scripted".to_string())),
        }
    }
}

pub fn task_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "type": "rate_quote",
        "status": status,
        "payload": {"lane": "CHI-ATL"},
        "priority": 1
    })
}

pub fn log_json(service: &str, message: &str) -> String {
    json!({
        "timestamp": "2026-10-19T12:00:00Z",
        "level": "info",
        "service": service,
        "message": message,
        "metadata": {}
    })
    .to_string()
}

pub fn metrics_json() -> Value {
    json!({
        "agents": {"online": 40, "total": 42, "healthy": 39, "degraded": 1, "offline": 2},
        "jobs": {"queued": 3, "running": 7, "completed": 900, "failed": 4, "success_rate": 0.99},
        "system": {
            "uptime": 99.99,
            "version": "3.0.0",
            "last_deployment": "2026-10-18T09:00:00Z",
            "error_rate": 0.001,
            "response_time": 120.0
        },
        "resources": {"cpu_usage": 22.0, "memory_usage": 51.0, "disk_usage": 30.0, "network_throughput": 1.1}
    })
}
