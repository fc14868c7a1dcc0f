//! Server-push framing
//!
//! The log channel speaks server-sent events, but some deployments emit bare
//! newline-delimited JSON. Both are accepted: `data:` lines are joined until
//! a blank line dispatches the event, and any other non-field line is a
//! complete payload on its own.

use crate::errors::McpError;

const FIELD_PREFIXES: [&str; 3] = ["event:", "id:", "retry:"];

/// Longest unterminated line the decoder will hold
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Incremental decoder from raw bytes to event payloads
#[derive(Debug)]
pub struct EventDecoder {
    buffer: Vec<u8>,
    data: Vec<String>,
    max_line: usize,
    overflow: Option<usize>,
}

impl Default for EventDecoder {
    fn default() -> Self {
        Self::with_max_line(MAX_LINE_BYTES)
    }
}

impl EventDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_line(max_line: usize) -> Self {
        Self {
            buffer: Vec::new(),
            data: Vec::new(),
            max_line,
            overflow: None,
        }
    }

    /// Feed a chunk and return every payload completed by it.
    ///
    /// A line that grows past the cap without a newline is discarded and
    /// reported through [`EventDecoder::take_overflow`].
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);
        let mut events = Vec::new();

        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let raw: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&raw);
            let line = line.trim_end_matches(['\n', '\r']);
            self.line(line, &mut events);
        }

        if self.buffer.len() > self.max_line {
            self.overflow = Some(self.buffer.len());
            self.buffer.clear();
        }

        events
    }

    /// Error for a line dropped by the last [`EventDecoder::push`], if any
    pub fn take_overflow(&mut self) -> Option<McpError> {
        self.overflow.take().map(|len| {
            McpError::Stream(format!(
                "event line exceeds {} bytes ({} buffered)",
                self.max_line, len
            ))
        })
    }

    /// Flush whatever is left once the channel ends
    pub fn finish(mut self) -> Vec<String> {
        let mut events = Vec::new();
        if !self.buffer.is_empty() {
            let raw = std::mem::take(&mut self.buffer);
            let line = String::from_utf8_lossy(&raw).trim_end_matches('\r').to_string();
            self.line(&line, &mut events);
        }
        self.dispatch(&mut events);
        events
    }

    fn line(&mut self, line: &str, events: &mut Vec<String>) {
        if line.is_empty() {
            self.dispatch(events);
        } else if line.starts_with(':') {
            // comment / keep-alive
        } else if let Some(data) = line.strip_prefix("data:") {
            self.data.push(data.strip_prefix(' ').unwrap_or(data).to_string());
        } else if FIELD_PREFIXES.iter().any(|p| line.starts_with(p)) {
            // event metadata carries nothing the log channel uses
        } else {
            self.dispatch(events);
            events.push(line.to_string());
        }
    }

    fn dispatch(&mut self, events: &mut Vec<String>) {
        if !self.data.is_empty() {
            events.push(self.data.join("\n"));
            self.data.clear();
        }
    }
}
