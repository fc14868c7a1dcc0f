//! Live log stream subscription

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::errors::McpError;
use crate::http::{to_query, Query, Transport};
use crate::models::log::{LogRecord, LogStreamFilter};

pub const STREAM_PATH: &str = "/mcp/logs/stream";

/// What to do when the channel fails.
///
/// `max_attempts` counts consecutive reconnects; a delivered record resets
/// the count. Zero means the stream closes on the first channel error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 0,
            delay: Duration::from_secs(1),
        }
    }
}

impl ReconnectPolicy {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts, delay }
    }
}

/// Opens log streams and pumps records to callbacks
#[derive(Clone)]
pub struct LogStreamManager {
    transport: Arc<dyn Transport>,
    policy: ReconnectPolicy,
}

impl LogStreamManager {
    pub fn new(transport: Arc<dyn Transport>, policy: ReconnectPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &ReconnectPolicy {
        &self.policy
    }

    /// Subscribe to log records matching `filter`.
    ///
    /// `on_message` receives each parsed record. `on_error` receives
    /// malformed records (the stream keeps going) and channel failures (the
    /// stream closes or reconnects per the policy). The returned handle owns
    /// the connection: closing or dropping it releases it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn stream_logs<M, E>(
        &self,
        filter: &LogStreamFilter,
        on_message: M,
        on_error: E,
    ) -> Result<LogSubscription, McpError>
    where
        M: FnMut(LogRecord) + Send + 'static,
        E: FnMut(McpError) + Send + 'static,
    {
        let query = to_query(filter)?;
        let cancel = CancellationToken::new();

        let pump = Pump {
            transport: self.transport.clone(),
            query,
            follow: filter.follow,
            policy: self.policy.clone(),
            cancel: cancel.clone(),
        };
        let handle = tokio::spawn(pump.run(on_message, on_error));

        Ok(LogSubscription {
            cancel,
            handle: Some(handle),
        })
    }
}

struct Pump {
    transport: Arc<dyn Transport>,
    query: Query,
    follow: bool,
    policy: ReconnectPolicy,
    cancel: CancellationToken,
}

/// Why a connection stopped delivering
enum Ended {
    Cancelled,
    Finished,
    Failed,
}

impl Pump {
    async fn run<M, E>(self, mut on_message: M, mut on_error: E)
    where
        M: FnMut(LogRecord),
        E: FnMut(McpError),
    {
        let mut reconnects = 0;

        loop {
            match self.connect(&mut on_message, &mut on_error, &mut reconnects).await {
                Ended::Cancelled => {
                    info!("Log stream closed by owner");
                    return;
                }
                Ended::Finished => {
                    info!("Log stream finished");
                    return;
                }
                Ended::Failed => {}
            }

            if reconnects >= self.policy.max_attempts {
                info!("Log stream closed after channel failure");
                return;
            }
            reconnects += 1;
            warn!(
                "Reconnecting log stream in {:?} ({}/{})",
                self.policy.delay, reconnects, self.policy.max_attempts
            );

            tokio::select! {
                _ = self.cancel.cancelled() => return,
                _ = tokio::time::sleep(self.policy.delay) => {}
            }
        }
    }

    async fn connect<M, E>(&self, on_message: &mut M, on_error: &mut E, reconnects: &mut u32) -> Ended
    where
        M: FnMut(LogRecord),
        E: FnMut(McpError),
    {
        let opened = tokio::select! {
            _ = self.cancel.cancelled() => return Ended::Cancelled,
            opened = self.transport.open_stream(STREAM_PATH, &self.query) => opened,
        };

        let mut events = match opened {
            Ok(events) => events,
            Err(e) => {
                on_error(e);
                return Ended::Failed;
            }
        };
        info!("Log stream open");

        loop {
            let next = tokio::select! {
                _ = self.cancel.cancelled() => return Ended::Cancelled,
                next = events.next() => next,
            };

            match next {
                Some(Ok(payload)) => match serde_json::from_str::<LogRecord>(&payload) {
                    Ok(record) => {
                        *reconnects = 0;
                        on_message(record);
                    }
                    Err(e) => {
                        debug!("Skipping malformed log record: {}", e);
                        on_error(McpError::MalformedRecord(e.to_string()));
                    }
                },
                Some(Err(e)) => {
                    on_error(e);
                    return Ended::Failed;
                }
                None if self.follow => {
                    on_error(McpError::Stream("log stream ended unexpectedly".to_string()));
                    return Ended::Failed;
                }
                None => return Ended::Finished,
            }
        }
    }
}

/// Owner handle of a running log stream
#[derive(Debug)]
pub struct LogSubscription {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl LogSubscription {
    /// Stop the stream and wait for the connection to be released
    pub async fn close(mut self) {
        self.cancel.cancel();
        self.join().await;
    }

    /// Wait until the stream ends on its own (or is closed elsewhere)
    pub async fn wait(&mut self) {
        self.join().await;
    }

    /// True once the stream has been closed or has ended
    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
            || self.handle.as_ref().map(|h| h.is_finished()).unwrap_or(true)
    }

    async fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Log stream task failed: {}", e);
            }
        }
    }
}

impl Drop for LogSubscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
