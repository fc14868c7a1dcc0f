//! Task completion poller

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::errors::McpError;
use crate::models::task::{Task, TaskLifecycle};
use crate::services::TasksService;

/// Poller options
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Fetches before giving up
    pub max_attempts: u32,

    /// Wait between fetches
    pub interval: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            interval: Duration::from_millis(1000),
        }
    }
}

/// Waits for tasks to reach a terminal status
#[derive(Clone)]
pub struct TaskPoller {
    tasks: TasksService,
}

impl TaskPoller {
    pub fn new(tasks: TasksService) -> Self {
        Self { tasks }
    }

    /// Fetch `task_id` until its status is terminal.
    ///
    /// Fetches are strictly sequential. A terminal task is returned as soon
    /// as it is seen; otherwise the poller waits `interval` (only if attempts
    /// remain) and fails with [`McpError::PollTimeout`] after `max_attempts`
    /// fetches. Cancelling `cancel` during a wait ends the poll with
    /// [`McpError::PollCancelled`]. Fetch errors propagate unchanged.
    pub async fn poll(
        &self,
        task_id: &str,
        options: &PollOptions,
        cancel: &CancellationToken,
    ) -> Result<Task, McpError> {
        let mut lifecycle: Option<TaskLifecycle> = None;

        for attempt in 1..=options.max_attempts {
            if cancel.is_cancelled() {
                return Err(McpError::PollCancelled {
                    task_id: task_id.to_string(),
                });
            }

            let task = self.tasks.get(task_id).await?;
            debug!(task_id, attempt, status = %task.status, "Polled task");

            match lifecycle.as_mut() {
                None => lifecycle = Some(TaskLifecycle::starting_at(task.status)),
                Some(tracked) => {
                    // The backend is authoritative; a regression is only reported
                    if let Err(e) = tracked.observe(task.status) {
                        warn!(task_id, "Backend reported {}", e);
                        *tracked = TaskLifecycle::starting_at(task.status);
                    }
                }
            }

            if task.status.is_terminal() {
                info!(task_id, status = %task.status, attempts = attempt, "Task finished");
                return Ok(task);
            }

            if attempt < options.max_attempts {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        info!(task_id, "Task polling cancelled");
                        return Err(McpError::PollCancelled {
                            task_id: task_id.to_string(),
                        });
                    }
                    _ = tokio::time::sleep(options.interval) => {}
                }
            }
        }

        Err(McpError::PollTimeout {
            task_id: task_id.to_string(),
            attempts: options.max_attempts,
        })
    }

    /// [`TaskPoller::poll`] without a cancellation token
    pub async fn poll_task(
        &self,
        task_id: &str,
        max_attempts: u32,
        interval: Duration,
    ) -> Result<Task, McpError> {
        let options = PollOptions {
            max_attempts,
            interval,
        };
        self.poll(task_id, &options, &CancellationToken::new()).await
    }
}
