//! Task model and lifecycle state machine

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::McpError;

/// A unit of work dispatched by the control plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,

    #[serde(rename = "type")]
    pub task_type: String,

    pub status: TaskStatus,

    #[serde(default)]
    pub payload: serde_json::Value,

    #[serde(default)]
    pub result: Option<serde_json::Value>,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub started_at: Option<String>,

    #[serde(default)]
    pub completed_at: Option<String>,

    #[serde(default)]
    pub created_by: Option<String>,

    #[serde(default)]
    pub agent_id: Option<String>,

    #[serde(default)]
    pub priority: i32,
}

/// Task status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Queued,
    Running,
    Completed,
    Failed,
    Cancelled,
}

impl TaskStatus {
    /// Terminal statuses never transition again
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskStatus::Completed | TaskStatus::Failed | TaskStatus::Cancelled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Queued => "queued",
            TaskStatus::Running => "running",
            TaskStatus::Completed => "completed",
            TaskStatus::Failed => "failed",
            TaskStatus::Cancelled => "cancelled",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            TaskStatus::Queued => 0,
            TaskStatus::Running => 1,
            _ => 2,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend-side event that moves a task forward
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEvent {
    /// An agent picked the task up
    Dispatch,

    /// The task finished successfully
    Succeed,

    /// The task errored
    Fail(String),

    /// A cancel request was honoured
    Cancel,
}

/// Tracks the lifecycle of a single task as observed by the client
///
/// ```text
/// queued --dispatch--> running --succeed--> completed
/// running --fail--> failed
/// queued|running --cancel--> cancelled
/// ```
#[derive(Debug, Clone)]
pub struct TaskLifecycle {
    state: TaskStatus,
    error: Option<String>,
    transitions: u32,
}

impl TaskLifecycle {
    /// Start tracking a freshly queued task
    pub fn new() -> Self {
        Self::starting_at(TaskStatus::Queued)
    }

    /// Start tracking from an already observed status
    pub fn starting_at(state: TaskStatus) -> Self {
        Self {
            state,
            error: None,
            transitions: 0,
        }
    }

    pub fn state(&self) -> TaskStatus {
        self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Number of accepted state changes
    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Apply an event
    pub fn process(&mut self, event: TaskEvent) -> Result<(), McpError> {
        let next = match (&self.state, &event) {
            (TaskStatus::Queued, TaskEvent::Dispatch) => TaskStatus::Running,
            (TaskStatus::Running, TaskEvent::Succeed) => TaskStatus::Completed,
            (TaskStatus::Running, TaskEvent::Fail(err)) => {
                self.error = Some(err.clone());
                TaskStatus::Failed
            }
            (TaskStatus::Queued | TaskStatus::Running, TaskEvent::Cancel) => {
                TaskStatus::Cancelled
            }
            (state, event) => {
                return Err(McpError::InvalidTransition {
                    from: state.to_string(),
                    to: format!("{:?}", event).to_lowercase(),
                });
            }
        };

        self.state = next;
        self.transitions += 1;
        Ok(())
    }

    /// Record a status reported by the backend.
    ///
    /// Statuses may skip intermediate states (a poll can miss `running`),
    /// but never move backwards and never leave a terminal state.
    pub fn observe(&mut self, status: TaskStatus) -> Result<(), McpError> {
        if status == self.state {
            return Ok(());
        }
        if self.state.is_terminal() || status.rank() < self.state.rank() {
            return Err(McpError::InvalidTransition {
                from: self.state.to_string(),
                to: status.to_string(),
            });
        }

        self.state = status;
        self.transitions += 1;
        Ok(())
    }
}

impl Default for TaskLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
