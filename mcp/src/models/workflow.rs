//! Workflow models

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::errors::McpError;

/// A workflow definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    /// Unique workflow ID
    pub id: String,

    /// Workflow name
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub version: String,

    pub status: WorkflowStatus,

    #[serde(default)]
    pub triggers: Vec<Trigger>,

    /// Ordered step list; dependencies form a DAG
    #[serde(default)]
    pub steps: Vec<Step>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub activated_at: Option<String>,

    #[serde(default)]
    pub created_by: Option<String>,
}

/// Workflow status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    Active,
    Inactive,
    Draft,
    Archived,
}

/// What starts a workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(rename = "type")]
    pub trigger_type: String,

    #[serde(default)]
    pub config: serde_json::Value,
}

/// A step in the workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Step ID, unique within the workflow
    pub id: String,

    pub name: String,

    /// Step type (e.g., "http", "transform", "notify")
    #[serde(rename = "type")]
    pub step_type: String,

    #[serde(default)]
    pub config: serde_json::Value,

    /// IDs of steps that must finish first
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Body for creating a workflow
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowDraft {
    pub name: String,
    pub description: String,
    pub version: String,
    pub status: WorkflowStatus,
    pub triggers: Vec<Trigger>,
    pub steps: Vec<Step>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

/// Partial workflow update
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkflowUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkflowStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<Trigger>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Step>>,
}

/// Workflow list filters
#[derive(Debug, Clone, Default, Serialize)]
pub struct WorkflowFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkflowStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Check that step IDs are unique, every dependency names another step of
/// the same workflow, and the dependency graph has no cycle.
///
/// Returns the step IDs in a valid execution order.
pub fn validate_steps(steps: &[Step]) -> Result<Vec<String>, McpError> {
    let mut ids = HashSet::new();
    for step in steps {
        if !ids.insert(step.id.as_str()) {
            return Err(McpError::InvalidWorkflow(format!(
                "duplicate step id '{}'",
                step.id
            )));
        }
    }

    let mut in_degree: HashMap<&str, usize> = HashMap::new();
    let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();
    for step in steps {
        in_degree.entry(step.id.as_str()).or_insert(0);
        for dep in &step.dependencies {
            if dep == &step.id {
                return Err(McpError::InvalidWorkflow(format!(
                    "step '{}' depends on itself",
                    step.id
                )));
            }
            if !ids.contains(dep.as_str()) {
                return Err(McpError::InvalidWorkflow(format!(
                    "step '{}' depends on unknown step '{}'",
                    step.id, dep
                )));
            }
            *in_degree.entry(step.id.as_str()).or_insert(0) += 1;
            dependents.entry(dep.as_str()).or_default().push(step.id.as_str());
        }
    }

    // Kahn's algorithm, seeded in declaration order for a stable result
    let mut ready: VecDeque<&str> = steps
        .iter()
        .map(|s| s.id.as_str())
        .filter(|id| in_degree.get(id).copied() == Some(0))
        .collect();
    let mut order = Vec::with_capacity(steps.len());

    while let Some(id) = ready.pop_front() {
        order.push(id.to_string());
        for next in dependents.get(id).into_iter().flatten() {
            if let Some(degree) = in_degree.get_mut(next) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push_back(*next);
                }
            }
        }
    }

    if order.len() != steps.len() {
        let stuck: Vec<&str> = steps
            .iter()
            .map(|s| s.id.as_str())
            .filter(|id| !order.iter().any(|o| o == id))
            .collect();
        return Err(McpError::InvalidWorkflow(format!(
            "dependency cycle among steps [{}]",
            stuck.join(", ")
        )));
    }

    Ok(order)
}
