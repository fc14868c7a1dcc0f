//! Metrics snapshot models

use serde::{Deserialize, Serialize};

/// Overview of the control plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub agents: AgentCounts,
    pub jobs: JobCounts,
    pub system: SystemInfo,
    pub resources: ResourceUsage,
}

/// Agent counts by health
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCounts {
    pub online: u64,
    pub total: u64,
    pub healthy: u64,
    pub degraded: u64,
    pub offline: u64,
}

/// Job counts by state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobCounts {
    pub queued: u64,
    pub running: u64,
    pub completed: u64,
    pub failed: u64,
    /// Fraction in [0, 1]
    pub success_rate: f64,
}

/// System information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Uptime percentage
    pub uptime: f64,
    pub version: String,
    pub last_deployment: String,
    /// Fraction in [0, 1]
    pub error_rate: f64,
    /// Milliseconds
    pub response_time: f64,
}

/// Resource usage percentages and throughput
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUsage {
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub disk_usage: f64,
    /// Gbit/s
    pub network_throughput: f64,
}

/// Time series of resource metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trends {
    #[serde(default)]
    pub timeframe: String,
    pub data: Vec<TrendPoint>,
}

/// One sample of a trend series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub timestamp: String,
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub response_time: f64,
    pub error_rate: f64,
}
