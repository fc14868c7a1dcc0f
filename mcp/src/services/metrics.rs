//! Metrics API client

use std::sync::Arc;

use chrono::Utc;
use reqwest::Method;
use tracing::warn;

use crate::envelope::Convention;
use crate::errors::McpError;
use crate::fallback::{synthesize_overview, synthesize_trends};
use crate::fetched::Fetched;
use crate::http::Transport;
use crate::models::metrics::{MetricsSnapshot, Trends};

/// Default trends window
pub const DEFAULT_TIMEFRAME: &str = "24h";

const CONVENTION: Convention = Convention::Enveloped;

/// Dashboard metrics.
///
/// The only family that absorbs failures: any transport, envelope or decoding
/// error yields synthesized data marked [`Fetched::Degraded`].
#[derive(Clone)]
pub struct MetricsService {
    transport: Arc<dyn Transport>,
}

impl MetricsService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn fetch_overview(&self) -> Result<MetricsSnapshot, McpError> {
        let body = self
            .transport
            .send(Method::GET, "/mcp/metrics/overview", &[], None)
            .await?;
        Ok(serde_json::from_value(CONVENTION.decode(body)?)?)
    }

    async fn fetch_trends(&self, timeframe: &str) -> Result<Trends, McpError> {
        let query = vec![("timeframe".to_string(), timeframe.to_string())];
        let body = self
            .transport
            .send(Method::GET, "/mcp/metrics/trends", &query, None)
            .await?;
        let mut trends: Trends = serde_json::from_value(CONVENTION.decode(body)?)?;
        if trends.timeframe.is_empty() {
            trends.timeframe = timeframe.to_string();
        }
        Ok(trends)
    }

    /// Current platform overview
    pub async fn overview(&self) -> Fetched<MetricsSnapshot> {
        match self.fetch_overview().await {
            Ok(snapshot) => Fetched::live_data(snapshot),
            Err(e) => {
                warn!("Metrics overview unavailable, using synthesized data: {}", e);
                Fetched::degraded(synthesize_overview(&mut rand::thread_rng(), Utc::now()), e.to_string())
            }
        }
    }

    /// Resource trends over `timeframe` (e.g. `1h`, `24h`, `7d`)
    pub async fn trends(&self, timeframe: &str) -> Fetched<Trends> {
        match self.fetch_trends(timeframe).await {
            Ok(trends) => Fetched::live_data(trends),
            Err(e) => {
                warn!(timeframe, "Metrics trends unavailable, using synthesized data: {}", e);
                Fetched::degraded(
                    synthesize_trends(&mut rand::thread_rng(), timeframe, Utc::now()),
                    e.to_string(),
                )
            }
        }
    }
}
