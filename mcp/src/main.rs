//! Lynx MCP - Command line entry point
//!
//! Small operator tool over the MCP client library: metrics overview,
//! health check, task polling and live log tailing.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use colored::Colorize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use lynx_mcp::config::Settings;
use lynx_mcp::http::{HttpClient, Transport};
use lynx_mcp::logging::{init_logging, LogOptions};
use lynx_mcp::models::log::{LogSeverity, LogStreamFilter};
use lynx_mcp::poller::{PollOptions, TaskPoller};
use lynx_mcp::retry::{retry, RetryOptions};
use lynx_mcp::stream::ReconnectPolicy;
use lynx_mcp::utils::version_info;
use lynx_mcp::{Fetched, McpClient};

const DEFAULT_SETTINGS_FILE: &str = "lynx-mcp.json";

const USAGE: &str = "\
Usage: lynx-mcp [--settings=PATH] [--log-dir=DIR] [--json-logs] <command>

Commands:
  --version              Print version information
  --overview             Print the metrics overview
  --health               Print the system health report
  --poll-task=ID         Wait for a task to finish
  --tail-logs            Stream live logs [--level=LEVEL] [--service=NAME]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let mut cli_args: HashMap<String, String> = HashMap::new();
    for arg in env::args().skip(1) {
        if let Some((key, value)) = arg.split_once('=') {
            cli_args.insert(key.trim_start_matches('-').to_string(), value.to_string());
        } else if arg.starts_with("--") {
            cli_args.insert(arg.trim_start_matches('-').to_string(), "true".to_string());
        }
    }

    if cli_args.contains_key("version") {
        println!("{}", serde_json::to_string_pretty(&version_info())?);
        return Ok(());
    }

    let settings_path = cli_args
        .get("settings")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE));
    let settings = Settings::load(&settings_path)
        .await
        .with_context(|| format!("reading settings from {}", settings_path.display()))?;

    let log_options = LogOptions {
        log_level: settings.log_level,
        log_dir: cli_args.get("log-dir").map(PathBuf::from),
        json_format: cli_args.contains_key("json-logs"),
        ..Default::default()
    };
    if let Err(e) = init_logging(log_options) {
        eprintln!("Failed to initialize logging: {e}");
    }
    debug!("Settings: {:?}", settings);

    let transport: Arc<dyn Transport> = Arc::new(HttpClient::new(&settings.backend)?);
    let client = McpClient::with_reconnect(
        transport,
        ReconnectPolicy::from(&settings.stream.reconnect),
    );

    if cli_args.contains_key("overview") {
        return print_overview(&client).await;
    }

    if cli_args.contains_key("health") {
        let options = RetryOptions::from(&settings.retry);
        let report = retry(&options, || client.system.health()).await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(task_id) = cli_args.get("poll-task") {
        return poll_task(&client, task_id, PollOptions::from(&settings.poll)).await;
    }

    if cli_args.contains_key("tail-logs") {
        let level = cli_args
            .get("level")
            .map(|level| serde_json::from_value::<LogSeverity>(level.to_lowercase().into()))
            .transpose()
            .map_err(|_| anyhow!("invalid --level, expected debug|info|warn|error|fatal"))?;
        let filter = LogStreamFilter {
            level,
            service: cli_args.get("service").cloned(),
            follow: settings.stream.follow,
        };
        return tail_logs(&client, &filter).await;
    }

    println!("{}", USAGE);
    Ok(())
}

async fn print_overview(client: &McpClient) -> anyhow::Result<()> {
    let overview = client.metrics.overview().await;
    if let Fetched::Degraded { reason, .. } = &overview {
        eprintln!(
            "{} metrics backend unavailable, showing synthesized data ({})",
            "warning:".yellow().bold(),
            reason
        );
    }
    let (snapshot, _) = overview.into_parts();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

async fn poll_task(client: &McpClient, task_id: &str, options: PollOptions) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl+C received, cancelling poll...");
            on_signal.cancel();
        }
    });

    let poller = TaskPoller::new(client.tasks.clone());
    let task = poller.poll(task_id, &options, &cancel).await?;
    println!("{}", serde_json::to_string_pretty(&task)?);
    Ok(())
}

async fn tail_logs(client: &McpClient, filter: &LogStreamFilter) -> anyhow::Result<()> {
    let mut subscription = client.logs.stream(
        filter,
        |record| {
            println!(
                "{} {:>5} [{}] {}",
                record.timestamp,
                format!("{:?}", record.level).to_uppercase(),
                record.service,
                record.message
            );
        },
        |e| eprintln!("{} {}", "stream error:".red(), e),
    )?;

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl+C received, closing log stream...");
        }
        _ = subscription.wait() => {}
    }

    subscription.close().await;
    Ok(())
}
