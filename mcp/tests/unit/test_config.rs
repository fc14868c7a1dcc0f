//! Settings file tests

use std::time::Duration;

use lynx_mcp::config::Settings;
use lynx_mcp::logging::LogLevel;
use lynx_mcp::poller::PollOptions;
use lynx_mcp::retry::RetryOptions;
use lynx_mcp::stream::ReconnectPolicy;

#[tokio::test]
async fn test_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load(dir.path().join("absent.json")).await.unwrap();

    let poll = PollOptions::from(&settings.poll);
    assert_eq!(poll.max_attempts, 60);
    assert_eq!(poll.interval, Duration::from_millis(1000));
    assert_eq!(
        ReconnectPolicy::from(&settings.stream.reconnect).max_attempts,
        0
    );
}

#[tokio::test]
async fn test_load_partial_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lynx-mcp.json");
    tokio::fs::write(
        &path,
        r#"{
            "log_level": "debug",
            "poll": { "max_attempts": 5 },
            "retry": { "max_retries": 1, "base_delay_ms": 50 },
            "stream": { "reconnect": { "max_attempts": 3, "delay_ms": 250 } }
        }"#,
    )
    .await
    .unwrap();

    let settings = Settings::load(&path).await.unwrap();

    assert_eq!(settings.log_level, LogLevel::Debug);
    assert_eq!(settings.poll.max_attempts, 5);
    assert_eq!(settings.poll.interval_ms, 1000);

    let retry = RetryOptions::from(&settings.retry);
    assert_eq!(retry.max_retries, 1);
    assert_eq!(retry.base_delay, Duration::from_millis(50));

    let policy = ReconnectPolicy::from(&settings.stream.reconnect);
    assert_eq!(policy, ReconnectPolicy::fixed(3, Duration::from_millis(250)));
}

#[tokio::test]
async fn test_invalid_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    tokio::fs::write(&path, "{ not json").await.unwrap();

    assert!(Settings::load(&path).await.is_err());
}
