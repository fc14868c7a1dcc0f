//! Log stream subscription tests

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use lynx_mcp::errors::McpError;
use lynx_mcp::models::log::{LogRecord, LogSeverity, LogStreamFilter};
use lynx_mcp::stream::{LogStreamManager, LogSubscription, ReconnectPolicy, STREAM_PATH};

use crate::support::{log_json, FakeTransport, StreamScript};

struct Collected {
    records: mpsc::UnboundedReceiver<LogRecord>,
    errors: mpsc::UnboundedReceiver<McpError>,
    subscription: LogSubscription,
}

fn subscribe(fake: &Arc<FakeTransport>, policy: ReconnectPolicy, filter: &LogStreamFilter) -> Collected {
    let (record_tx, records) = mpsc::unbounded_channel();
    let (error_tx, errors) = mpsc::unbounded_channel();

    let subscription = LogStreamManager::new(fake.clone(), policy)
        .stream_logs(
            filter,
            move |record| {
                let _ = record_tx.send(record);
            },
            move |e| {
                let _ = error_tx.send(e);
            },
        )
        .unwrap();

    Collected {
        records,
        errors,
        subscription,
    }
}

async fn next<T>(rx: &mut mpsc::UnboundedReceiver<T>) -> T {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for callback")
        .expect("callback channel closed")
}

#[tokio::test]
async fn test_malformed_record_reports_error_and_stream_continues() {
    let fake = Arc::new(FakeTransport::new());
    fake.script_stream(StreamScript::Events {
        events: vec![
            Ok(log_json("dispatch", "first")),
            Ok("not json at all".to_string()),
            Ok(log_json("dispatch", "second")),
        ],
        keep_open: true,
    });

    let mut collected = subscribe(&fake, ReconnectPolicy::none(), &LogStreamFilter::default());

    assert_eq!(next(&mut collected.records).await.message, "first");
    assert_eq!(next(&mut collected.records).await.message, "second");

    assert!(matches!(
        next(&mut collected.errors).await,
        McpError::MalformedRecord(_)
    ));
    assert!(collected.errors.try_recv().is_err());
    assert!(!collected.subscription.is_closed());

    collected.subscription.close().await;
}

#[tokio::test]
async fn test_channel_error_closes_stream_without_reconnect() {
    let fake = Arc::new(FakeTransport::new());
    fake.script_stream(StreamScript::Events {
        events: vec![
            Ok(log_json("billing", "before reset")),
            Err(McpError::Stream("connection reset".to_string())),
        ],
        keep_open: true,
    });

    let mut collected = subscribe(&fake, ReconnectPolicy::none(), &LogStreamFilter::default());

    assert_eq!(next(&mut collected.records).await.message, "before reset");
    assert!(matches!(next(&mut collected.errors).await, McpError::Stream(_)));

    tokio::time::timeout(Duration::from_secs(2), collected.subscription.wait())
        .await
        .expect("stream did not close after channel error");
    assert!(collected.subscription.is_closed());
    assert_eq!(fake.calls_to(STREAM_PATH), 1);
}

#[tokio::test]
async fn test_reconnect_policy_reopens_channel() {
    let fake = Arc::new(FakeTransport::new());
    fake.script_stream(StreamScript::Refuse("upstream unavailable".to_string()))
        .script_stream(StreamScript::Events {
            events: vec![Ok(log_json("routing", "after reconnect"))],
            keep_open: true,
        });

    let policy = ReconnectPolicy::fixed(2, Duration::from_millis(10));
    let mut collected = subscribe(&fake, policy, &LogStreamFilter::default());

    assert!(matches!(next(&mut collected.errors).await, McpError::Stream(_)));
    assert_eq!(next(&mut collected.records).await.message, "after reconnect");
    assert_eq!(fake.calls_to(STREAM_PATH), 2);

    collected.subscription.close().await;
}

#[tokio::test]
async fn test_reconnect_gives_up_after_max_attempts() {
    let fake = Arc::new(FakeTransport::new());
    for _ in 0..3 {
        fake.script_stream(StreamScript::Refuse("down".to_string()));
    }

    let policy = ReconnectPolicy::fixed(2, Duration::from_millis(5));
    let mut collected = subscribe(&fake, policy, &LogStreamFilter::default());

    tokio::time::timeout(Duration::from_secs(2), collected.subscription.wait())
        .await
        .expect("stream kept reconnecting");

    assert_eq!(fake.calls_to(STREAM_PATH), 3);
    for _ in 0..3 {
        next(&mut collected.errors).await;
    }
}

#[tokio::test]
async fn test_finite_stream_ends_cleanly_when_not_following() {
    let fake = Arc::new(FakeTransport::new());
    fake.script_stream(StreamScript::Events {
        events: vec![Ok(log_json("audit", "only"))],
        keep_open: false,
    });

    let filter = LogStreamFilter {
        follow: false,
        ..Default::default()
    };
    let mut collected = subscribe(&fake, ReconnectPolicy::none(), &filter);

    assert_eq!(next(&mut collected.records).await.message, "only");
    tokio::time::timeout(Duration::from_secs(2), collected.subscription.wait())
        .await
        .expect("finite stream did not end");
    assert!(collected.errors.try_recv().is_err());
}

#[tokio::test]
async fn test_filter_is_sent_as_query() {
    let fake = Arc::new(FakeTransport::new());
    fake.script_stream(StreamScript::Events {
        events: Vec::new(),
        keep_open: true,
    });

    let filter = LogStreamFilter {
        level: Some(LogSeverity::Error),
        service: Some("dispatch".to_string()),
        follow: true,
    };
    let collected = subscribe(&fake, ReconnectPolicy::none(), &filter);

    tokio::time::timeout(Duration::from_secs(2), async {
        while fake.calls_to(STREAM_PATH) == 0 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("stream was never opened");

    let query = fake.last_call().query;
    assert!(query.contains(&("level".to_string(), "error".to_string())));
    assert!(query.contains(&("service".to_string(), "dispatch".to_string())));
    assert!(query.contains(&("follow".to_string(), "true".to_string())));

    collected.subscription.close().await;
}

#[tokio::test]
async fn test_dropping_subscription_stops_delivery() {
    let fake = Arc::new(FakeTransport::new());
    fake.script_stream(StreamScript::Events {
        events: vec![Ok(log_json("dispatch", "one"))],
        keep_open: true,
    });

    let mut collected = subscribe(&fake, ReconnectPolicy::none(), &LogStreamFilter::default());
    next(&mut collected.records).await;

    drop(collected.subscription);

    // The pump owns the senders; they are dropped once it stops
    let closed = tokio::time::timeout(Duration::from_secs(2), collected.records.recv())
        .await
        .expect("pump kept running after drop");
    assert!(closed.is_none());
}

#[tokio::test]
async fn test_delivered_record_resets_reconnect_budget() {
    let fake = Arc::new(FakeTransport::new());
    for n in 0..3 {
        fake.script_stream(StreamScript::Events {
            events: vec![
                Ok(log_json("routing", &format!("record {}", n))),
                Err(McpError::Stream("connection reset".to_string())),
            ],
            keep_open: true,
        });
    }

    // One reconnect per failure, but every delivered record refills it
    let policy = ReconnectPolicy::fixed(1, Duration::from_millis(5));
    let mut collected = subscribe(&fake, policy, &LogStreamFilter::default());

    tokio::time::timeout(Duration::from_secs(2), collected.subscription.wait())
        .await
        .expect("stream kept reconnecting");

    // Three scripted channels, then one unscripted open that exhausts the budget
    assert_eq!(fake.calls_to(STREAM_PATH), 4);
    for n in 0..3 {
        assert_eq!(next(&mut collected.records).await.message, format!("record {}", n));
    }
    for _ in 0..4 {
        assert!(matches!(next(&mut collected.errors).await, McpError::Stream(_)));
    }
    assert!(collected.errors.try_recv().is_err());
}

#[tokio::test]
async fn test_follow_stream_end_is_channel_failure() {
    let fake = Arc::new(FakeTransport::new());
    fake.script_stream(StreamScript::Events {
        events: vec![Ok(log_json("audit", "last words"))],
        keep_open: false,
    });

    let mut collected = subscribe(&fake, ReconnectPolicy::none(), &LogStreamFilter::default());

    assert_eq!(next(&mut collected.records).await.message, "last words");
    match next(&mut collected.errors).await {
        McpError::Stream(message) => assert_eq!(message, "log stream ended unexpectedly"),
        other => panic!("expected stream error, got {:?}", other),
    }

    tokio::time::timeout(Duration::from_secs(2), collected.subscription.wait())
        .await
        .expect("stream did not close after channel ended");
    assert_eq!(fake.calls_to(STREAM_PATH), 1);
}
