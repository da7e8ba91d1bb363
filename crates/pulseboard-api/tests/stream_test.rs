// Reconnect state machine tests for `EventStreamClient`.
//
// Runs on a paused tokio clock: connection attempts against a closed local
// port fail without any backend, and the backoff sleeps between attempts
// auto-advance, so the full retry schedule plays out in milliseconds of
// real time.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use pulseboard_api::{ConnectionState, EventStreamClient, RetryPolicy};

fn unreachable_client() -> EventStreamClient {
    // Port 1 is unassigned on loopback; connects are refused immediately.
    EventStreamClient::new(
        Url::parse("ws://127.0.0.1:1/events").unwrap(),
        RetryPolicy {
            base_delay: Duration::from_millis(1000),
            max_attempts: 5,
        },
    )
}

/// Walk the status stream until `Failed`, collecting the attempt number of
/// every `Reconnecting` state seen along the way.
async fn attempts_until_failed(client: &EventStreamClient) -> (Vec<u32>, Option<String>) {
    let mut status = client.status();
    let mut attempts = Vec::new();

    loop {
        status.changed().await.unwrap();
        let current = status.borrow_and_update().clone();
        match current.state {
            ConnectionState::Reconnecting { attempt } => attempts.push(attempt),
            ConnectionState::Failed => return (attempts, current.notice),
            _ => {}
        }
    }
}

#[tokio::test(start_paused = true)]
async fn five_attempts_then_terminal_failure() {
    let client = unreachable_client();
    client.connect(SecretString::from("token"));

    let (attempts, notice) = attempts_until_failed(&client).await;

    assert_eq!(attempts, vec![1, 2, 3, 4, 5]);
    assert_eq!(notice.as_deref(), Some("Connection lost. Please reload."));
    assert_eq!(client.state(), ConnectionState::Failed);
}

#[tokio::test(start_paused = true)]
async fn retrying_surfaces_transient_notice() {
    let client = unreachable_client();
    let mut status = client.status();
    client.connect(SecretString::from("token"));

    loop {
        status.changed().await.unwrap();
        let current = status.borrow_and_update().clone();
        if matches!(current.state, ConnectionState::Reconnecting { .. }) {
            assert_eq!(current.notice.as_deref(), Some("Connection failed. Retrying..."));
            break;
        }
    }
}

#[tokio::test(start_paused = true)]
async fn disconnect_during_reconnecting_cancels_timer() {
    let client = unreachable_client();
    let mut status = client.status();
    client.connect(SecretString::from("token"));

    // Wait until a reconnect delay is pending.
    loop {
        status.changed().await.unwrap();
        if matches!(
            status.borrow_and_update().state,
            ConnectionState::Reconnecting { .. }
        ) {
            break;
        }
    }

    client.disconnect();
    assert_eq!(client.state(), ConnectionState::Disconnected);

    // Advance well past every backoff delay: the cancelled timer must not
    // fire, so no `Connecting` transition happens without a new connect().
    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(client.state(), ConnectionState::Disconnected);
}

#[tokio::test(start_paused = true)]
async fn connect_is_idempotent_while_retrying() {
    let client = unreachable_client();
    let mut status = client.status();
    client.connect(SecretString::from("token"));

    // Observe the first retry, then call connect again mid-cycle.
    loop {
        status.changed().await.unwrap();
        if matches!(
            status.borrow_and_update().state,
            ConnectionState::Reconnecting { attempt: 1 }
        ) {
            break;
        }
    }
    client.connect(SecretString::from("token"));

    // A second loop would restart the schedule at attempt 1; the attempt
    // sequence continuing monotonically proves the call was a no-op.
    let mut attempts = vec![1];
    loop {
        status.changed().await.unwrap();
        let current = status.borrow_and_update().clone();
        match current.state {
            ConnectionState::Reconnecting { attempt } => attempts.push(attempt),
            ConnectionState::Failed => break,
            _ => {}
        }
    }
    assert_eq!(attempts, vec![1, 2, 3, 4, 5]);
}

#[tokio::test(start_paused = true)]
async fn connect_after_failure_restarts_the_loop() {
    let client = unreachable_client();
    client.connect(SecretString::from("token"));

    let (_, _) = attempts_until_failed(&client).await;
    assert_eq!(client.state(), ConnectionState::Failed);

    // Failed is terminal only until an explicit connect.
    client.connect(SecretString::from("token"));
    let (attempts, _) = attempts_until_failed(&client).await;
    assert_eq!(attempts, vec![1, 2, 3, 4, 5]);
}
