//! End-to-end checks against loopback mock servers

mod common;

use common::{spawn_socks_server, spawn_udp_relay, MockServer};
use sockscheck::{check_udp_support, CheckConfig, CheckError, Stage};
use std::time::Duration;

fn config(port: u16) -> CheckConfig {
    let mut config = CheckConfig::new("127.0.0.1", port);
    config.timeout = Duration::from_millis(500);
    config
}

#[tokio::test]
async fn test_udp_supported_end_to_end() {
    let relay_port = spawn_udp_relay(true).await;
    let port = spawn_socks_server(MockServer::NoAuth { relay_port }).await;

    let outcome = check_udp_support(&config(port)).await;

    assert!(outcome.supported);
    assert_eq!(outcome.stage, Some(Stage::Probed));
    assert_eq!(
        outcome.relay.unwrap().to_string(),
        format!("127.0.0.1:{}", relay_port)
    );
    assert!(outcome.failure.is_none());
}

#[tokio::test]
async fn test_silent_relay_is_unsupported() {
    let relay_port = spawn_udp_relay(false).await;
    let port = spawn_socks_server(MockServer::NoAuth { relay_port }).await;

    let outcome = check_udp_support(&config(port)).await;

    assert!(!outcome.supported);
    assert_eq!(outcome.stage, Some(Stage::Associated));
    assert!(matches!(outcome.failure, Some(CheckError::Timeout(_))));
}

#[tokio::test]
async fn test_associate_rejected_by_ruleset() {
    let port = spawn_socks_server(MockServer::RejectAssociate { code: 0x02 }).await;

    let outcome = check_udp_support(&config(port)).await;

    assert!(!outcome.supported);
    assert_eq!(outcome.stage, Some(Stage::Handshaken));
    let failure = outcome.failure.unwrap();
    assert!(failure
        .to_string()
        .contains("Connection not allowed by ruleset"));
}

#[tokio::test]
async fn test_udp_not_supported_reply_code() {
    let port = spawn_socks_server(MockServer::RejectAssociate { code: 0x09 }).await;

    let outcome = check_udp_support(&config(port)).await;

    assert!(!outcome.supported);
    let failure = outcome.failure.unwrap();
    assert_eq!(failure.to_string(), "UDP ASSOCIATE failed: UDP not supported");
}

#[tokio::test]
async fn test_no_acceptable_method() {
    let port = spawn_socks_server(MockServer::RejectMethods).await;

    let outcome = check_udp_support(&config(port)).await;

    assert!(!outcome.supported);
    assert_eq!(outcome.stage, Some(Stage::Connected));
    assert!(matches!(
        outcome.failure,
        Some(CheckError::NoAcceptableMethod)
    ));
}

#[tokio::test]
async fn test_authenticated_check_succeeds() {
    let relay_port = spawn_udp_relay(true).await;
    let port = spawn_socks_server(MockServer::PasswordAuth { relay_port }).await;

    let mut config = config(port);
    config.username = Some("user".to_string());
    config.password = Some("pass".to_string());

    let outcome = check_udp_support(&config).await;

    assert!(outcome.supported);
    assert_eq!(outcome.stage, Some(Stage::Probed));
}

#[tokio::test]
async fn test_auth_demanded_without_credentials() {
    let relay_port = spawn_udp_relay(true).await;
    let port = spawn_socks_server(MockServer::PasswordAuth { relay_port }).await;

    let outcome = check_udp_support(&config(port)).await;

    assert!(!outcome.supported);
    assert_eq!(outcome.stage, Some(Stage::Connected));
    assert!(matches!(outcome.failure, Some(CheckError::AuthRequired)));
}

#[tokio::test]
async fn test_connection_refused() {
    // Bind then drop a listener to get a port nothing is listening on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let outcome = check_udp_support(&config(port)).await;

    assert!(!outcome.supported);
    assert!(outcome.stage.is_none());
    assert!(matches!(outcome.failure, Some(CheckError::Transport(_))));
}
