//! Check orchestration
//!
//! Sequences the TCP connect, the SOCKS5 handshake, the UDP ASSOCIATE
//! exchange, and the relay probe; stops at the first failing stage and maps
//! every failure mode to a uniform [`Outcome`]. Both sockets are owned by
//! this sequence and dropped on every exit path.

use crate::config::CheckConfig;
use crate::error::CheckError;
use crate::probe::probe_relay;
use crate::socks::session::ControlChannelSession;
use crate::socks::types::RelayEndpoint;
use std::fmt;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{info, warn};

/// Timeout for the TCP connect and each control-channel step
pub const CONTROL_TIMEOUT: Duration = Duration::from_secs(10);

/// Milestones of a check, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// TCP connection to the proxy established
    Connected,
    /// SOCKS5 greeting and authentication completed
    Handshaken,
    /// UDP relay endpoint received
    Associated,
    /// UDP traffic confirmed through the relay
    Probed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Connected => write!(f, "TCP connection established"),
            Stage::Handshaken => write!(f, "SOCKS5 handshake complete"),
            Stage::Associated => write!(f, "UDP relay established"),
            Stage::Probed => write!(f, "UDP traffic verified"),
        }
    }
}

/// Result of a UDP support check
#[derive(Debug)]
pub struct Outcome {
    /// Whether the proxy relayed UDP traffic end to end
    pub supported: bool,
    /// Furthest stage completed; `None` when the TCP connection never came up
    pub stage: Option<Stage>,
    /// Relay endpoint, when the associate exchange got that far
    pub relay: Option<RelayEndpoint>,
    /// The failure that stopped the check, absent on success
    pub failure: Option<CheckError>,
}

impl Outcome {
    fn supported(relay: RelayEndpoint) -> Self {
        Outcome {
            supported: true,
            stage: Some(Stage::Probed),
            relay: Some(relay),
            failure: None,
        }
    }

    fn unsupported(
        stage: Option<Stage>,
        relay: Option<RelayEndpoint>,
        failure: CheckError,
    ) -> Self {
        Outcome {
            supported: false,
            stage,
            relay,
            failure: Some(failure),
        }
    }
}

/// Check whether the configured proxy genuinely supports UDP relaying.
///
/// One attempt, one verdict: every failure aborts the remaining sequence and
/// is recorded in the outcome. Never panics and never terminates the
/// process; exit-code policy belongs to the caller.
pub async fn check_udp_support(config: &CheckConfig) -> Outcome {
    info!("Checking {}:{} for UDP support", config.host, config.port);

    let connect = TcpStream::connect((config.host.as_str(), config.port));
    let stream = match timeout(CONTROL_TIMEOUT, connect).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(e)) => {
            warn!("TCP connect failed: {}", e);
            return Outcome::unsupported(None, None, e.into());
        }
        Err(_) => return Outcome::unsupported(None, None, CheckError::Timeout("TCP connect")),
    };
    info!("TCP connection established");

    let mut session = ControlChannelSession::new(stream);
    let credentials = config.credentials();

    match timeout(CONTROL_TIMEOUT, session.perform_handshake(credentials.as_ref())).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => return Outcome::unsupported(Some(Stage::Connected), None, e),
        Err(_) => {
            return Outcome::unsupported(
                Some(Stage::Connected),
                None,
                CheckError::Timeout("SOCKS5 handshake"),
            )
        }
    }
    info!(
        "SOCKS5 handshake complete ({})",
        if credentials.is_some() {
            "with credentials"
        } else {
            "no auth required"
        }
    );

    let relay = match timeout(CONTROL_TIMEOUT, session.request_udp_associate()).await {
        Ok(Ok(relay)) => relay,
        Ok(Err(e)) => return Outcome::unsupported(Some(Stage::Handshaken), None, e),
        Err(_) => {
            return Outcome::unsupported(
                Some(Stage::Handshaken),
                None,
                CheckError::Timeout("UDP ASSOCIATE exchange"),
            )
        }
    };
    info!("UDP relay established: {}", relay);

    // The control connection must stay open while probing: closing it ends
    // the UDP association on the server side. `session` is dropped only
    // when this function returns.
    match probe_relay(&relay, config.timeout).await {
        Ok(true) => {
            info!("UDP traffic relayed successfully");
            Outcome::supported(relay)
        }
        Ok(false) => {
            warn!("UDP relay established but no traffic came back");
            Outcome::unsupported(
                Some(Stage::Associated),
                Some(relay),
                CheckError::Timeout("UDP relay response"),
            )
        }
        Err(e) => Outcome::unsupported(Some(Stage::Associated), Some(relay), e),
    }
}
