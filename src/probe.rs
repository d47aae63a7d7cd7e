//! UDP relay liveness probe
//!
//! Sends one SOCKS5-encapsulated DNS query through the relay endpoint and
//! judges whether anything structurally plausible comes back. This is a
//! black-box liveness check of the relay path, not a DNS correctness check:
//! the reply is judged by length only.

use crate::dns;
use crate::error::CheckError;
use crate::socks::types::RelayEndpoint;
use crate::socks::udp::encode_relay_packet;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::timeout;
use tracing::debug;

/// Domain whose A record the probe queries
pub const PROBE_DOMAIN: &str = "google.com";

/// Public resolver the encapsulated query is addressed to
pub const PROBE_RESOLVER: &str = "8.8.8.8";

/// DNS port on the resolver
pub const PROBE_RESOLVER_PORT: u16 = 53;

/// Replies at or below this length are not plausible DNS responses
const MIN_RESPONSE_LEN: usize = 10;

/// Send a probe datagram to the relay and wait for one reply.
///
/// Returns `Ok(true)` iff a reply longer than 10 bytes arrives within
/// `recv_timeout`, `Ok(false)` when the relay stays silent. The socket
/// lives only for the duration of the call.
pub async fn probe_relay(
    endpoint: &RelayEndpoint,
    recv_timeout: Duration,
) -> Result<bool, CheckError> {
    let socket = UdpSocket::bind("0.0.0.0:0").await?;

    let query = dns::build_query(PROBE_DOMAIN);
    let packet = encode_relay_packet(PROBE_RESOLVER, PROBE_RESOLVER_PORT, &query);

    socket
        .send_to(&packet, (endpoint.host.as_str(), endpoint.port))
        .await?;
    debug!("Probe sent to relay {} ({} bytes)", endpoint, packet.len());

    let mut buf = [0u8; 4096];
    match timeout(recv_timeout, socket.recv_from(&mut buf)).await {
        Ok(Ok((len, from))) => {
            debug!("Relay reply: {} bytes from {}", len, from);
            Ok(len > MIN_RESPONSE_LEN)
        }
        Ok(Err(e)) => Err(e.into()),
        Err(_) => {
            debug!("No relay reply within {:?}", recv_timeout);
            Ok(false)
        }
    }
}
