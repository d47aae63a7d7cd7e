//! UDP relay encapsulation for SOCKS5
//!
//! Encodes the RFC 1928 section 7 header that wraps each datagram sent
//! through the relay.

use super::consts::*;
use bytes::{BufMut, BytesMut};

/// Encode a payload into a SOCKS5 UDP relay packet.
///
/// # UDP Request Format
///
/// ```text
/// +----+------+------+----------+----------+----------+
/// |RSV | FRAG | ATYP | DST.ADDR | DST.PORT |   DATA   |
/// +----+------+------+----------+----------+----------+
/// | 2  |  1   |  1   | Variable |    2     | Variable |
/// +----+------+------+----------+----------+----------+
/// ```
///
/// The target is always encoded with the domain address type, even when it
/// is an IPv4 literal. The probe only needs the relay to forward the
/// datagram somewhere real; a domain-typed target is the minimal shape every
/// relay accepts.
pub fn encode_relay_packet(target_host: &str, target_port: u16, payload: &[u8]) -> Vec<u8> {
    let host = target_host.as_bytes();

    let mut buf = BytesMut::with_capacity(7 + host.len() + payload.len());
    buf.put_u16(0); // RSV
    buf.put_u8(0); // FRAG
    buf.put_u8(SOCKS5_ADDR_TYPE_DOMAIN);
    buf.put_u8(host.len() as u8);
    buf.put_slice(host);
    buf.put_u16(target_port);
    buf.put_slice(payload);
    buf.to_vec()
}
