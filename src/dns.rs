//! Minimal DNS query construction
//!
//! Builds the single A-record query (RFC 1035) used as the probe payload.
//! Only query construction is needed; the probe judges replies by length,
//! not content.

use bytes::{BufMut, BytesMut};

/// Transaction ID stamped on every probe query
pub const DNS_QUERY_ID: u16 = 0x1234;

/// Flags: standard query with recursion desired
const DNS_FLAGS_RD: u16 = 0x0100;

/// QTYPE for A records
const DNS_QTYPE_A: u16 = 1;

/// QCLASS for the Internet
const DNS_QCLASS_IN: u16 = 1;

/// Build a DNS A query for the given domain.
///
/// 12-byte header (ID, flags, QDCOUNT=1, remaining counts 0), then the
/// domain as length-prefixed labels with a zero terminator, QTYPE=A,
/// QCLASS=IN.
pub fn build_query(domain: &str) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(12 + domain.len() + 6);

    buf.put_u16(DNS_QUERY_ID);
    buf.put_u16(DNS_FLAGS_RD);
    buf.put_u16(1); // QDCOUNT
    buf.put_u16(0); // ANCOUNT
    buf.put_u16(0); // NSCOUNT
    buf.put_u16(0); // ARCOUNT

    for label in domain.split('.') {
        buf.put_u8(label.len() as u8);
        buf.put_slice(label.as_bytes());
    }
    buf.put_u8(0);

    buf.put_u16(DNS_QTYPE_A);
    buf.put_u16(DNS_QCLASS_IN);
    buf.to_vec()
}
