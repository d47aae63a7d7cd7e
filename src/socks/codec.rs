//! SOCKS5 control-channel frame encoding/decoding
//!
//! Pure functions over byte slices; no network access. The session in
//! [`crate::socks::session`] drives these against a real stream.

use super::consts::*;
use crate::error::CheckError;
use bytes::BufMut;

/// Encode the client greeting.
///
/// ```text
/// +----+----------+----------+
/// |VER | NMETHODS | METHODS  |
/// +----+----------+----------+
/// | 1  |    1     | 1 to 255 |
/// +----+----------+----------+
/// ```
///
/// Offers no-auth only when no credentials are available, or both no-auth
/// and username/password when they are.
pub fn encode_greeting(has_credentials: bool) -> Vec<u8> {
    if has_credentials {
        vec![
            SOCKS5_VERSION,
            2,
            SOCKS5_AUTH_METHOD_NONE,
            SOCKS5_AUTH_METHOD_PASSWORD,
        ]
    } else {
        vec![SOCKS5_VERSION, 1, SOCKS5_AUTH_METHOD_NONE]
    }
}

/// Decode the server's greeting response into (version, method).
///
/// The frame is exactly two bytes; anything shorter or longer is malformed.
pub fn decode_greeting_response(data: &[u8]) -> Result<(u8, u8), CheckError> {
    if data.len() != 2 {
        return Err(CheckError::MalformedResponse("handshake response"));
    }
    Ok((data[0], data[1]))
}

/// Encode an RFC 1929 username/password authentication request.
///
/// ```text
/// +----+------+----------+------+----------+
/// |VER | ULEN |  UNAME   | PLEN |  PASSWD  |
/// +----+------+----------+------+----------+
/// | 1  |  1   | 1 to 255 |  1   | 1 to 255 |
/// +----+------+----------+------+----------+
/// ```
pub fn encode_auth_request(username: &str, password: &str) -> Result<Vec<u8>, CheckError> {
    let user = username.as_bytes();
    let pass = password.as_bytes();

    if user.len() > MAX_CREDENTIAL_LEN || pass.len() > MAX_CREDENTIAL_LEN {
        return Err(CheckError::CredentialTooLong);
    }

    let mut buf = Vec::with_capacity(3 + user.len() + pass.len());
    buf.put_u8(SOCKS5_AUTH_VERSION);
    buf.put_u8(user.len() as u8);
    buf.put_slice(user);
    buf.put_u8(pass.len() as u8);
    buf.put_slice(pass);
    Ok(buf)
}

/// Decode the authentication sub-negotiation response.
///
/// Success iff the frame is exactly two bytes and the status byte is 0x00.
pub fn decode_auth_response(data: &[u8]) -> bool {
    data.len() == 2 && data[1] == SOCKS5_AUTH_SUCCEEDED
}

/// Encode a UDP ASSOCIATE request with a wildcard source address.
///
/// The client does not pre-bind a UDP source, so DST.ADDR and DST.PORT are
/// 0.0.0.0:0 and the server chooses the relay endpoint.
pub fn encode_udp_associate_request() -> Vec<u8> {
    let mut buf = Vec::with_capacity(10);
    buf.put_u8(SOCKS5_VERSION);
    buf.put_u8(SOCKS5_CMD_UDP_ASSOCIATE);
    buf.put_u8(SOCKS5_RESERVED);
    buf.put_u8(SOCKS5_ADDR_TYPE_IPV4);
    buf.put_slice(&[0, 0, 0, 0]);
    buf.put_u16(0);
    buf
}

/// Decode the fixed header of a UDP ASSOCIATE response into
/// (version, reply, address type).
///
/// ```text
/// +----+-----+-------+------+
/// |VER | REP |  RSV  | ATYP |
/// +----+-----+-------+------+
/// | 1  |  1  | X'00' |  1   |
/// +----+-----+-------+------+
/// ```
pub fn decode_associate_header(data: &[u8]) -> Result<(u8, u8, u8), CheckError> {
    if data.len() != 4 {
        return Err(CheckError::MalformedResponse("UDP ASSOCIATE response"));
    }
    Ok((data[0], data[1], data[3]))
}

/// Decode a port from two network-byte-order bytes.
pub fn decode_port(data: [u8; 2]) -> u16 {
    u16::from_be_bytes(data)
}
