//! SOCKS5 type definitions
//!
//! Defines the core types used in the client-side SOCKS5 exchange.

use super::consts::*;
use std::fmt;

/// Authentication method selected by the server during the greeting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// No authentication required
    None,
    /// Username/password authentication (RFC 1929)
    UsernamePassword,
    /// No acceptable methods (0xFF)
    Rejected,
    /// Any other method byte; accepted without further negotiation
    Other(u8),
}

impl AuthMethod {
    /// Parse a method byte from the greeting response
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            SOCKS5_AUTH_METHOD_NONE => AuthMethod::None,
            SOCKS5_AUTH_METHOD_PASSWORD => AuthMethod::UsernamePassword,
            SOCKS5_AUTH_METHOD_NOT_ACCEPTABLE => AuthMethod::Rejected,
            other => AuthMethod::Other(other),
        }
    }
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMethod::None => write!(f, "no authentication"),
            AuthMethod::UsernamePassword => write!(f, "username/password"),
            AuthMethod::Rejected => write!(f, "no acceptable method"),
            AuthMethod::Other(byte) => write!(f, "method 0x{:02x}", byte),
        }
    }
}

/// Username/password pair for the RFC 1929 sub-negotiation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username
    pub username: String,
    /// Password
    pub password: String,
}

impl Credentials {
    /// Build credentials from optional username and password parts.
    ///
    /// Returns `Some` only when both parts are present and non-empty;
    /// anything less forces no-auth negotiation.
    pub fn from_parts(username: Option<&str>, password: Option<&str>) -> Option<Self> {
        match (username, password) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some(Credentials {
                    username: user.to_string(),
                    password: pass.to_string(),
                })
            }
            _ => None,
        }
    }
}

/// UDP relay endpoint returned by a successful UDP ASSOCIATE exchange
///
/// The host may be an IPv4 literal or a domain name, depending on the
/// address type the server replied with. It is the destination for the UDP
/// probe and is never reused for control traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayEndpoint {
    /// Relay host as reported by the server
    pub host: String,
    /// Relay port
    pub port: u16,
}

impl RelayEndpoint {
    /// Create a new relay endpoint
    pub fn new(host: String, port: u16) -> Self {
        RelayEndpoint { host, port }
    }
}

impl fmt::Display for RelayEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
