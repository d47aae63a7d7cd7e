//! SOCKS5 control-channel session
//!
//! Drives the greeting/auth negotiation and the UDP ASSOCIATE exchange over
//! a single TCP connection. The session is an explicit state machine; each
//! step checks that it is invoked in order and advances the state as frames
//! go out and come back.
//!
//! Control messages of this size arrive atomically on a healthy connection,
//! so each step issues exactly one read and treats a short frame as fatal
//! rather than retrying.

use super::codec;
use super::consts::*;
use super::types::{AuthMethod, Credentials, RelayEndpoint};
use crate::error::CheckError;
use std::net::Ipv4Addr;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// Progress of the control-channel exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// TCP connection established, nothing sent yet
    Connected,
    /// Greeting written, awaiting method selection
    GreetingSent,
    /// Server selected an authentication method
    MethodSelected,
    /// Username/password request written, awaiting status
    AuthSent,
    /// Negotiation complete; ready for UDP ASSOCIATE
    Authenticated,
    /// UDP ASSOCIATE request written, awaiting reply
    AssociateSent,
    /// Relay endpoint received
    Associated,
}

/// Client side of the SOCKS5 control channel
///
/// Owns the stream for the lifetime of the check; dropping the session
/// closes the connection and with it any UDP association the server set up.
pub struct ControlChannelSession<S> {
    stream: S,
    state: SessionState,
}

impl<S> ControlChannelSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap a freshly connected stream
    pub fn new(stream: S) -> Self {
        ControlChannelSession {
            stream,
            state: SessionState::Connected,
        }
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Perform the greeting and, if the server demands it, the RFC 1929
    /// username/password sub-negotiation.
    ///
    /// Only the no-auth and username/password methods are negotiated
    /// explicitly. Any other method byte the server selects is accepted
    /// without further action.
    pub async fn perform_handshake(
        &mut self,
        credentials: Option<&Credentials>,
    ) -> Result<(), CheckError> {
        if self.state != SessionState::Connected {
            return Err(CheckError::InvalidState("handshake already performed"));
        }

        let greeting = codec::encode_greeting(credentials.is_some());
        self.stream.write_all(&greeting).await?;
        self.stream.flush().await?;
        self.state = SessionState::GreetingSent;

        let mut buf = [0u8; 2];
        let n = self.stream.read(&mut buf).await?;
        let (version, method) = codec::decode_greeting_response(&buf[..n])?;

        if version != SOCKS5_VERSION {
            return Err(CheckError::UnsupportedVersion(version));
        }
        self.state = SessionState::MethodSelected;

        let method = AuthMethod::from_byte(method);
        debug!("Server selected {}", method);

        match method {
            AuthMethod::Rejected => Err(CheckError::NoAcceptableMethod),
            AuthMethod::UsernamePassword => {
                let creds = credentials.ok_or(CheckError::AuthRequired)?;
                self.authenticate(creds).await
            }
            _ => {
                self.state = SessionState::Authenticated;
                Ok(())
            }
        }
    }

    /// Run the username/password sub-negotiation
    async fn authenticate(&mut self, credentials: &Credentials) -> Result<(), CheckError> {
        let request =
            codec::encode_auth_request(&credentials.username, &credentials.password)?;
        self.stream.write_all(&request).await?;
        self.stream.flush().await?;
        self.state = SessionState::AuthSent;

        let mut buf = [0u8; 2];
        let n = self.stream.read(&mut buf).await?;
        if !codec::decode_auth_response(&buf[..n]) {
            return Err(CheckError::AuthFailed);
        }

        debug!("Authenticated as {}", credentials.username);
        self.state = SessionState::Authenticated;
        Ok(())
    }

    /// Request a UDP association and return the relay endpoint the server
    /// bound for this session.
    pub async fn request_udp_associate(&mut self) -> Result<RelayEndpoint, CheckError> {
        if self.state != SessionState::Authenticated {
            return Err(CheckError::InvalidState("UDP ASSOCIATE before handshake"));
        }

        let request = codec::encode_udp_associate_request();
        self.stream.write_all(&request).await?;
        self.stream.flush().await?;
        self.state = SessionState::AssociateSent;

        let mut header = [0u8; 4];
        let n = self.stream.read(&mut header).await?;
        let (version, reply, atyp) = codec::decode_associate_header(&header[..n])?;

        if version != SOCKS5_VERSION {
            return Err(CheckError::UnsupportedVersion(version));
        }
        if reply != SOCKS5_REPLY_SUCCEEDED {
            return Err(CheckError::command_failed(reply));
        }

        let host = self.read_relay_host(atyp).await?;
        let mut port_buf = [0u8; 2];
        self.stream.read_exact(&mut port_buf).await?;

        let endpoint = RelayEndpoint::new(host, codec::decode_port(port_buf));
        self.state = SessionState::Associated;

        debug!("UDP relay endpoint: {}", endpoint);
        Ok(endpoint)
    }

    /// Read the bound address of the associate reply, by address type
    async fn read_relay_host(&mut self, atyp: u8) -> Result<String, CheckError> {
        match atyp {
            SOCKS5_ADDR_TYPE_IPV4 => {
                let mut addr = [0u8; 4];
                self.stream.read_exact(&mut addr).await?;
                Ok(Ipv4Addr::from(addr).to_string())
            }

            SOCKS5_ADDR_TYPE_DOMAIN => {
                let mut len_buf = [0u8; 1];
                self.stream.read_exact(&mut len_buf).await?;
                let mut domain = vec![0u8; len_buf[0] as usize];
                self.stream.read_exact(&mut domain).await?;
                String::from_utf8(domain)
                    .map_err(|_| CheckError::MalformedResponse("relay domain name"))
            }

            other => Err(CheckError::AddressTypeNotSupported(other)),
        }
    }
}
