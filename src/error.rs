//! Error types for Sockscheck
//!
//! This module defines the failure taxonomy for a UDP support check. Every
//! protocol step reports the exact point it failed at; the orchestrator in
//! [`crate::check`] collapses these into the final verdict.

use std::io;
use thiserror::Error;

/// Errors produced while checking a proxy for UDP support
#[derive(Error, Debug)]
pub enum CheckError {
    /// IO error on the control connection or the probe socket
    #[error("Transport error: {0}")]
    Transport(#[from] io::Error),

    /// An operation did not complete within its deadline
    #[error("Timeout: {0}")]
    Timeout(&'static str),

    /// Unsupported SOCKS version
    #[error("Unsupported SOCKS version: {0}")]
    UnsupportedVersion(u8),

    /// No acceptable authentication method
    #[error("No acceptable authentication method")]
    NoAcceptableMethod,

    /// Server requires authentication but no credentials were supplied
    #[error("Server requires authentication")]
    AuthRequired,

    /// Authentication failed
    #[error("Authentication failed")]
    AuthFailed,

    /// Username or password exceeds the single-byte length field
    #[error("Credential exceeds 255 bytes")]
    CredentialTooLong,

    /// Short or otherwise invalid frame from the server
    #[error("Malformed response: {0}")]
    MalformedResponse(&'static str),

    /// The server rejected the UDP ASSOCIATE command
    #[error("UDP ASSOCIATE failed: {message}")]
    CommandFailed {
        /// SOCKS5 reply code returned by the server
        code: u8,
        /// Diagnostic message for the reply code
        message: String,
    },

    /// Address type not supported
    #[error("Address type not supported: {0}")]
    AddressTypeNotSupported(u8),

    /// A protocol step was invoked out of order
    #[error("Invalid session state: {0}")]
    InvalidState(&'static str),
}

impl CheckError {
    /// Build a [`CheckError::CommandFailed`] from a SOCKS5 reply code,
    /// attaching the fixed diagnostic message for that code.
    pub fn command_failed(code: u8) -> Self {
        CheckError::CommandFailed {
            code,
            message: crate::socks::reply::reply_message(code),
        }
    }
}
