//! Check configuration
//!
//! A check is configured entirely from the command line; there are no
//! configuration files and no persisted state.

use crate::socks::types::Credentials;
use std::time::Duration;

/// Default UDP receive timeout
pub const DEFAULT_UDP_TIMEOUT: Duration = Duration::from_secs(5);

/// Parameters for a single UDP support check
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Proxy hostname or IP address
    pub host: String,
    /// Proxy port
    pub port: u16,
    /// Username for SOCKS5 auth
    pub username: Option<String>,
    /// Password for SOCKS5 auth
    pub password: Option<String>,
    /// UDP receive timeout for the relay probe
    pub timeout: Duration,
}

impl CheckConfig {
    /// Create a configuration for the given proxy with defaults for the rest
    pub fn new(host: &str, port: u16) -> Self {
        CheckConfig {
            host: host.to_string(),
            port,
            username: None,
            password: None,
            timeout: DEFAULT_UDP_TIMEOUT,
        }
    }

    /// Credentials for the handshake, present only when both the username
    /// and the password are non-empty.
    pub fn credentials(&self) -> Option<Credentials> {
        Credentials::from_parts(self.username.as_deref(), self.password.as_deref())
    }

    /// Check if usable authentication credentials are configured
    pub fn has_credentials(&self) -> bool {
        self.credentials().is_some()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Proxy host must not be empty".to_string());
        }
        if self.port == 0 {
            return Err("Proxy port must be non-zero".to_string());
        }
        if self.timeout.is_zero() {
            return Err("UDP timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}
