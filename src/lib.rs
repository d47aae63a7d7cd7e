//! # Sockscheck - SOCKS5 UDP Support Checker
//!
//! Sockscheck determines whether a SOCKS5 proxy genuinely supports UDP
//! relaying, not merely the UDP ASSOCIATE handshake. It is a diagnostic
//! client for validating proxy deployments before relying on them for
//! UDP-carrying applications (DNS, VoIP, games, VPN-over-SOCKS).
//!
//! ## How a check works
//!
//! 1. Connect to the proxy over TCP
//! 2. Perform the SOCKS5 greeting, authenticating if the server demands it
//! 3. Request a UDP association and learn the relay endpoint
//! 4. Send a SOCKS5-encapsulated DNS query through the relay and wait for a
//!    structurally plausible reply
//!
//! One attempt, one verdict. All failure modes collapse into a single
//! supported/unsupported outcome with a diagnostic reason.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sockscheck::{check_udp_support, CheckConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let config = CheckConfig::new("proxy.example.com", 1080);
//!     let outcome = check_udp_support(&config).await;
//!
//!     std::process::exit(if outcome.supported { 0 } else { 1 });
//! }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod check;
pub mod config;
pub mod dns;
pub mod error;
pub mod probe;
pub mod socks;

// Re-export commonly used items
pub use check::{check_udp_support, Outcome, Stage};
pub use config::CheckConfig;
pub use error::CheckError;

/// Version of the Sockscheck library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the application
pub const NAME: &str = env!("CARGO_PKG_NAME");
