//! Sockscheck - SOCKS5 UDP Support Checker
//!
//! This is the command-line entry point: argument parsing, logging setup,
//! verdict printing, and the exit code. The protocol logic lives in the
//! library.

use anyhow::Result;
use clap::Parser;
use sockscheck::{check_udp_support, CheckConfig};
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Sockscheck - test whether a SOCKS5 proxy supports UDP relaying
#[derive(Parser, Debug)]
#[command(name = "sockscheck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Proxy hostname or IP address
    host: String,

    /// Proxy port
    port: u16,

    /// Username for authentication
    #[arg(short, long)]
    username: Option<String>,

    /// Password for authentication
    #[arg(short, long)]
    password: Option<String>,

    /// Quiet mode (no output, use exit code)
    #[arg(short, long)]
    quiet: bool,

    /// UDP test timeout in seconds
    #[arg(short, long, default_value_t = 5.0)]
    timeout: f64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    if !args.quiet {
        setup_logging(&args.log_level)?;
    }

    if !args.timeout.is_finite() || args.timeout <= 0.0 {
        anyhow::bail!("UDP timeout must be greater than zero");
    }

    let config = CheckConfig {
        host: args.host,
        port: args.port,
        username: args.username,
        password: args.password,
        timeout: Duration::from_secs_f64(args.timeout),
    };

    if let Err(e) = config.validate() {
        anyhow::bail!(e);
    }

    let outcome = check_udp_support(&config).await;

    if !args.quiet {
        if let Some(relay) = &outcome.relay {
            if outcome.supported {
                println!("UDP fully supported via relay {}", relay);
            }
        }
        if let Some(reason) = &outcome.failure {
            println!("UDP not supported: {}", reason);
        }
    }

    std::process::exit(if outcome.supported { 0 } else { 1 });
}

/// Setup logging for a non-quiet run
fn setup_logging(level: &str) -> Result<()> {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" | "warning" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
