//! SOCKS5 reply code diagnostics
//!
//! Maps the reply codes of RFC 1928 to the fixed human-readable messages
//! reported when UDP ASSOCIATE is rejected.

/// Return the diagnostic message for a SOCKS5 reply code.
///
/// Codes 0x01 through 0x09 have fixed messages; any other code yields a
/// generic message that includes the numeric value. Code 0x00 is success and
/// never reaches this table in practice.
pub fn reply_message(code: u8) -> String {
    match code {
        0x01 => "General server failure".to_string(),
        0x02 => "Connection not allowed by ruleset".to_string(),
        0x03 => "Network unreachable".to_string(),
        0x04 => "Host unreachable".to_string(),
        0x05 => "Connection refused".to_string(),
        0x06 => "TTL expired".to_string(),
        0x07 => "Command not supported".to_string(),
        0x08 => "Address type not supported".to_string(),
        0x09 => "UDP not supported".to_string(),
        other => format!("Unknown error (code {})", other),
    }
}
