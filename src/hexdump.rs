//! Hex text <-> bytes for the command line
//!
//! Accepts the forms payloads usually get pasted in:
//! `012C`, `0x012C`, `01 2C`, `01:2C`, `0x01,0x2C`.

use crate::error::{Result, StreamError};

/// Parse a hex byte string, ignoring common separators and `0x` prefixes
pub fn parse_bytes(input: &str) -> Result<Vec<u8>> {
    let cleaned: String = input
        .split(|c: char| c.is_whitespace() || matches!(c, ':' | ',' | '-'))
        .filter(|chunk| !chunk.is_empty())
        .map(strip_prefix)
        .collect();

    hex::decode(&cleaned).map_err(|e| StreamError::InvalidHex {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a 32-bit mask written in hex, with or without `0x`
pub fn parse_mask(input: &str) -> Result<u32> {
    let digits = strip_prefix(input.trim()).replace('_', "");

    u32::from_str_radix(&digits, 16).map_err(|e| StreamError::InvalidHex {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

/// Lowercase contiguous hex
pub fn format_bytes(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

fn strip_prefix(chunk: &str) -> &str {
    chunk
        .strip_prefix("0x")
        .or_else(|| chunk.strip_prefix("0X"))
        .unwrap_or(chunk)
}
