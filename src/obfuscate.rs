//! Keyed obfuscation for state snapshots.
//!
//! A XOR stream over a repeating key, wrapped in URL-safe base64. This
//! is obfuscation, not cryptography: it keeps state snapshots from
//! being casually readable and must not be used to protect anything
//! sensitive.

use anyhow::{ensure, Context, Result};
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;

/// XOR `data` against the repeating `key` and base64-encode the result.
pub fn obfuscate(data: &[u8], key: &[u8]) -> Result<String> {
    ensure!(!key.is_empty(), "obfuscation key must not be empty");
    let mixed = xor_stream(data, key);
    Ok(URL_SAFE.encode(mixed))
}

/// Reverse [`obfuscate`]: base64-decode and XOR with the same key.
pub fn deobfuscate(encoded: &str, key: &[u8]) -> Result<Vec<u8>> {
    ensure!(!key.is_empty(), "obfuscation key must not be empty");
    let mixed = URL_SAFE
        .decode(encoded)
        .context("invalid base64 payload")?;
    Ok(xor_stream(&mixed, key))
}

fn xor_stream(data: &[u8], key: &[u8]) -> Vec<u8> {
    data.iter()
        .enumerate()
        .map(|(i, byte)| byte ^ key[i % key.len()])
        .collect()
}
