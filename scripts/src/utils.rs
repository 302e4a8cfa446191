//! Utilities for decoding command line arguments

use pool_common::{constants::NUM_BYTES_FELT, field::Scalar};

use crate::errors::ScriptError;

/// Decodes a hex string, with or without a `0x` prefix
pub fn parse_hex(s: &str) -> Result<Vec<u8>, ScriptError> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(digits).map_err(|e| ScriptError::HexDecoding(e.to_string()))
}

/// Decodes up to 32 big-endian bytes of hex into a word, left-padding with zeros
pub fn parse_word(s: &str) -> Result<[u8; NUM_BYTES_FELT], ScriptError> {
    let bytes = parse_hex(s)?;
    if bytes.len() > NUM_BYTES_FELT {
        return Err(ScriptError::InvalidInput(format!("{} is longer than 32 bytes", s)));
    }

    let mut word = [0u8; NUM_BYTES_FELT];
    word[NUM_BYTES_FELT - bytes.len()..].copy_from_slice(&bytes);
    Ok(word)
}

/// Decodes a canonical scalar field element from hex
pub fn parse_scalar(s: &str) -> Result<Scalar, ScriptError> {
    Scalar::from_be_bytes(&parse_word(s)?)
        .ok_or_else(|| ScriptError::InvalidInput(format!("{} is not a field element", s)))
}
