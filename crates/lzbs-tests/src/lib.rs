#![warn(clippy::pedantic)]

//! Shared fixtures for the lzbs integration tests and benches.

use lzbs_encoder::{EncoderConfig, StreamEncoder};

/// Encode `chunks` as one stream — write each chunk in order, then close —
/// and return the raw stream bytes.
///
/// # Panics
///
/// Panics on any encode failure; fixtures only use valid configurations.
#[must_use]
pub fn encode_stream(config: EncoderConfig, chunks: &[&[u8]]) -> Vec<u8> {
    let mut encoder =
        StreamEncoder::with_config(config, Vec::new()).expect("valid test configuration");
    for chunk in chunks {
        encoder.write(chunk).expect("write failed");
    }
    encoder.finish().expect("close failed")
}

/// Highly compressible payload: a repeated ASCII phrase.
#[must_use]
pub fn compressible(len: usize) -> Vec<u8> {
    b"the quick brown fox jumps over the lazy dog. "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

/// Payload LZ4 cannot shrink: xorshift output has no usable repetition,
/// so every block takes the RAW fallback. Deterministic so failures
/// reproduce.
#[must_use]
pub fn incompressible(len: usize) -> Vec<u8> {
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut out = Vec::with_capacity(len + 8);
    while out.len() < len {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        out.extend_from_slice(&state.to_le_bytes());
    }
    out.truncate(len);
    out
}
