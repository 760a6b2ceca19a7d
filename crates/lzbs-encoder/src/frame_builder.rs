use lzbs_wire::header::{FrameHeader, HEADER_LEN};
use lzbs_wire::token::{BlockMethod, BlockToken, level_for_block_size};
use xxhash_rust::xxh32::xxh32;

use crate::compression;
use crate::error::EncodeError;

/// Turns finished blocks into on-wire frames.
///
/// For every block the builder:
///
///   1. computes the XXHash32 of the block with the configured seed
///      (0 when checksums are disabled),
///   2. compresses the block with the configured mode,
///   3. picks the RAW representation whenever the compressed result is not
///      strictly smaller — a frame never inflates the wire size beyond the
///      raw bytes plus one header,
///   4. assembles header + payload into one contiguous run of `out`.
///
/// A compression-primitive failure aborts the frame; RAW is only ever
/// chosen by the size comparison in step 3.
#[derive(Clone, Copy, Debug)]
pub struct FrameBuilder {
    level: u8,
    high_compression: bool,
    checksum_seed: Option<u32>,
}

impl FrameBuilder {
    #[must_use]
    pub fn new(block_size: usize, high_compression: bool, checksum_seed: Option<u32>) -> Self {
        Self {
            level: level_for_block_size(block_size),
            high_compression,
            checksum_seed,
        }
    }

    /// Append exactly one frame for `block` to `out`.
    ///
    /// An empty block appends nothing — empty input produces zero frames,
    /// not a zero-length frame.
    ///
    /// # Errors
    ///
    /// [`EncodeError::Compression`] if the LZ4 primitive fails; nothing is
    /// appended in that case.
    pub fn build_into(&self, block: &[u8], out: &mut Vec<u8>) -> Result<(), EncodeError> {
        if block.is_empty() {
            return Ok(());
        }

        let checksum = match self.checksum_seed {
            Some(seed) => xxh32(block, seed),
            None => 0,
        };
        let compressed = compression::compress_block(block, self.high_compression)?;

        let (method, payload) = if compressed.len() >= block.len() {
            (BlockMethod::Raw, block)
        } else {
            (BlockMethod::Compressed, compressed.as_slice())
        };

        // Both lengths fit u32: blocks are capped at 32 MiB and the LZ4
        // bound stays well below 4 GiB for that input.
        #[allow(clippy::cast_possible_truncation)]
        let header = FrameHeader {
            token: BlockToken::new(method, self.level),
            compressed_len: payload.len() as u32,
            decompressed_len: block.len() as u32,
            checksum,
        };
        append_frame(&header, payload, out)
    }

    /// Append the end-of-stream terminator: zero lengths, zero checksum,
    /// no payload.
    pub fn end_of_stream_into(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        let header = FrameHeader {
            token: BlockToken::new(BlockMethod::EndOfStream, self.level),
            compressed_len: 0,
            decompressed_len: 0,
            checksum: 0,
        };
        append_frame(&header, &[], out)
    }
}

fn append_frame(header: &FrameHeader, payload: &[u8], out: &mut Vec<u8>) -> Result<(), EncodeError> {
    out.reserve(HEADER_LEN + payload.len());
    let mut head = [0u8; HEADER_LEN];
    header.write_to(&mut head)?;
    out.extend_from_slice(&head);
    out.extend_from_slice(payload);
    Ok(())
}
