use lzbs_wire::header::{DEFAULT_SEED, FrameHeader, HEADER_LEN};
use lzbs_wire::token::BlockMethod;
use xxhash_rust::xxh32::xxh32;

use crate::decompression;
use crate::error::DecodeError;
use crate::frame::Frame;

/// Synchronous decoder for complete in-memory frame streams.
///
/// The decoder walks frames front to back, recovering each block (verbatim
/// for RAW, via LZ4 for COMPRESSED) and verifying its XXHash32 when a seed
/// is configured, until the end-of-stream terminator. A stream that never
/// terminates is reported as truncated; bytes after the terminator are
/// reported as trailing data.
///
/// The seed must match the encoder's: decoding a checksummed stream with
/// checksums disabled skips verification entirely, while decoding an
/// unchecksummed stream with a seed fails with a checksum mismatch (the
/// stored field is 0).
///
/// # Example
///
/// ```rust
/// use lzbs_decoder::BlockDecoder;
/// use lzbs_encoder::StreamEncoder;
///
/// let mut encoder = StreamEncoder::new(Vec::new());
/// encoder.write(b"a body worth a round trip").unwrap();
/// let stream = encoder.finish().unwrap();
///
/// let decoded = BlockDecoder::new().decode_to_vec(&stream).unwrap();
/// assert_eq!(decoded, b"a body worth a round trip");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct BlockDecoder {
    checksum_seed: Option<u32>,
}

impl BlockDecoder {
    /// Decoder expecting the format's conventional checksum seed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            checksum_seed: Some(DEFAULT_SEED),
        }
    }

    /// Decoder for a stream produced with a custom seed, or with `None`
    /// for a stream written without checksums.
    #[must_use]
    pub fn with_checksum_seed(checksum_seed: Option<u32>) -> Self {
        Self { checksum_seed }
    }

    /// Recover the original block carried by one frame. The terminator
    /// carries no data and decodes to an empty block.
    ///
    /// # Errors
    ///
    /// Length, decompression, and checksum errors per [`DecodeError`].
    pub fn decode_frame(&self, frame: &Frame) -> Result<Vec<u8>, DecodeError> {
        self.decode_block(&frame.header, &frame.payload)
    }

    /// Decode a whole stream — the concatenation of every frame through
    /// the terminator — back into the original bytes.
    ///
    /// # Errors
    ///
    /// Everything [`decode_frame`](Self::decode_frame) raises, plus
    /// [`DecodeError::MissingTerminator`] when the input runs out early
    /// and [`DecodeError::TrailingData`] when bytes follow the terminator.
    pub fn decode_to_vec(&self, stream: &[u8]) -> Result<Vec<u8>, DecodeError> {
        let mut out = Vec::new();
        let mut cursor = 0usize;

        loop {
            if cursor == stream.len() {
                return Err(DecodeError::MissingTerminator);
            }
            match Frame::read_from(&stream[cursor..])? {
                Some((frame, consumed)) => {
                    let block = self.decode_frame(&frame)?;
                    out.extend_from_slice(&block);
                    cursor += consumed;
                }
                None => {
                    cursor += HEADER_LEN;
                    break;
                }
            }
        }

        let trailing = stream.len() - cursor;
        if trailing > 0 {
            return Err(DecodeError::TrailingData(trailing));
        }
        Ok(out)
    }

    /// Shared frame-body decode for the slice and streaming paths. The
    /// header has already passed [`check_header`](crate::frame::check_header).
    pub(crate) fn decode_block(
        &self,
        header: &FrameHeader,
        payload: &[u8],
    ) -> Result<Vec<u8>, DecodeError> {
        let method = header.token.method()?;
        if method == BlockMethod::EndOfStream {
            return Ok(Vec::new());
        }

        let declared = header.decompressed_len as usize;
        if payload.len() != header.compressed_len as usize {
            return Err(DecodeError::PayloadLengthMismatch {
                declared: header.compressed_len as usize,
                actual: payload.len(),
            });
        }

        let block = if method == BlockMethod::Raw {
            payload.to_vec()
        } else {
            decompression::decompress_block(payload, declared)?
        };

        if let Some(seed) = self.checksum_seed {
            let computed = xxh32(&block, seed);
            if computed != header.checksum {
                return Err(DecodeError::ChecksumMismatch {
                    stored: header.checksum,
                    computed,
                });
            }
        }
        Ok(block)
    }
}

impl Default for BlockDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lzbs_encoder::{EncoderConfig, StreamEncoder};
    use lzbs_wire::token::BlockToken;

    fn encode(config: EncoderConfig, data: &[u8]) -> Vec<u8> {
        let mut encoder = StreamEncoder::with_config(config, Vec::new()).unwrap();
        encoder.write(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn decodes_a_multi_block_stream() {
        let config = EncoderConfig {
            block_size: 64,
            ..EncoderConfig::default()
        };
        let data = b"Across several blocks and a partial tail. ".repeat(12);
        let stream = encode(config, &data);
        let decoded = BlockDecoder::new().decode_to_vec(&stream).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn empty_stream_decodes_to_nothing() {
        let mut encoder = StreamEncoder::new(Vec::new());
        encoder.close().unwrap();
        let stream = encoder.into_inner();
        let decoded = BlockDecoder::new().decode_to_vec(&stream).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn corrupted_payload_byte_fails_the_checksum() {
        let config = EncoderConfig {
            block_size: 64,
            ..EncoderConfig::default()
        };
        // Short writes stay RAW, so flipping a payload byte leaves the
        // frame structurally valid and only the checksum can catch it.
        let mut stream = encode(config, b"integrity matters");
        stream[HEADER_LEN + 2] ^= 0x01;
        let result = BlockDecoder::new().decode_to_vec(&stream);
        assert!(matches!(result, Err(DecodeError::ChecksumMismatch { .. })));
    }

    #[test]
    fn seed_mismatch_is_a_checksum_error() {
        let config = EncoderConfig {
            block_size: 64,
            checksum_seed: None,
            ..EncoderConfig::default()
        };
        let stream = encode(config, b"no checksum on this stream");

        // Stored field is 0; a seeded decoder computes a real hash.
        let result = BlockDecoder::new().decode_to_vec(&stream);
        assert!(matches!(result, Err(DecodeError::ChecksumMismatch { .. })));

        // The matching configuration decodes fine.
        let decoded = BlockDecoder::with_checksum_seed(None)
            .decode_to_vec(&stream)
            .unwrap();
        assert_eq!(decoded, b"no checksum on this stream");
    }

    #[test]
    fn missing_terminator_is_reported() {
        let stream = encode(EncoderConfig::default(), b"cut short");
        let truncated = &stream[..stream.len() - HEADER_LEN];
        let result = BlockDecoder::new().decode_to_vec(truncated);
        assert!(matches!(result, Err(DecodeError::MissingTerminator)));
    }

    #[test]
    fn trailing_bytes_are_reported() {
        let mut stream = encode(EncoderConfig::default(), b"tidy stream");
        stream.extend_from_slice(b"junk");
        let result = BlockDecoder::new().decode_to_vec(&stream);
        assert!(matches!(result, Err(DecodeError::TrailingData(4))));
    }

    #[test]
    fn decode_frame_rejects_inconsistent_payload() {
        let header = FrameHeader {
            token: BlockToken::new(BlockMethod::Raw, 0),
            compressed_len: 9,
            decompressed_len: 9,
            checksum: 0,
        };
        let frame = Frame {
            header,
            payload: b"short".to_vec(),
        };
        let result = BlockDecoder::with_checksum_seed(None).decode_frame(&frame);
        assert!(matches!(
            result,
            Err(DecodeError::PayloadLengthMismatch {
                declared: 9,
                actual: 5
            })
        ));
    }
}
