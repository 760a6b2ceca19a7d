use lz4::block::CompressionMode;

use crate::error::EncodeError;

/// Level handed to the LZ4 high-compression entry point. 9 is the
/// reference default for the HC codec; raising it buys little on block
/// sizes this small.
const HIGH_COMPRESSION_LEVEL: i32 = 9;

/// Compress one block with the configured mode.
///
/// The output carries no length prefix — the frame header records both
/// lengths. Failures are fatal to the current encode call; the caller must
/// not fall back to a RAW frame for them.
pub(crate) fn compress_block(block: &[u8], high_compression: bool) -> Result<Vec<u8>, EncodeError> {
    let mode = if high_compression {
        CompressionMode::HIGHCOMPRESSION(HIGH_COMPRESSION_LEVEL)
    } else {
        CompressionMode::DEFAULT
    };
    lz4::block::compress(block, Some(mode), false).map_err(EncodeError::Compression)
}

/// Worst-case LZ4 output size for `len` input bytes: `len + len/255 + 16`.
///
/// Kept as the single named bound so sizing stays a policy in one place.
/// `None` when the sum leaves the integer range.
pub(crate) fn worst_case_compressed_len(len: usize) -> Option<usize> {
    len.checked_add(len / 255)?.checked_add(16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_matches_formula() {
        assert_eq!(worst_case_compressed_len(0), Some(16));
        assert_eq!(worst_case_compressed_len(100), Some(116));
        assert_eq!(worst_case_compressed_len(255), Some(272));
        assert_eq!(worst_case_compressed_len(65_536), Some(65_809));
    }

    #[test]
    fn bound_detects_overflow() {
        assert_eq!(worst_case_compressed_len(usize::MAX), None);
        assert_eq!(worst_case_compressed_len(usize::MAX - 20), None);
    }

    #[test]
    fn compress_roundtrips_both_modes() {
        let block = b"repeat repeat repeat repeat repeat repeat repeat".repeat(8);
        for high in [false, true] {
            let compressed = compress_block(&block, high).unwrap();
            assert!(compressed.len() < block.len());
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let restored =
                lz4::block::decompress(&compressed, Some(block.len() as i32)).unwrap();
            assert_eq!(restored, block);
        }
    }
}
