use crate::error::DecodeError;

/// Decompress one LZ4 block payload whose decompressed size is declared by
/// the frame header. The caller has already bounded `declared_len` by the
/// token's level, so it always fits an `i32`.
pub(crate) fn decompress_block(payload: &[u8], declared_len: usize) -> Result<Vec<u8>, DecodeError> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let expected = declared_len as i32;
    let block = lz4::block::decompress(payload, Some(expected)).map_err(DecodeError::Decompress)?;
    if block.len() != declared_len {
        return Err(DecodeError::DecompressedLengthMismatch {
            declared: declared_len,
            actual: block.len(),
        });
    }
    Ok(block)
}
