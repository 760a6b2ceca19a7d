/// Errors raised while reading or writing frame headers.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// Input ended before a complete header or payload could be read.
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    /// The magic marker did not match `"LZ4Block"`.
    #[error("invalid magic: expected \"LZ4Block\", found {found:02X?}")]
    InvalidMagic { found: [u8; 8] },

    /// The token's method nibble is none of RAW, COMPRESSED, END_OF_STREAM.
    #[error("unknown method nibble in token {token:#04X}")]
    UnknownMethod { token: u8 },
}
