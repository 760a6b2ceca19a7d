use crate::error::WireError;
use crate::token::BlockToken;

// The magic is stored as raw bytes rather than a u64 so byte order never
// enters the picture — it is always these 8 bytes in this order.

/// Magic marker opening every frame: ASCII `"LZ4Block"`.
pub const MAGIC: [u8; 8] = *b"LZ4Block";

/// Total frame header size in bytes (fixed).
pub const HEADER_LEN: usize = 21;

/// Conventional XXHash32 seed for this format.
pub const DEFAULT_SEED: u32 = 0x9747_B28C;

/// Frame header — the first 21 bytes of every frame.
///
/// ```text
/// ┌────────┬─────────┬──────────────────────────────────────────┐
/// │ Offset │ Size    │ Description                              │
/// ├────────┼─────────┼──────────────────────────────────────────┤
/// │ 0x00   │ 8 bytes │ Magic: "LZ4Block"                        │
/// │ 0x08   │ 1 byte  │ Token: method nibble | level nibble      │
/// │ 0x09   │ 4 bytes │ Compressed payload length (u32 LE)       │
/// │ 0x0D   │ 4 bytes │ Decompressed payload length (u32 LE)     │
/// │ 0x11   │ 4 bytes │ XXHash32 of the decompressed bytes       │
/// │        │         │ (u32 LE), 0 when checksums are disabled  │
/// └────────┴─────────┴──────────────────────────────────────────┘
/// ```
///
/// The payload (`compressed_len` bytes) follows immediately after the
/// header; the terminator frame has both lengths and the checksum at 0 and
/// carries no payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHeader {
    pub token: BlockToken,
    pub compressed_len: u32,
    pub decompressed_len: u32,
    pub checksum: u32,
}

impl FrameHeader {
    /// Write the 21-byte header into the provided buffer.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if `buf` is shorter than
    /// [`HEADER_LEN`].
    pub fn write_to(&self, buf: &mut [u8]) -> Result<(), WireError> {
        if buf.len() < HEADER_LEN {
            return Err(WireError::UnexpectedEof { offset: buf.len() });
        }

        buf[0..8].copy_from_slice(&MAGIC);
        buf[8] = self.token.raw();
        buf[9..13].copy_from_slice(&self.compressed_len.to_le_bytes());
        buf[13..17].copy_from_slice(&self.decompressed_len.to_le_bytes());
        buf[17..21].copy_from_slice(&self.checksum.to_le_bytes());

        Ok(())
    }

    /// Parse a header from the first 21 bytes of the provided buffer.
    ///
    /// The validation order gives the most useful error for each failure:
    /// length first (is there a header at all?), then magic (is this a
    /// frame?), then the token's method nibble (is it one we understand?).
    ///
    /// # Errors
    ///
    /// - [`WireError::UnexpectedEof`] if the buffer is too short.
    /// - [`WireError::InvalidMagic`] if the marker doesn't match.
    /// - [`WireError::UnknownMethod`] if the method nibble is undefined.
    pub fn read_from(buf: &[u8]) -> Result<Self, WireError> {
        if buf.len() < HEADER_LEN {
            return Err(WireError::UnexpectedEof { offset: buf.len() });
        }

        if buf[0..8] != MAGIC {
            let mut found = [0u8; 8];
            found.copy_from_slice(&buf[0..8]);
            return Err(WireError::InvalidMagic { found });
        }

        let token = BlockToken::from_raw(buf[8]);
        token.method()?;

        let compressed_len = u32::from_le_bytes([buf[9], buf[10], buf[11], buf[12]]);
        let decompressed_len = u32::from_le_bytes([buf[13], buf[14], buf[15], buf[16]]);
        let checksum = u32::from_le_bytes([buf[17], buf[18], buf[19], buf[20]]);

        Ok(Self {
            token,
            compressed_len,
            decompressed_len,
            checksum,
        })
    }
}
