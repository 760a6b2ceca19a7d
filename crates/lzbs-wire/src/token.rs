use crate::error::WireError;

/// Exponent base for the token's level nibble: a level of `n` bounds the
/// block size at `1 << (n + COMPRESSION_LEVEL_BASE)` bytes.
pub const COMPRESSION_LEVEL_BASE: u32 = 10;

/// Smallest permitted block size in bytes.
pub const MIN_BLOCK_SIZE: usize = 64;

/// Largest permitted block size in bytes (32 MiB) — the biggest bound the
/// 4-bit level nibble can describe.
pub const MAX_BLOCK_SIZE: usize = 1 << (COMPRESSION_LEVEL_BASE + 0x0F);

/// Default block size (64 KiB).
pub const DEFAULT_BLOCK_SIZE: usize = 1 << 16;

/// Payload representation carried by a frame.
///
/// The discriminants are the wire values of the token's method nibble.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum BlockMethod {
    /// Payload is the original block, stored verbatim.
    Raw = 0x10,
    /// Payload is the LZ4 block compression of the original block.
    Compressed = 0x20,
    /// Terminator frame: no payload, both lengths zero.
    EndOfStream = 0x30,
}

impl BlockMethod {
    /// The method nibble as it appears in the token byte.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Token byte — the header field packing the payload representation and
/// the block-size level.
///
/// Bit layout:
///   bits 4-7 = method nibble (0x1 RAW, 0x2 COMPRESSED, 0x3 END_OF_STREAM)
///   bits 0-3 = level: the block size is at most `1 << (level + 10)` bytes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockToken(u8);

impl BlockToken {
    /// Assemble a token from a method and a level nibble.
    #[must_use]
    pub const fn new(method: BlockMethod, level: u8) -> Self {
        Self(method.bits() | (level & 0x0F))
    }

    /// Wrap a raw token byte read off the wire. No validation happens here;
    /// [`method`](Self::method) reports unknown nibbles.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// The underlying byte value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Decode the method nibble.
    ///
    /// # Errors
    ///
    /// [`WireError::UnknownMethod`] for any nibble outside the three
    /// defined representations.
    pub const fn method(self) -> Result<BlockMethod, WireError> {
        match self.0 & 0xF0 {
            0x10 => Ok(BlockMethod::Raw),
            0x20 => Ok(BlockMethod::Compressed),
            0x30 => Ok(BlockMethod::EndOfStream),
            _ => Err(WireError::UnknownMethod { token: self.0 }),
        }
    }

    /// The level nibble.
    #[must_use]
    pub const fn level(self) -> u8 {
        self.0 & 0x0F
    }

    /// Upper bound on the decompressed length of any block carried under
    /// this token. Decoders reject frames that declare more.
    #[must_use]
    pub const fn max_decompressed_len(self) -> usize {
        1 << (self.level() as u32 + COMPRESSION_LEVEL_BASE)
    }
}

/// Smallest level nibble whose bound covers `block_size`.
///
/// `level_for_block_size(64 * 1024) == 6` because `1 << (6 + 10)` is 64 KiB.
/// Callers are expected to keep `block_size` within
/// [`MIN_BLOCK_SIZE`]..=[`MAX_BLOCK_SIZE`]; sizes below 1 KiB clamp to
/// level 0.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn level_for_block_size(block_size: usize) -> u8 {
    let bits = usize::BITS - block_size.saturating_sub(1).leading_zeros();
    bits.saturating_sub(COMPRESSION_LEVEL_BASE) as u8
}
