use lzbs_wire::WireError;

/// Errors that can occur while decoding a frame stream.
///
/// The decoder validates at several levels: header structure, per-frame
/// length consistency, declared-size limits, LZ4 decompression, checksum
/// integrity, and stream termination. Each variant carries enough context
/// for a useful diagnostic; nothing is skipped silently.
///
/// Error hierarchy:
///
/// ```text
///   DecodeError
///   ├── RawLengthMismatch          ← RAW frame with unequal lengths
///   ├── PayloadLengthMismatch      ← payload shorter/longer than declared
///   ├── BlockTooLarge              ← declared length over the token bound
///   ├── InvalidTerminator          ← end-of-stream frame with a length
///   ├── Decompress                 ← LZ4 primitive failure
///   ├── DecompressedLengthMismatch ← output differs from declared length
///   ├── ChecksumMismatch           ← stored and computed XXHash32 differ
///   ├── MissingTerminator          ← stream ends without the terminator
///   ├── TrailingData               ← bytes after the terminator
///   ├── Wire(WireError)            ← from lzbs-wire header parsing
///   └── Io(std::io::Error)         ← from the underlying reader
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A RAW frame must store the block verbatim, so both header lengths
    /// have to agree.
    #[error("raw frame lengths disagree (compressed {compressed}, decompressed {decompressed})")]
    RawLengthMismatch { compressed: u32, decompressed: u32 },

    /// The supplied payload does not have the length the header declares.
    #[error("payload is {actual} bytes but the header declares {declared}")]
    PayloadLengthMismatch { declared: usize, actual: usize },

    /// The declared decompressed length exceeds what the token's level
    /// nibble allows. Rejecting this up front keeps a corrupt or hostile
    /// header from driving a huge allocation.
    #[error("declared decompressed length {declared} exceeds the {limit}-byte block limit")]
    BlockTooLarge { declared: usize, limit: usize },

    /// An end-of-stream frame must carry zero lengths and no payload.
    #[error(
        "end-of-stream frame carries non-zero lengths (compressed {compressed}, decompressed {decompressed})"
    )]
    InvalidTerminator { compressed: u32, decompressed: u32 },

    /// LZ4 could not decode a COMPRESSED payload. Common causes:
    /// truncated input, corrupt payload bytes, or a frame produced with a
    /// different framing.
    #[error("block decompression failed")]
    Decompress(#[source] std::io::Error),

    /// Decompression succeeded but produced the wrong number of bytes.
    #[error("decompressed {actual} bytes, header declares {declared}")]
    DecompressedLengthMismatch { declared: usize, actual: usize },

    /// The stored XXHash32 does not match the decompressed block. Also
    /// raised when decoder and stream disagree about whether checksums
    /// are in use.
    #[error("block checksum mismatch (stored {stored:#010X}, computed {computed:#010X})")]
    ChecksumMismatch { stored: u32, computed: u32 },

    /// The stream ended without an end-of-stream frame, so it is
    /// considered truncated.
    #[error("stream ended without an end-of-stream frame")]
    MissingTerminator,

    /// Bytes found after the end-of-stream frame.
    #[error("{0} trailing bytes after the end-of-stream frame")]
    TrailingData(usize),

    /// A header-level framing error.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// An I/O error from the underlying reader (streaming decoder).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
