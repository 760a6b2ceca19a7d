use lzbs_wire::WireError;

/// Errors that can occur while encoding a frame stream.
///
/// Configuration problems surface at construction; size-limit and overflow
/// failures surface from `write`/`flush` *before* anything is appended or
/// emitted, so the pending buffer is untouched and the caller can retry
/// with a smaller write or abandon the stream.
///
/// Error hierarchy:
///
/// ```text
///   EncodeError
///   ├── InvalidBlockSize       ← construction: block size out of range
///   ├── InvalidMaxEncodedSize  ← construction: zero size ceiling
///   ├── MaxEncodedSizeExceeded ← worst case of this call over the ceiling
///   ├── SizeOverflow           ← capacity arithmetic left integer range
///   ├── Compression            ← LZ4 primitive failure (fatal)
///   ├── Closed                 ← write/flush after close()
///   ├── Wire(WireError)        ← from lzbs-wire header serialization
///   └── Io(std::io::Error)     ← from the downstream sink
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    /// The configured block size is outside the supported range.
    #[error("block size {requested} outside supported range {min}-{max}")]
    InvalidBlockSize {
        requested: usize,
        min: usize,
        max: usize,
    },

    /// The configured encoded-size ceiling is zero.
    #[error("max encoded size must be positive")]
    InvalidMaxEncodedSize,

    /// The worst-case encoded size of the current call exceeds the
    /// configured ceiling. Checked before allocation; the pending buffer
    /// is left unchanged.
    #[error(
        "worst-case encode capacity ({required} bytes) exceeds the configured maximum ({max} bytes)"
    )]
    MaxEncodedSizeExceeded { required: usize, max: usize },

    /// Worst-case capacity arithmetic would overflow the platform integer
    /// range. Treated exactly like the ceiling being exceeded: fail closed.
    #[error("worst-case encode capacity overflows the platform integer range")]
    SizeOverflow,

    /// The LZ4 primitive rejected a block. Never downgraded to a RAW
    /// frame — only the deliberate size-based fallback may do that.
    #[error("block compression failed")]
    Compression(#[source] std::io::Error),

    /// `write` or `flush` was called after `close()`.
    #[error("encoder is closed")]
    Closed,

    /// Frame header serialization failed.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// The downstream sink failed to accept an emitted frame.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
