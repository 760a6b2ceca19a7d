use std::io::Write;

use lzbs_wire::header::{DEFAULT_SEED, HEADER_LEN};
use lzbs_wire::token::{DEFAULT_BLOCK_SIZE, MAX_BLOCK_SIZE, MIN_BLOCK_SIZE};

use crate::accumulator::BlockAccumulator;
use crate::error::EncodeError;
use crate::frame_builder::FrameBuilder;
use crate::sizing::OutputSizer;

/// Default ceiling on the worst-case encoded size of a single call.
pub const DEFAULT_MAX_ENCODED_SIZE: usize = i32::MAX as usize;

/// Stream-wide encoder settings, immutable once the encoder is built.
#[derive(Clone, Copy, Debug)]
pub struct EncoderConfig {
    /// Bytes accumulated before a frame is emitted automatically.
    /// Valid range: 64 bytes to 32 MiB (the header token encodes the block
    /// size as a 4-bit level).
    pub block_size: usize,

    /// Trade encode latency for smaller output via the LZ4
    /// high-compression entry point.
    pub high_compression: bool,

    /// `Some(seed)` stamps every frame with `XXHash32(block, seed)`;
    /// `None` disables checksums and the wire field carries 0.
    pub checksum_seed: Option<u32>,

    /// Hard ceiling on the worst-case encoded size of any single
    /// `write`/`flush` call. Calls whose estimate exceeds it fail without
    /// touching the pending buffer.
    pub max_encoded_size: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            high_compression: false,
            checksum_seed: Some(DEFAULT_SEED),
            max_encoded_size: DEFAULT_MAX_ENCODED_SIZE,
        }
    }
}

impl EncoderConfig {
    fn validate(&self) -> Result<(), EncodeError> {
        if self.block_size < MIN_BLOCK_SIZE || self.block_size > MAX_BLOCK_SIZE {
            return Err(EncodeError::InvalidBlockSize {
                requested: self.block_size,
                min: MIN_BLOCK_SIZE,
                max: MAX_BLOCK_SIZE,
            });
        }
        if self.max_encoded_size == 0 {
            return Err(EncodeError::InvalidMaxEncodedSize);
        }
        Ok(())
    }
}

/// Streaming frame encoder — accumulates writes into fixed-size blocks and
/// pushes one self-describing frame into the sink per completed block.
///
/// The encoder is the sole owner of the pipeline: writes land in the
/// [`BlockAccumulator`], the [`OutputSizer`] vets the worst case of every
/// call before anything is appended or allocated, and the [`FrameBuilder`]
/// turns each drained block into wire bytes that are handed to the sink
/// with a single `write_all`, in block-completion order.
///
/// State machine:
///
/// ```text
///   Idle ──write──▶ Accumulating ──block full / flush──▶ Flushing
///    ▲                                                       │
///    └────────────────── remainder drained ──────────────────┘
///
///   close() from any state ──▶ Closed (terminal)
/// ```
///
/// `Idle` and `Accumulating` are distinguished by [`pending_len`]
/// (`pending_len == 0` is `Idle`); `Flushing` only exists inside a call —
/// every operation returns with the drain complete. `Closed` is tracked
/// explicitly and is terminal: further writes fail, further `close` calls
/// are no-ops.
///
/// One encoder instance serves exactly one stream and expects one logical
/// caller; it takes no locks and never blocks beyond the synchronous sink
/// hand-off.
///
/// # Example
///
/// ```rust
/// use lzbs_encoder::StreamEncoder;
///
/// let mut encoder = StreamEncoder::new(Vec::new());
/// encoder.write(b"some bytes worth framing").unwrap();
/// encoder.close().unwrap();
///
/// let stream = encoder.into_inner();
/// assert!(!stream.is_empty());
/// ```
///
/// [`pending_len`]: Self::pending_len
pub struct StreamEncoder<W: Write> {
    config: EncoderConfig,
    accumulator: BlockAccumulator,
    sizer: OutputSizer,
    builder: FrameBuilder,
    sink: W,
    closed: bool,
    frames_emitted: u64,
    bytes_written: u64,
}

impl<W: Write> StreamEncoder<W> {
    /// Encoder with the default configuration (64 KiB blocks, fast mode,
    /// checksums on).
    pub fn new(sink: W) -> Self {
        Self::with_config(EncoderConfig::default(), sink)
            .expect("default encoder configuration is valid")
    }

    /// Encoder with an explicit configuration.
    ///
    /// # Errors
    ///
    /// [`EncodeError::InvalidBlockSize`] or
    /// [`EncodeError::InvalidMaxEncodedSize`] when the configuration is
    /// rejected; the stream never starts.
    pub fn with_config(config: EncoderConfig, sink: W) -> Result<Self, EncodeError> {
        config.validate()?;
        Ok(Self {
            accumulator: BlockAccumulator::new(config.block_size),
            sizer: OutputSizer::new(config.block_size, config.max_encoded_size),
            builder: FrameBuilder::new(
                config.block_size,
                config.high_compression,
                config.checksum_seed,
            ),
            sink,
            closed: false,
            frames_emitted: 0,
            bytes_written: 0,
            config,
        })
    }

    // ── Stream operations ───────────────────────────────────────────────

    /// Append `bytes` to the stream, emitting one frame for every block
    /// this call completes, in arrival order.
    ///
    /// The worst-case encoded size of pending + incoming bytes is
    /// validated first; a size failure leaves the pending buffer exactly
    /// as it was, so a subsequent smaller write can still succeed.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::Closed`] after `close()`.
    /// - [`EncodeError::MaxEncodedSizeExceeded`] /
    ///   [`EncodeError::SizeOverflow`] from the pre-call size check
    ///   (state unchanged).
    /// - [`EncodeError::Compression`] / [`EncodeError::Io`] while emitting
    ///   (fatal; abandon the stream).
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        if self.closed {
            return Err(EncodeError::Closed);
        }
        if bytes.is_empty() {
            return Ok(());
        }

        let total = self
            .accumulator
            .pending_len()
            .checked_add(bytes.len())
            .ok_or(EncodeError::SizeOverflow)?;
        let mut dest = self.sizer.destination_for(total)?;

        self.accumulator.append(bytes);
        while let Some(block) = self.accumulator.next_complete_block() {
            self.emit_frame(&block, &mut dest)?;
        }
        Ok(())
    }

    /// Emit a frame for any buffered remainder, even one shorter than a
    /// block, then flush the sink. The stream stays open: later writes
    /// accumulate into a fresh block. Flushing an empty buffer emits
    /// nothing and succeeds.
    ///
    /// # Errors
    ///
    /// As for [`write`](Self::write).
    pub fn flush(&mut self) -> Result<(), EncodeError> {
        if self.closed {
            return Err(EncodeError::Closed);
        }
        self.flush_remainder()?;
        self.sink.flush()?;
        Ok(())
    }

    /// Drain any remainder, emit the end-of-stream terminator, and close
    /// the encoder, releasing the pending buffer.
    ///
    /// Idempotent: closing a closed encoder is a no-op success. After a
    /// successful close, `write` and `flush` fail with
    /// [`EncodeError::Closed`].
    ///
    /// # Errors
    ///
    /// As for [`write`](Self::write); on error the encoder stays open.
    pub fn close(&mut self) -> Result<(), EncodeError> {
        if self.closed {
            return Ok(());
        }
        self.flush_remainder()?;

        let mut dest = Vec::with_capacity(HEADER_LEN);
        self.builder.end_of_stream_into(&mut dest)?;
        self.sink.write_all(&dest)?;
        self.frames_emitted += 1;
        self.bytes_written += dest.len() as u64;
        self.sink.flush()?;

        self.closed = true;
        self.accumulator.release();
        Ok(())
    }

    /// Close the stream and hand back the sink.
    ///
    /// # Errors
    ///
    /// As for [`close`](Self::close).
    pub fn finish(mut self) -> Result<W, EncodeError> {
        self.close()?;
        Ok(self.sink)
    }

    // ── Observers ───────────────────────────────────────────────────────

    /// Bytes accumulated but not yet framed. Always less than the block
    /// size between calls.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.accumulator.pending_len()
    }

    /// True once `close()` has completed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of frames pushed into the sink so far, terminator included.
    #[must_use]
    pub fn frames_emitted(&self) -> u64 {
        self.frames_emitted
    }

    /// Total frame bytes pushed into the sink so far.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// The configuration this encoder was built with.
    #[must_use]
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Immutable access to the underlying sink.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Mutable access to the underlying sink.
    #[must_use]
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.sink
    }

    /// Consume the encoder and return the sink without closing the stream.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.sink
    }

    // ── Internal helpers ────────────────────────────────────────────────

    /// Emit one frame for any pending remainder. Validates the worst case
    /// before draining, so a size failure leaves the buffer untouched.
    fn flush_remainder(&mut self) -> Result<(), EncodeError> {
        let pending = self.accumulator.pending_len();
        if pending == 0 {
            return Ok(());
        }
        let required = self.sizer.required_capacity(pending)?;
        self.sizer.validate(required)?;

        let mut dest = Vec::with_capacity(required);
        let block = self.accumulator.drain_remainder();
        self.emit_frame(&block, &mut dest)
    }

    /// Build `block`'s frame into `dest` (cleared first) and push it into
    /// the sink as one write.
    fn emit_frame(&mut self, block: &[u8], dest: &mut Vec<u8>) -> Result<(), EncodeError> {
        dest.clear();
        self.builder.build_into(block, dest)?;
        self.sink.write_all(dest)?;
        self.frames_emitted += 1;
        self.bytes_written += dest.len() as u64;
        Ok(())
    }
}

/// Adapter so the encoder slots into `std::io::copy` and friends. `write`
/// consumes the whole buffer; `flush` forces a frame for any remainder.
impl<W: Write> Write for StreamEncoder<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        StreamEncoder::write(self, buf).map_err(std::io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        StreamEncoder::flush(self).map_err(std::io::Error::other)
    }
}
