use lzbs_wire::header::{FrameHeader, HEADER_LEN};
use lzbs_wire::token::BlockMethod;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::decoder::BlockDecoder;
use crate::error::DecodeError;
use crate::frame::check_header;

/// Asynchronous streaming decoder — yields one decompressed block per
/// frame without buffering the whole stream.
///
/// This is the API for large streams and network sources. Backpressure is
/// natural: the next frame is only read when the caller awaits the next
/// block. Unlike the synchronous [`BlockDecoder`], which wants the entire
/// stream in memory, `StreamingDecoder` reads incrementally from any
/// [`AsyncRead`] source (files, TCP sockets, response bodies).
///
/// Internal state machine:
///
/// ```text
///   ReadFrames ──terminator──▶ Done
/// ```
///
/// The decoder stops at the terminator and does not inspect the reader
/// beyond it, so several streams can be carried back to back on one
/// connection.
///
/// # Example
///
/// ```rust,no_run
/// use lzbs_decoder::StreamingDecoder;
/// use tokio::io::AsyncRead;
///
/// async fn decode_from(reader: impl AsyncRead + Unpin) {
///     let mut stream = StreamingDecoder::new(reader);
///     while let Some(block) = stream.next().await.transpose().unwrap() {
///         // process one decompressed block...
///     }
/// }
/// ```
pub struct StreamingDecoder<R> {
    reader: R,
    decoder: BlockDecoder,
    state: StreamState,
    /// Reused payload buffer; resized per frame so one allocation serves
    /// the whole stream.
    buf: Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamState {
    ReadFrames,
    Done,
}

impl<R: AsyncRead + Unpin> StreamingDecoder<R> {
    /// Streaming decoder expecting the format's conventional checksum
    /// seed.
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::with_decoder(reader, BlockDecoder::new())
    }

    /// Streaming decoder with an explicit [`BlockDecoder`] (custom or
    /// disabled checksum seed).
    #[must_use]
    pub fn with_decoder(reader: R, decoder: BlockDecoder) -> Self {
        Self {
            reader,
            decoder,
            state: StreamState::ReadFrames,
            buf: Vec::new(),
        }
    }

    /// Read and decode the next frame.
    ///
    /// Returns `Ok(Some(block))` per data frame, `None` once the
    /// terminator has been consumed, or the first error encountered. A
    /// reader that ends cleanly before the terminator yields
    /// [`DecodeError::MissingTerminator`].
    pub async fn next(&mut self) -> Option<Result<Vec<u8>, DecodeError>> {
        match self.state {
            StreamState::ReadFrames => self.read_next_block().await,
            StreamState::Done => None,
        }
    }

    /// Consume the decoder and return the wrapped reader.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.reader
    }

    async fn read_next_block(&mut self) -> Option<Result<Vec<u8>, DecodeError>> {
        let mut head = [0u8; HEADER_LEN];
        if let Err(e) = self.reader.read_exact(&mut head).await {
            let err = if e.kind() == std::io::ErrorKind::UnexpectedEof {
                DecodeError::MissingTerminator
            } else {
                DecodeError::Io(e)
            };
            return Some(Err(err));
        }

        let header = match FrameHeader::read_from(&head) {
            Ok(header) => header,
            Err(e) => return Some(Err(e.into())),
        };
        if let Err(e) = check_header(&header) {
            return Some(Err(e));
        }
        match header.token.method() {
            Ok(BlockMethod::EndOfStream) => {
                self.state = StreamState::Done;
                return None;
            }
            Ok(_) => {}
            Err(e) => return Some(Err(e.into())),
        }

        let payload_len = header.compressed_len as usize;
        self.buf.clear();
        self.buf.resize(payload_len, 0);
        if let Err(e) = self.reader.read_exact(&mut self.buf).await {
            return Some(Err(DecodeError::Io(e)));
        }

        Some(self.decoder.decode_block(&header, &self.buf))
    }
}
