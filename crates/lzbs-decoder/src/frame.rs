use lzbs_wire::header::{FrameHeader, HEADER_LEN};
use lzbs_wire::token::BlockMethod;

use crate::error::DecodeError;

/// One parsed frame: its header plus the payload bytes exactly as they
/// appear on the wire (still compressed for COMPRESSED frames).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub header: FrameHeader,
    pub payload: Vec<u8>,
}

impl Frame {
    /// Read one frame from the front of `buf`.
    ///
    /// # Returns
    ///
    /// `Some((frame, bytes_consumed))` for data frames, or `None` for the
    /// end-of-stream terminator, which consumes [`HEADER_LEN`] bytes and
    /// signals that the stream is done.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Wire`] for a short, mismarked, or unknown-method
    ///   header, and for payloads truncated mid-frame.
    /// - [`DecodeError::InvalidTerminator`], [`DecodeError::RawLengthMismatch`],
    ///   or [`DecodeError::BlockTooLarge`] for inconsistent headers.
    pub fn read_from(buf: &[u8]) -> Result<Option<(Self, usize)>, DecodeError> {
        let header = FrameHeader::read_from(buf)?;
        check_header(&header)?;

        if header.token.method()? == BlockMethod::EndOfStream {
            return Ok(None);
        }

        let payload_len = header.compressed_len as usize;
        let end = match HEADER_LEN.checked_add(payload_len) {
            Some(end) => end,
            None => {
                return Err(lzbs_wire::WireError::UnexpectedEof { offset: buf.len() }.into());
            }
        };
        if buf.len() < end {
            return Err(lzbs_wire::WireError::UnexpectedEof { offset: buf.len() }.into());
        }
        let payload = buf[HEADER_LEN..end].to_vec();

        Ok(Some((Self { header, payload }, end)))
    }
}

/// Semantic header checks shared by the slice and streaming readers:
/// terminators carry zero lengths, RAW lengths agree, and the declared
/// decompressed length stays under the token's level bound.
///
/// # Errors
///
/// [`DecodeError::InvalidTerminator`], [`DecodeError::RawLengthMismatch`],
/// or [`DecodeError::BlockTooLarge`]; [`DecodeError::Wire`] for an unknown
/// method nibble.
pub(crate) fn check_header(header: &FrameHeader) -> Result<(), DecodeError> {
    match header.token.method()? {
        BlockMethod::EndOfStream => {
            if header.compressed_len != 0 || header.decompressed_len != 0 {
                return Err(DecodeError::InvalidTerminator {
                    compressed: header.compressed_len,
                    decompressed: header.decompressed_len,
                });
            }
        }
        BlockMethod::Raw => {
            if header.compressed_len != header.decompressed_len {
                return Err(DecodeError::RawLengthMismatch {
                    compressed: header.compressed_len,
                    decompressed: header.decompressed_len,
                });
            }
        }
        BlockMethod::Compressed => {}
    }

    let declared = header.decompressed_len as usize;
    let limit = header.token.max_decompressed_len();
    if declared > limit {
        return Err(DecodeError::BlockTooLarge { declared, limit });
    }
    Ok(())
}
