use lzbs_wire::header::HEADER_LEN;

use crate::compression::worst_case_compressed_len;
use crate::error::EncodeError;

/// Computes safe worst-case capacities for encode calls and enforces the
/// configured ceiling — always *before* any buffer is allocated.
///
/// Capacities are worst-case by construction: the estimate assumes every
/// block expands to the LZ4 bound, so validating the estimate (rather than
/// an actual compressed size) guarantees an input whose readable size
/// alone already exceeds the ceiling fails fast, before compression is
/// even attempted.
#[derive(Clone, Copy, Debug)]
pub struct OutputSizer {
    block_size: usize,
    max_encoded_size: usize,
}

impl OutputSizer {
    #[must_use]
    pub fn new(block_size: usize, max_encoded_size: usize) -> Self {
        Self {
            block_size,
            max_encoded_size,
        }
    }

    /// Exact worst-case byte count for framing `input_len` bytes: every
    /// complete block plus the tail, each at the LZ4 expansion bound plus
    /// one header. For `input_len <= block_size` this is exactly
    /// `HEADER_LEN + bound(input_len)`, the largest possible single frame.
    ///
    /// Computed in closed form with checked arithmetic, so pathological
    /// lengths cost neither time nor memory.
    ///
    /// # Errors
    ///
    /// [`EncodeError::SizeOverflow`] when any intermediate sum or product
    /// leaves the integer range.
    pub fn required_capacity(&self, input_len: usize) -> Result<usize, EncodeError> {
        let full_blocks = input_len / self.block_size;
        let tail = input_len % self.block_size;

        let mut total = full_blocks
            .checked_mul(Self::frame_bound(self.block_size)?)
            .ok_or(EncodeError::SizeOverflow)?;
        if tail > 0 {
            total = total
                .checked_add(Self::frame_bound(tail)?)
                .ok_or(EncodeError::SizeOverflow)?;
        }
        Ok(total)
    }

    /// Fail with [`EncodeError::MaxEncodedSizeExceeded`] whenever
    /// `required` is over the ceiling. Callers run this before allocating
    /// anything, so an over-limit request never stalls a constrained
    /// environment with a doomed allocation.
    pub fn validate(&self, required: usize) -> Result<(), EncodeError> {
        if required > self.max_encoded_size {
            return Err(EncodeError::MaxEncodedSizeExceeded {
                required,
                max: self.max_encoded_size,
            });
        }
        Ok(())
    }

    /// Destination buffer for one encode call over `input_len` pending +
    /// incoming bytes.
    ///
    /// When the worst case cannot reach one block — the call cannot
    /// complete a block, so no frame will be emitted — the destination is
    /// a valid empty buffer rather than an error; callers must tolerate
    /// it. Otherwise the buffer holds any single frame without growing
    /// (frames are emitted one at a time, the buffer is reused between
    /// them).
    ///
    /// # Errors
    ///
    /// Size-limit and overflow failures from
    /// [`required_capacity`](Self::required_capacity) and
    /// [`validate`](Self::validate), raised before any allocation.
    pub fn destination_for(&self, input_len: usize) -> Result<Vec<u8>, EncodeError> {
        let required = self.required_capacity(input_len)?;
        self.validate(required)?;
        if required < self.block_size {
            return Ok(Vec::new());
        }
        Ok(Vec::with_capacity(Self::frame_bound(self.block_size)?))
    }

    fn frame_bound(len: usize) -> Result<usize, EncodeError> {
        worst_case_compressed_len(len)
            .and_then(|payload| payload.checked_add(HEADER_LEN))
            .ok_or(EncodeError::SizeOverflow)
    }
}
