use bytes::{Bytes, BytesMut};

/// The pending-bytes buffer: collects writes of arbitrary size and hands
/// back complete blocks in arrival order.
///
/// The buffer is owned exclusively by the encoder and is never exposed by
/// reference — drains return frozen [`Bytes`] views split off the front,
/// so callers only ever observe immutable block copies. After any sequence
/// of [`next_complete_block`](Self::next_complete_block) calls that ends in
/// `None`, fewer than `block_size` bytes remain pending.
#[derive(Debug)]
pub struct BlockAccumulator {
    buf: BytesMut,
    block_size: usize,
}

impl BlockAccumulator {
    #[must_use]
    pub fn new(block_size: usize) -> Self {
        debug_assert!(block_size > 0);
        Self {
            buf: BytesMut::with_capacity(block_size),
            block_size,
        }
    }

    /// Append `bytes` in arrival order. Nothing is reordered or dropped.
    pub fn append(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Pop the oldest complete block, or `None` while fewer than
    /// `block_size` bytes are pending. Draining in a `while let` loop
    /// removes every complete block and leaves only the remainder; once it
    /// returns `None` it keeps returning `None` until more bytes arrive.
    pub fn next_complete_block(&mut self) -> Option<Bytes> {
        if self.buf.len() >= self.block_size {
            Some(self.buf.split_to(self.block_size).freeze())
        } else {
            None
        }
    }

    /// Remove and return everything pending, whatever its size. Used by
    /// flush and close; the result is empty when nothing is pending.
    pub fn drain_remainder(&mut self) -> Bytes {
        self.buf.split().freeze()
    }

    /// Number of bytes accumulated but not yet drained.
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.buf.len()
    }

    /// Drop the backing allocation. Called once on close.
    pub(crate) fn release(&mut self) {
        self.buf = BytesMut::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_block_until_full() {
        let mut acc = BlockAccumulator::new(100);
        acc.append(&[7u8; 99]);
        assert_eq!(acc.pending_len(), 99);
        assert!(acc.next_complete_block().is_none());
        assert!(acc.next_complete_block().is_none());
    }

    #[test]
    fn block_completes_across_appends() {
        let mut acc = BlockAccumulator::new(100);
        acc.append(&[1u8; 99]);
        acc.append(&[2u8; 1]);
        let block = acc.next_complete_block().unwrap();
        assert_eq!(block.len(), 100);
        assert_eq!(block[98], 1);
        assert_eq!(block[99], 2);
        assert_eq!(acc.pending_len(), 0);
    }

    #[test]
    fn one_append_can_yield_multiple_blocks() {
        let mut acc = BlockAccumulator::new(64);
        let data: Vec<u8> = (0..200u8).collect();
        acc.append(&data);

        let first = acc.next_complete_block().unwrap();
        let second = acc.next_complete_block().unwrap();
        let third = acc.next_complete_block().unwrap();
        assert!(acc.next_complete_block().is_none());

        assert_eq!(&first[..], &data[..64]);
        assert_eq!(&second[..], &data[64..128]);
        assert_eq!(&third[..], &data[128..192]);
        assert_eq!(acc.pending_len(), 8);
    }

    #[test]
    fn drain_remainder_returns_leftovers() {
        let mut acc = BlockAccumulator::new(64);
        acc.append(&[9u8; 10]);
        let rest = acc.drain_remainder();
        assert_eq!(&rest[..], &[9u8; 10]);
        assert_eq!(acc.pending_len(), 0);
        assert!(acc.drain_remainder().is_empty());
    }

    #[test]
    fn remainder_preserved_after_block_drain() {
        let mut acc = BlockAccumulator::new(100);
        acc.append(&[0u8; 100]);
        acc.append(&[5u8; 42]);
        assert!(acc.next_complete_block().is_some());
        assert!(acc.next_complete_block().is_none());
        assert_eq!(acc.pending_len(), 42);
        assert_eq!(&acc.drain_remainder()[..], &[5u8; 42]);
    }
}
