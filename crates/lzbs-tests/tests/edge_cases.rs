//! Edge-case tests for the encoder's observable contract: block-boundary
//! accumulation, remainder handling, flush behavior, sizing limits, and
//! stream termination.

use lzbs_decoder::{BlockDecoder, Frame};
use lzbs_encoder::sizing::OutputSizer;
use lzbs_encoder::{DEFAULT_MAX_ENCODED_SIZE, EncodeError, EncoderConfig, StreamEncoder};
use lzbs_tests::incompressible;
use lzbs_wire::header::HEADER_LEN;
use lzbs_wire::token::DEFAULT_BLOCK_SIZE;

fn encoder_with_block_size(block_size: usize) -> StreamEncoder<Vec<u8>> {
    let config = EncoderConfig {
        block_size,
        ..EncoderConfig::default()
    };
    StreamEncoder::with_config(config, Vec::new()).unwrap()
}

// ── Block-boundary accumulation ──────────────────────────────────────────────

#[test]
fn filling_a_block_exactly_emits_one_full_frame() {
    let mut encoder = encoder_with_block_size(100);
    encoder.write(&[0xAB; 99]).unwrap();
    encoder.write(&[0xAB; 1]).unwrap();
    assert_eq!(encoder.frames_emitted(), 1);
    assert_eq!(encoder.pending_len(), 0);

    let stream = encoder.finish().unwrap();
    let (frame, _) = Frame::read_from(&stream).unwrap().unwrap();
    assert_eq!(frame.header.decompressed_len, 100);
}

#[test]
fn remainders_survive_until_the_next_boundary_or_flush() {
    // write 99 → nothing; +1 → one 100-byte frame; +98 → nothing;
    // flush → one 98-byte frame.
    let mut encoder = encoder_with_block_size(100);

    encoder.write(&[1u8; 99]).unwrap();
    assert_eq!((encoder.frames_emitted(), encoder.pending_len()), (0, 99));

    encoder.write(&[1u8; 1]).unwrap();
    assert_eq!((encoder.frames_emitted(), encoder.pending_len()), (1, 0));

    encoder.write(&[2u8; 98]).unwrap();
    assert_eq!((encoder.frames_emitted(), encoder.pending_len()), (1, 98));

    encoder.flush().unwrap();
    assert_eq!((encoder.frames_emitted(), encoder.pending_len()), (2, 0));

    let stream = encoder.finish().unwrap();
    let (first, consumed) = Frame::read_from(&stream).unwrap().unwrap();
    let (second, _) = Frame::read_from(&stream[consumed..]).unwrap().unwrap();
    assert_eq!(first.header.decompressed_len, 100);
    assert_eq!(second.header.decompressed_len, 98);
}

#[test]
fn flush_with_nothing_pending_emits_nothing() {
    let mut encoder = encoder_with_block_size(100);
    encoder.flush().unwrap();
    encoder.flush().unwrap();
    assert_eq!(encoder.frames_emitted(), 0);
    assert!(encoder.get_ref().is_empty());
}

// ── Sizing and limits ────────────────────────────────────────────────────────

#[test]
fn frames_never_inflate_beyond_raw_plus_header() {
    // Incompressible input forces the RAW fallback; the frame must cost
    // at most the block plus one header.
    let block = incompressible(100);
    let mut encoder = encoder_with_block_size(100);
    encoder.write(&block).unwrap();
    let stream = encoder.finish().unwrap();

    let (frame, consumed) = Frame::read_from(&stream).unwrap().unwrap();
    assert!(consumed <= HEADER_LEN + block.len());
    assert_eq!(frame.payload, block);
}

#[test]
fn over_limit_write_fails_before_touching_state() {
    let config = EncoderConfig {
        block_size: DEFAULT_BLOCK_SIZE,
        max_encoded_size: 1024,
        ..EncoderConfig::default()
    };
    let mut encoder = StreamEncoder::with_config(config, Vec::new()).unwrap();

    // The worst case of 10 KiB is far over a 1 KiB ceiling, even though
    // the data would compress; the estimate is what gets validated.
    let err = encoder.write(&vec![0u8; 10 * 1024]).unwrap_err();
    assert!(matches!(err, EncodeError::MaxEncodedSizeExceeded { .. }));
    assert_eq!(encoder.pending_len(), 0);
    assert!(encoder.get_ref().is_empty());

    // A write within the ceiling still succeeds on the same encoder.
    encoder.write(b"small enough").unwrap();
    assert_eq!(encoder.pending_len(), 12);
}

#[test]
fn capacity_arithmetic_fails_closed_on_fake_huge_lengths() {
    // The overflow paths are unit-tested with fake lengths instead of
    // real allocations — no multi-gigabyte buffers involved.
    let sizer = OutputSizer::new(DEFAULT_BLOCK_SIZE, DEFAULT_MAX_ENCODED_SIZE);
    assert!(matches!(
        sizer.required_capacity(usize::MAX),
        Err(EncodeError::SizeOverflow)
    ));

    // An input as large as the ceiling itself must be rejected by the
    // estimate alone: per-block headers push the worst case over the top.
    let required = sizer.required_capacity(DEFAULT_MAX_ENCODED_SIZE).unwrap();
    assert!(required > DEFAULT_MAX_ENCODED_SIZE);
    assert!(matches!(
        sizer.validate(required),
        Err(EncodeError::MaxEncodedSizeExceeded { .. })
    ));
}

#[test]
fn degenerate_request_yields_empty_destination_not_error() {
    let sizer = OutputSizer::new(100, DEFAULT_MAX_ENCODED_SIZE);
    let dest = sizer.destination_for(1).unwrap();
    assert!(dest.is_empty());

    // And the encoder path built on it: a 1-byte write emits nothing and
    // errors nowhere.
    let mut encoder = encoder_with_block_size(100);
    encoder.write(&[0x42]).unwrap();
    assert_eq!(encoder.frames_emitted(), 0);
    assert_eq!(encoder.pending_len(), 1);
}

// ── Termination ──────────────────────────────────────────────────────────────

#[test]
fn terminator_is_always_the_last_frame() {
    let cases: [&[&[u8]]; 2] = [&[], &[b"data"]];
    for chunks in cases {
        let stream = lzbs_tests::encode_stream(
            EncoderConfig {
                block_size: 64,
                ..EncoderConfig::default()
            },
            chunks,
        );
        let tail = &stream[stream.len() - HEADER_LEN..];
        assert_eq!(&tail[..8], b"LZ4Block");
        assert_eq!(tail[8] & 0xF0, 0x30, "last frame must be END_OF_STREAM");
        assert!(Frame::read_from(tail).unwrap().is_none());
    }
}

#[test]
fn closed_encoder_rejects_writes_but_tolerates_close() {
    let mut encoder = encoder_with_block_size(64);
    encoder.write(b"last words").unwrap();
    encoder.close().unwrap();
    let frames = encoder.frames_emitted();

    assert!(matches!(encoder.write(b"x"), Err(EncodeError::Closed)));
    assert!(matches!(encoder.flush(), Err(EncodeError::Closed)));
    encoder.close().unwrap();
    assert_eq!(encoder.frames_emitted(), frames);

    let decoded = BlockDecoder::new()
        .decode_to_vec(encoder.get_ref())
        .unwrap();
    assert_eq!(decoded, b"last words");
}

#[test]
fn zero_data_streams_still_terminate() {
    let stream = lzbs_tests::encode_stream(EncoderConfig::default(), &[]);
    assert_eq!(stream.len(), HEADER_LEN);
    assert!(Frame::read_from(&stream).unwrap().is_none());
}
