#![no_main]
// For any chunking of any input, a write→close sequence must produce a
// stream that decodes back to the exact original bytes.
use libfuzzer_sys::fuzz_target;
use lzbs_decoder::BlockDecoder;
use lzbs_encoder::{EncoderConfig, StreamEncoder};

fuzz_target!(|input: (u8, Vec<Vec<u8>>)| {
    let (size_sel, chunks) = input;
    let config = EncoderConfig {
        // 64 bytes to 8 KiB, exercising several level nibbles.
        block_size: 64usize << (size_sel % 8),
        ..EncoderConfig::default()
    };

    let mut encoder = StreamEncoder::with_config(config, Vec::new()).unwrap();
    let mut original = Vec::new();
    for chunk in &chunks {
        original.extend_from_slice(chunk);
        encoder.write(chunk).unwrap();
    }
    let stream = encoder.finish().unwrap();

    let decoded = BlockDecoder::new().decode_to_vec(&stream).unwrap();
    assert_eq!(decoded, original);
});
