#![no_main]
// Whole-stream decoding must never panic on arbitrary input, including
// hostile declared lengths and corrupt compressed payloads.
use libfuzzer_sys::fuzz_target;
use lzbs_decoder::BlockDecoder;

fuzz_target!(|data: &[u8]| {
    let _ = BlockDecoder::new().decode_to_vec(data);
    let _ = BlockDecoder::with_checksum_seed(None).decode_to_vec(data);
});
