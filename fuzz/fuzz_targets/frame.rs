#![no_main]
// Frame parsing must never panic, whatever the bytes.
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = lzbs_decoder::Frame::read_from(data);
});
