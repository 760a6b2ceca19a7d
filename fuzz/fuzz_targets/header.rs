#![no_main]
// Header parsing must never panic, whatever the bytes.
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = lzbs_wire::header::FrameHeader::read_from(data);
});
