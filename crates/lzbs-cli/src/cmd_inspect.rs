/// Implementation of `lzbs inspect`.
///
/// Walks the frames of a stream without decompressing any payloads and
/// prints a structured summary to stdout.
///
/// # Output format
///
/// ```text
/// Frame 0: COMPRESSED 31337 -> 65536 bytes, checksum 0x7A11C0DE, offset 0
/// Frame 1: RAW 4096 -> 4096 bytes, checksum 0x00000000, offset 31358
/// ---
/// END_OF_STREAM at offset 35475
/// ```
use std::fs;

use anyhow::{Context, Result};
use lzbs_decoder::Frame;
use lzbs_wire::header::{FrameHeader, HEADER_LEN};
use lzbs_wire::token::BlockMethod;
use serde::Serialize;

use crate::InspectArgs;

/// One row of `lzbs inspect` output.
#[derive(Serialize)]
struct FrameSummary {
    index: usize,
    offset: usize,
    method: &'static str,
    compressed_len: u32,
    decompressed_len: u32,
    checksum: u32,
}

/// The machine-readable report behind `--json`.
#[derive(Serialize)]
struct Report {
    frames: Vec<FrameSummary>,
    terminated: bool,
    trailing_bytes: usize,
}

/// Run the `lzbs inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a frame is structurally
/// invalid (bad magic, unknown method, truncated payload).
pub fn run(args: &InspectArgs) -> Result<()> {
    let stream = fs::read(&args.file)
        .with_context(|| format!("cannot read {}", args.file.display()))?;

    let mut frames = Vec::new();
    let mut cursor = 0usize;
    let mut terminated = false;

    while cursor < stream.len() {
        let parsed = Frame::read_from(&stream[cursor..])
            .with_context(|| format!("frame {} at offset {cursor} is invalid", frames.len()))?;
        match parsed {
            Some((frame, consumed)) => {
                frames.push(FrameSummary {
                    index: frames.len(),
                    offset: cursor,
                    method: method_label(&frame.header),
                    compressed_len: frame.header.compressed_len,
                    decompressed_len: frame.header.decompressed_len,
                    checksum: frame.header.checksum,
                });
                cursor += consumed;
            }
            None => {
                terminated = true;
                cursor += HEADER_LEN;
                break;
            }
        }
    }
    let trailing_bytes = stream.len() - cursor;

    if args.json {
        let report = Report {
            frames,
            terminated,
            trailing_bytes,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for frame in &frames {
        println!(
            "Frame {}: {} {} -> {} bytes, checksum 0x{:08X}, offset {}",
            frame.index,
            frame.method,
            frame.compressed_len,
            frame.decompressed_len,
            frame.checksum,
            frame.offset
        );
    }
    println!("---");
    if terminated {
        println!("END_OF_STREAM at offset {}", cursor - HEADER_LEN);
    } else {
        println!("no end-of-stream frame (truncated stream?)");
    }
    if trailing_bytes > 0 {
        println!("{trailing_bytes} trailing bytes after the end-of-stream frame");
    }

    Ok(())
}

// ── Frame formatting helpers ──────────────────────────────────────────────────

/// Returns the uppercase method label for a validated frame header.
fn method_label(header: &FrameHeader) -> &'static str {
    match header.token.method() {
        Ok(BlockMethod::Raw) => "RAW",
        Ok(BlockMethod::Compressed) => "COMPRESSED",
        Ok(BlockMethod::EndOfStream) => "END_OF_STREAM",
        Err(_) => "UNKNOWN",
    }
}
