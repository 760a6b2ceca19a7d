/// Implementation of `lzbs compress`.
///
/// Streams the input file through a [`StreamEncoder`] into the output
/// path, one frame per block, and reports the frame/byte totals.
use std::fs::File;
use std::io::{self, BufReader, BufWriter};

use anyhow::{Context, Result};
use lzbs_encoder::{EncoderConfig, StreamEncoder};
use lzbs_wire::header::DEFAULT_SEED;

use crate::CompressArgs;

/// Run the `lzbs compress` command.
///
/// # Errors
///
/// Returns an error if either file cannot be opened, the configuration is
/// rejected, or encoding fails mid-stream.
pub fn run(args: &CompressArgs) -> Result<()> {
    let input = File::open(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let output = File::create(&args.output)
        .with_context(|| format!("cannot create {}", args.output.display()))?;

    let config = EncoderConfig {
        block_size: args.block_size,
        high_compression: args.high_compression,
        checksum_seed: if args.no_checksum {
            None
        } else {
            Some(DEFAULT_SEED)
        },
        ..EncoderConfig::default()
    };
    let mut encoder = StreamEncoder::with_config(config, BufWriter::new(output))
        .context("invalid encoder configuration")?;

    let copied = io::copy(&mut BufReader::new(input), &mut encoder)
        .with_context(|| format!("failed to compress {}", args.input.display()))?;
    encoder
        .close()
        .with_context(|| format!("failed to finalize {}", args.output.display()))?;

    println!(
        "{} -> {} ({} bytes in, {} bytes out, {} frames)",
        args.input.display(),
        args.output.display(),
        copied,
        encoder.bytes_written(),
        encoder.frames_emitted(),
    );
    Ok(())
}
