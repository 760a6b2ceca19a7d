/// Implementation of `lzbs decompress`.
use std::fs;

use anyhow::{Context, Result};
use lzbs_decoder::BlockDecoder;
use lzbs_wire::header::DEFAULT_SEED;

use crate::DecompressArgs;

/// Run the `lzbs decompress` command.
///
/// # Errors
///
/// Returns an error if the stream cannot be read, fails validation
/// (structure, checksums, termination), or the output cannot be written.
pub fn run(args: &DecompressArgs) -> Result<()> {
    let stream = fs::read(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;

    let seed = if args.no_checksum {
        None
    } else {
        Some(DEFAULT_SEED)
    };
    let data = BlockDecoder::with_checksum_seed(seed)
        .decode_to_vec(&stream)
        .with_context(|| format!("failed to decode {}", args.input.display()))?;

    fs::write(&args.output, &data)
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    println!(
        "{} -> {} ({} bytes)",
        args.input.display(),
        args.output.display(),
        data.len()
    );
    Ok(())
}
