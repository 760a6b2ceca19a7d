/// LZ4 block-stream command-line tool — compress, decompress, and inspect
/// frame streams produced by the lzbs stack.
///
/// # Command overview
///
/// ```text
/// lzbs <COMMAND> [OPTIONS]
///
/// Commands:
///   compress     Compress a file into a frame stream
///   decompress   Recover the original bytes from a frame stream
///   inspect      Print a frame-by-frame summary of a stream
///   help         Print help information
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                 |
/// |------|-----------------------------------------|
/// | 0    | Success                                 |
/// | 1    | Error (I/O failure, invalid stream, …)  |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod cmd_compress;
mod cmd_decompress;
mod cmd_inspect;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The lzbs command-line tool.
#[derive(Parser)]
#[command(name = "lzbs", version, about = "LZ4 block-stream CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into an LZ4 block stream.
    Compress(CompressArgs),
    /// Decompress an LZ4 block stream back into the original file.
    Decompress(DecompressArgs),
    /// Print a frame-by-frame summary of an LZ4 block stream.
    Inspect(InspectArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `lzbs compress`.
#[derive(clap::Args)]
pub struct CompressArgs {
    /// Input file to compress.
    pub input: PathBuf,

    /// Output stream path.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Uncompressed block size in bytes (64 to 32 MiB).
    #[arg(long, default_value_t = lzbs_wire::token::DEFAULT_BLOCK_SIZE)]
    pub block_size: usize,

    /// Use the slower LZ4 high-compression mode.
    #[arg(long)]
    pub high_compression: bool,

    /// Skip per-block checksums (the checksum field is written as 0).
    #[arg(long)]
    pub no_checksum: bool,
}

/// Arguments for `lzbs decompress`.
#[derive(clap::Args)]
pub struct DecompressArgs {
    /// Input stream to decompress.
    pub input: PathBuf,

    /// Output file path.
    #[arg(short, long)]
    pub output: PathBuf,

    /// The stream was written without checksums; skip verification.
    #[arg(long)]
    pub no_checksum: bool,
}

/// Arguments for `lzbs inspect`.
///
/// Walks the frames of a stream without decompressing the payloads and
/// prints one line per frame: method, lengths, checksum, byte offset.
/// `--json` emits the same information as a machine-readable report.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the stream to inspect.
    pub file: PathBuf,

    /// Emit the frame listing as JSON.
    #[arg(long)]
    pub json: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compress(args) => cmd_compress::run(&args),
        Commands::Decompress(args) => cmd_decompress::run(&args),
        Commands::Inspect(args) => cmd_inspect::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
