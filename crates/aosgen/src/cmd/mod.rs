use clap::builder::RangedU64ValueParser;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod generate;
pub mod verify;
pub mod version;

/// Largest accepted `--chunk-size` (1 MiB).
pub const MAX_CHUNK_SIZE: u64 = 1 << 20;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split a message into checksummed frames.
    Generate(GenerateArgs),
    /// Check the CRC-32 trailer of hex-encoded frames.
    Verify(VerifyArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: Option<OutputFormat>) -> CliResult<i32> {
    match command {
        Command::Generate(args) => generate::run(args, format),
        Command::Verify(args) => verify::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Message to frame (UTF-8 text).
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub message: Option<String>,
    /// Read the message from a file instead.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
    /// Spacecraft ID (0-65535).
    #[arg(long, env = "AOSGEN_SPACECRAFT_ID", allow_negative_numbers = true)]
    pub spacecraft_id: i64,
    /// Virtual channel ID (0-255).
    #[arg(long, env = "AOSGEN_VIRTUAL_CHANNEL_ID", allow_negative_numbers = true)]
    pub virtual_channel_id: i64,
    /// Maximum number of frames to generate.
    #[arg(long, env = "AOSGEN_NUM_FRAMES", default_value = "10")]
    pub num_frames: usize,
    /// Payload bytes per frame (1-1048576); the last chunk is zero-padded to
    /// this size.
    #[arg(
        long,
        default_value = "100",
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_CHUNK_SIZE)
    )]
    pub chunk_size: usize,
    /// Write binary frames to this file instead of printing them. Only
    /// `--format raw` (or no `--format`) may be combined with it.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Frames as hexadecimal strings.
    #[arg(required = true)]
    pub frames: Vec<String>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
