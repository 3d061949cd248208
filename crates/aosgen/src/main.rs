mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "aosgen", version, about = "Checksummed telemetry frame generator")]
struct Cli {
    /// Output format for frames (stdout). Default: text.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    match cmd::run(cli.command, cli.format) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate_subcommand() {
        let cli = Cli::try_parse_from([
            "aosgen",
            "generate",
            "HELLO",
            "--spacecraft-id",
            "1",
            "--virtual-channel-id",
            "2",
        ])
        .expect("generate args should parse");

        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.message.as_deref(), Some("HELLO"));
                assert_eq!(args.num_frames, 10);
                assert_eq!(args.chunk_size, 100);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn negative_identifiers_reach_validation() {
        let cli = Cli::try_parse_from([
            "aosgen",
            "generate",
            "HELLO",
            "--spacecraft-id",
            "-1",
            "--virtual-channel-id",
            "2",
        ])
        .expect("negative ids should parse");

        assert!(matches!(
            cli.command,
            Command::Generate(ref args) if args.spacecraft_id == -1
        ));
    }

    #[test]
    fn rejects_message_and_file_together() {
        let err = Cli::try_parse_from([
            "aosgen",
            "generate",
            "HELLO",
            "--file",
            "/tmp/message.bin",
            "--spacecraft-id",
            "1",
            "--virtual-channel-id",
            "2",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn rejects_zero_chunk_size() {
        let err = Cli::try_parse_from([
            "aosgen",
            "generate",
            "HELLO",
            "--spacecraft-id",
            "1",
            "--virtual-channel-id",
            "2",
            "--chunk-size",
            "0",
        ])
        .expect_err("zero chunk size should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn rejects_chunk_size_above_limit() {
        let err = Cli::try_parse_from([
            "aosgen",
            "generate",
            "",
            "--spacecraft-id",
            "1",
            "--virtual-channel-id",
            "2",
            "--chunk-size",
            "18446744073709551615",
        ])
        .expect_err("oversized chunk size should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn accepts_chunk_size_at_limit() {
        let limit = cmd::MAX_CHUNK_SIZE.to_string();
        let cli = Cli::try_parse_from([
            "aosgen",
            "generate",
            "HELLO",
            "--spacecraft-id",
            "1",
            "--virtual-channel-id",
            "2",
            "--chunk-size",
            &limit,
        ])
        .expect("chunk size at the limit should parse");

        assert!(matches!(
            cli.command,
            Command::Generate(ref args) if args.chunk_size == 1 << 20
        ));
    }

    #[test]
    fn format_is_unset_unless_given() {
        let cli = Cli::try_parse_from(["aosgen", "version"]).expect("version should parse");
        assert_eq!(cli.format, None);

        let cli = Cli::try_parse_from(["aosgen", "--format", "raw", "version"])
            .expect("version should parse");
        assert_eq!(cli.format, Some(OutputFormat::Raw));
    }
}
