use std::fs::{self, File};
use std::io::BufWriter;
use std::num::NonZeroUsize;

use aosgen_frame::{FramerConfig, FrameWriter, MessageFramer};

use crate::cmd::GenerateArgs;
use crate::exit::{frame_error, io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_frames, OutputFormat};

pub fn run(args: GenerateArgs, format: Option<OutputFormat>) -> CliResult<i32> {
    if args.output.is_some() {
        if let Some(other) = format.filter(|f| *f != OutputFormat::Raw) {
            return Err(CliError::new(
                USAGE,
                format!(
                    "--output writes raw frames; --format {} is not supported with it",
                    other.name()
                ),
            ));
        }
    }
    let chunk_size = NonZeroUsize::new(args.chunk_size)
        .ok_or_else(|| CliError::new(USAGE, "--chunk-size must be at least 1"))?;
    let message = resolve_message(&args)?;

    // Identifiers are validated before any chunking or encoding happens.
    let framer = MessageFramer::new(
        args.spacecraft_id,
        args.virtual_channel_id,
        args.num_frames,
        message,
    )
    .map_err(|err| frame_error("invalid link", err))?
    .with_config(FramerConfig { chunk_size });

    tracing::info!(
        link = %framer.link(),
        message_len = framer.message().len(),
        chunk_size = chunk_size.get(),
        max_frames = args.num_frames,
        "generating frames"
    );
    let frames = framer.generate_frames();

    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|err| {
                io_error(&format!("failed creating {}", path.display()), err)
            })?;
            let mut writer = FrameWriter::new(BufWriter::new(file));
            writer
                .write_all(&frames)
                .map_err(|err| frame_error(&format!("failed writing {}", path.display()), err))?;
            tracing::info!(
                frames = writer.frames_written(),
                path = %path.display(),
                "frames written"
            );
        }
        None => print_frames(&frames, format.unwrap_or_default())?,
    }

    Ok(SUCCESS)
}

fn resolve_message(args: &GenerateArgs) -> CliResult<Vec<u8>> {
    if let Some(message) = &args.message {
        return Ok(message.as_bytes().to_vec());
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Err(CliError::new(USAGE, "either MESSAGE or --file is required"))
}
