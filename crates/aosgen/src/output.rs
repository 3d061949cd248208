use std::io::Write;

use aosgen_frame::{Frame, FrameWriter};
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use crate::exit::{frame_error, CliResult};

#[derive(Clone, Debug, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `Frame N: <hex>` per line.
    #[default]
    Text,
    Json,
    Table,
    /// Binary frames, back-to-back.
    Raw,
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
            OutputFormat::Raw => "raw",
        }
    }
}

#[derive(Serialize)]
struct FrameOutput {
    index: usize,
    spacecraft_id: u16,
    virtual_channel_id: u8,
    length: usize,
    checksum: String,
    hex: String,
}

impl FrameOutput {
    fn new(index: usize, frame: &Frame) -> Self {
        Self {
            index,
            spacecraft_id: frame.spacecraft_id(),
            virtual_channel_id: frame.virtual_channel_id(),
            length: frame.len(),
            checksum: format!("{:08x}", frame.checksum()),
            hex: frame.to_hex(),
        }
    }
}

/// Lowercase hex of an arbitrary byte slice.
pub fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Label used for frame `index` (0-based) in every text rendering.
pub fn frame_label(index: usize) -> usize {
    index + 1
}

pub fn print_frames(frames: &[Frame], format: OutputFormat) -> CliResult<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_frames(&mut out, frames, format)
}

pub fn write_frames<W: Write>(out: &mut W, frames: &[Frame], format: OutputFormat) -> CliResult<()> {
    let io = |err: std::io::Error| crate::exit::io_error("failed writing output", err);
    match format {
        OutputFormat::Text => {
            for (i, frame) in frames.iter().enumerate() {
                writeln!(out, "Frame {}: {frame:x}", frame_label(i)).map_err(io)?;
            }
        }
        OutputFormat::Json => {
            for (i, frame) in frames.iter().enumerate() {
                let line = serde_json::to_string(&FrameOutput::new(frame_label(i), frame))
                    .unwrap_or_else(|_| "{}".to_string());
                writeln!(out, "{line}").map_err(io)?;
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FRAME", "SCID", "VCID", "LENGTH", "CRC32", "HEX"]);
            for (i, frame) in frames.iter().enumerate() {
                let row = FrameOutput::new(frame_label(i), frame);
                table.add_row(vec![
                    row.index.to_string(),
                    row.spacecraft_id.to_string(),
                    row.virtual_channel_id.to_string(),
                    row.length.to_string(),
                    row.checksum,
                    row.hex,
                ]);
            }
            writeln!(out, "{table}").map_err(io)?;
        }
        OutputFormat::Raw => {
            FrameWriter::new(&mut *out)
                .write_all(frames)
                .map_err(|err| frame_error("failed writing frames", err))?;
        }
    }
    out.flush().map_err(io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aosgen_frame::{MessageFramer, NoopObserver};

    fn hello_frames() -> Vec<Frame> {
        MessageFramer::new(1, 2, 10, &b"HELLO"[..])
            .unwrap()
            .generate_frames_with(NoopObserver)
    }

    #[test]
    fn text_output_uses_one_based_labels() {
        let frames = MessageFramer::new(1, 2, 10, vec![b'x'; 150])
            .unwrap()
            .generate_frames_with(NoopObserver);
        let mut out = Vec::new();
        write_frames(&mut out, &frames, OutputFormat::Text).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("Frame 1: {}", frames[0].to_hex()));
        assert!(lines[1].starts_with("Frame 2: 000102"));
    }

    #[test]
    fn json_output_is_one_object_per_frame() {
        let frames = hello_frames();
        let mut out = Vec::new();
        write_frames(&mut out, &frames, OutputFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["index"], 1);
        assert_eq!(value["spacecraft_id"], 1);
        assert_eq!(value["virtual_channel_id"], 2);
        assert_eq!(value["length"], 107);
        assert_eq!(value["hex"], frames[0].to_hex());
    }

    #[test]
    fn table_output_lists_each_frame() {
        let frames = hello_frames();
        let mut out = Vec::new();
        write_frames(&mut out, &frames, OutputFormat::Table).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("CRC32"));
        assert!(text.contains(&format!("{:08x}", frames[0].checksum())));
    }

    #[test]
    fn raw_output_is_wire_bytes() {
        let frames = hello_frames();
        let mut out = Vec::new();
        write_frames(&mut out, &frames, OutputFormat::Raw).unwrap();
        assert_eq!(out, frames[0].as_bytes());
    }

    #[test]
    fn no_frames_writes_nothing_in_text_mode() {
        let mut out = Vec::new();
        write_frames(&mut out, &[], OutputFormat::Text).unwrap();
        assert!(out.is_empty());
    }
}
