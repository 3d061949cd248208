use aosgen_frame::{verify_checksum, CHECKSUM_SIZE, HEADER_SIZE, OVERHEAD};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use crate::cmd::VerifyArgs;
use crate::exit::{CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{frame_label, hex_string, OutputFormat};

/// Outcome for one frame. Header fields are only reported once the
/// checksum has matched.
#[derive(Debug, Serialize)]
struct VerifyReport {
    index: usize,
    length: usize,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    spacecraft_id: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    virtual_channel_id: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    checksum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payload: Option<String>,
}

impl VerifyReport {
    fn new(index: usize, bytes: &[u8]) -> Self {
        let valid = verify_checksum(bytes);
        let mut report = Self {
            index,
            length: bytes.len(),
            valid,
            spacecraft_id: None,
            virtual_channel_id: None,
            checksum: None,
            payload: None,
        };
        if valid {
            let (body, tail) = bytes.split_at(bytes.len() - CHECKSUM_SIZE);
            report.spacecraft_id = Some(u16::from_be_bytes([body[0], body[1]]));
            report.virtual_channel_id = Some(body[2]);
            report.checksum = Some(hex_string(tail));
            report.payload = Some(hex_string(&body[HEADER_SIZE..]));
        }
        report
    }

    fn status(&self) -> String {
        if self.length < OVERHEAD {
            format!("too short ({} bytes, need at least {OVERHEAD})", self.length)
        } else if self.valid {
            "ok".to_string()
        } else {
            "checksum mismatch".to_string()
        }
    }

    fn describe(&self) -> String {
        match (
            self.spacecraft_id,
            self.virtual_channel_id,
            &self.checksum,
            &self.payload,
        ) {
            (Some(scid), Some(vcid), Some(crc), Some(payload)) => format!(
                "ok spacecraft_id={scid} virtual_channel_id={vcid} crc32={crc} payload={payload}"
            ),
            _ => self.status(),
        }
    }
}

pub fn run(args: VerifyArgs, format: Option<OutputFormat>) -> CliResult<i32> {
    let format = format.unwrap_or_default();
    if format == OutputFormat::Raw {
        return Err(CliError::new(
            USAGE,
            "verify reports results as text, json or table; --format raw is not supported",
        ));
    }

    let mut reports = Vec::with_capacity(args.frames.len());
    for (i, hex) in args.frames.iter().enumerate() {
        let bytes = decode_hex(hex)
            .map_err(|err| CliError::new(USAGE, format!("frame {}: {err}", frame_label(i))))?;
        reports.push(VerifyReport::new(frame_label(i), &bytes));
    }

    for report in reports.iter().filter(|r| !r.valid) {
        tracing::warn!(frame = report.index, len = report.length, "checksum mismatch");
    }
    print_reports(&reports, format);

    let failures = reports.iter().filter(|r| !r.valid).count();
    if failures > 0 {
        return Err(CliError::new(
            DATA_INVALID,
            format!("{failures} of {} frames failed verification", reports.len()),
        ));
    }
    Ok(SUCCESS)
}

fn print_reports(reports: &[VerifyReport], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            for report in reports {
                println!(
                    "{}",
                    serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
        OutputFormat::Table => println!("{}", report_table(reports)),
        OutputFormat::Text | OutputFormat::Raw => {
            for report in reports {
                println!("Frame {}: {}", report.index, report.describe());
            }
        }
    }
}

fn report_table(reports: &[VerifyReport]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "FRAME", "STATUS", "SCID", "VCID", "LENGTH", "CRC32", "PAYLOAD",
        ]);
    for report in reports {
        let or_dash = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            report.index.to_string(),
            report.status(),
            or_dash(report.spacecraft_id.map(|v| v.to_string())),
            or_dash(report.virtual_channel_id.map(|v| v.to_string())),
            report.length.to_string(),
            or_dash(report.checksum.clone()),
            or_dash(report.payload.clone()),
        ]);
    }
    table
}

fn decode_hex(input: &str) -> Result<Vec<u8>, String> {
    let input = input.trim();
    let input = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    if input.len() % 2 != 0 {
        return Err("hex string has an odd number of digits".to_string());
    }

    input
        .as_bytes()
        .chunks_exact(2)
        .map(|pair| {
            let digits = std::str::from_utf8(pair).map_err(|_| "invalid hex digit".to_string())?;
            u8::from_str_radix(digits, 16).map_err(|_| format!("invalid hex digit in {digits:?}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aosgen_frame::Frame;

    #[test]
    fn decode_hex_accepts_both_cases_and_prefix() {
        assert_eq!(decode_hex("00ff").unwrap(), vec![0x00, 0xFF]);
        assert_eq!(decode_hex("0xABcd").unwrap(), vec![0xAB, 0xCD]);
        assert_eq!(decode_hex("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn decode_hex_rejects_malformed_input() {
        assert!(decode_hex("abc").is_err());
        assert!(decode_hex("zz").is_err());
    }

    #[test]
    fn valid_frame_reports_header_fields_and_payload() {
        let frame = Frame::encode(513, 7, b"HELLO").unwrap();
        let bytes = decode_hex(&frame.to_hex()).unwrap();
        let report = VerifyReport::new(1, &bytes);

        assert!(report.valid);
        assert_eq!(report.spacecraft_id, Some(513));
        assert_eq!(report.virtual_channel_id, Some(7));
        assert_eq!(report.payload.as_deref(), Some("48454c4c4f"));
        assert_eq!(
            report.checksum,
            Some(format!("{:08x}", frame.checksum()))
        );
        assert_eq!(
            report.describe(),
            format!(
                "ok spacecraft_id=513 virtual_channel_id=7 crc32={:08x} payload=48454c4c4f",
                frame.checksum()
            )
        );
    }

    #[test]
    fn invalid_frame_reports_no_fields() {
        let mut bytes = Frame::encode(1, 2, b"HELLO").unwrap().as_bytes().to_vec();
        bytes[3] ^= 0xFF;
        let report = VerifyReport::new(1, &bytes);

        assert!(!report.valid);
        assert_eq!(report.spacecraft_id, None);
        assert_eq!(report.payload, None);
        assert_eq!(report.describe(), "checksum mismatch");

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("spacecraft_id").is_none());
        assert_eq!(json["valid"], false);
    }

    #[test]
    fn valid_frame_json_carries_fields() {
        let frame = Frame::encode(5, 6, b"").unwrap();
        let json = serde_json::to_value(VerifyReport::new(1, frame.as_bytes())).unwrap();
        assert_eq!(json["spacecraft_id"], 5);
        assert_eq!(json["virtual_channel_id"], 6);
        assert_eq!(json["payload"], "");
    }

    #[test]
    fn table_lists_status_and_fields() {
        let good = Frame::encode(5, 6, b"ok").unwrap();
        let reports = vec![
            VerifyReport::new(1, good.as_bytes()),
            VerifyReport::new(2, &[0, 1]),
        ];
        let rendered = report_table(&reports).to_string();
        assert!(rendered.contains("STATUS"));
        assert!(rendered.contains("6f6b"));
        assert!(rendered.contains("too short"));
    }

    #[test]
    fn corrupted_frame_fails_with_data_invalid() {
        let mut hex = Frame::encode(1, 2, b"HELLO").unwrap().to_hex();
        hex.replace_range(6..8, "00");
        let err = run(VerifyArgs { frames: vec![hex] }, None).unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn raw_format_is_a_usage_error() {
        let hex = Frame::encode(1, 2, b"HELLO").unwrap().to_hex();
        let err = run(VerifyArgs { frames: vec![hex] }, Some(OutputFormat::Raw)).unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn short_input_is_described() {
        let report = VerifyReport::new(1, &[0, 1]);
        assert!(report.describe().starts_with("too short"));
    }
}
