use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::Result;
use crate::link::LinkIdentifier;

/// Frame header: spacecraft ID (2) + virtual channel ID (1) = 3 bytes.
pub const HEADER_SIZE: usize = 3;

/// Trailing CRC-32: 4 bytes.
pub const CHECKSUM_SIZE: usize = 4;

/// Bytes a frame adds around its payload.
pub const OVERHEAD: usize = HEADER_SIZE + CHECKSUM_SIZE;

/// An encoded telemetry frame.
///
/// Holds the complete wire image; the header, payload and checksum are views
/// into it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    bytes: Bytes,
}

impl Frame {
    /// Validate the identifiers and encode one frame.
    pub fn encode(spacecraft_id: i64, virtual_channel_id: i64, payload: &[u8]) -> Result<Self> {
        let link = LinkIdentifier::new(spacecraft_id, virtual_channel_id)?;
        Ok(Self::from_link(link, payload))
    }

    /// Encode one frame for an already validated link.
    pub fn from_link(link: LinkIdentifier, payload: &[u8]) -> Self {
        let mut buf = BytesMut::with_capacity(OVERHEAD + payload.len());
        encode_frame(link, payload, &mut buf);
        Self {
            bytes: buf.freeze(),
        }
    }

    pub fn spacecraft_id(&self) -> u16 {
        u16::from_be_bytes([self.bytes[0], self.bytes[1]])
    }

    pub fn virtual_channel_id(&self) -> u8 {
        self.bytes[2]
    }

    pub fn link(&self) -> LinkIdentifier {
        LinkIdentifier::from_parts(self.spacecraft_id(), self.virtual_channel_id())
    }

    /// The payload section, including any zero padding.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[HEADER_SIZE..self.bytes.len() - CHECKSUM_SIZE]
    }

    /// The CRC-32 stored in the trailer.
    pub fn checksum(&self) -> u32 {
        let tail = &self.bytes[self.bytes.len() - CHECKSUM_SIZE..];
        u32::from_be_bytes([tail[0], tail[1], tail[2], tail[3]])
    }

    /// Total wire size (header + payload + checksum).
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false: a frame carries at least its header and checksum.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Cheap handle to the wire image.
    pub fn to_bytes(&self) -> Bytes {
        self.bytes.clone()
    }

    /// Lowercase hexadecimal rendering of the wire image.
    pub fn to_hex(&self) -> String {
        format!("{self:x}")
    }

    /// Re-check the trailer against the preceding bytes.
    pub fn verify(&self) -> bool {
        verify_checksum(&self.bytes)
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Frame> for Bytes {
    fn from(frame: Frame) -> Self {
        frame.bytes
    }
}

impl fmt::LowerHex for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.bytes.iter() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// Encode a frame into the wire format.
///
/// Wire format:
/// ```text
/// ┌──────────────┬────────────┬─────────────────┬──────────────┐
/// │ Spacecraft   │ Virtual    │ Payload         │ CRC-32       │
/// │ ID (2B BE)   │ Chan (1B)  │ (N bytes)       │ (4B BE)      │
/// └──────────────┴────────────┴─────────────────┴──────────────┘
/// ```
///
/// The CRC covers the header and payload only. Appends to `dst`; bytes
/// already in `dst` are not part of the checksum.
pub fn encode_frame(link: LinkIdentifier, payload: &[u8], dst: &mut BytesMut) {
    dst.reserve(OVERHEAD + payload.len());
    let start = dst.len();
    dst.put_u16(link.spacecraft_id());
    dst.put_u8(link.virtual_channel_id());
    dst.put_slice(payload);
    let crc = crc32fast::hash(&dst[start..]);
    dst.put_u32(crc);
}

/// Check that the last 4 bytes of `frame` are the big-endian CRC-32 of the
/// rest.
///
/// Returns false for anything shorter than an empty-payload frame.
pub fn verify_checksum(frame: &[u8]) -> bool {
    if frame.len() < OVERHEAD {
        return false;
    }
    let (body, tail) = frame.split_at(frame.len() - CHECKSUM_SIZE);
    let stored = u32::from_be_bytes([tail[0], tail[1], tail[2], tail[3]]);
    crc32fast::hash(body) == stored
}
