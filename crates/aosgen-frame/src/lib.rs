//! Fixed-envelope telemetry frame encoding and message segmentation.
//!
//! Every frame carries:
//! - A 2-byte big-endian spacecraft ID
//! - A 1-byte virtual channel ID
//! - The payload
//! - A 4-byte big-endian CRC-32 over everything before it
//!
//! [`MessageFramer`] splits a message into fixed-size, zero-padded chunks and
//! encodes one frame per chunk, up to a frame budget.

pub mod codec;
pub mod error;
pub mod framer;
pub mod link;
pub mod observer;
pub mod writer;

pub use codec::{encode_frame, verify_checksum, Frame, CHECKSUM_SIZE, HEADER_SIZE, OVERHEAD};
pub use error::{FrameError, IdentifierField, Result};
pub use framer::{split_message, FramerConfig, MessageFramer, DEFAULT_CHUNK_SIZE};
pub use link::{LinkIdentifier, MAX_SPACECRAFT_ID, MAX_VIRTUAL_CHANNEL_ID};
pub use observer::{FrameObserver, NoopObserver, TracingObserver};
pub use writer::FrameWriter;
