//! Checksummed telemetry frame generation.
//!
//! aosgen wraps a message in fixed-envelope frames: a spacecraft / virtual
//! channel header, a fixed-size zero-padded payload, and a CRC-32 trailer.
//!
//! # Crate Structure
//!
//! - [`frame`] — Frame encoding, message segmentation, and frame output

/// Re-export frame types.
pub mod frame {
    pub use aosgen_frame::*;
}

pub use aosgen_frame::{Frame, FrameError, LinkIdentifier, MessageFramer};
