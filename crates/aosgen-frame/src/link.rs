//! Link identifiers.
//!
//! A link is addressed by a spacecraft ID (0-65535) and a virtual channel ID
//! (0-255). [`LinkIdentifier::new`] is the single place where both ranges are
//! checked.

use std::fmt;

use crate::error::{FrameError, IdentifierField, Result};

/// Largest spacecraft ID that fits the 2-byte header field.
pub const MAX_SPACECRAFT_ID: u16 = u16::MAX;

/// Largest virtual channel ID that fits the 1-byte header field.
pub const MAX_VIRTUAL_CHANNEL_ID: u8 = u8::MAX;

/// A validated spacecraft / virtual channel pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkIdentifier {
    spacecraft_id: u16,
    virtual_channel_id: u8,
}

impl LinkIdentifier {
    /// Validate raw identifiers.
    ///
    /// Values are taken as signed integers so that negative and oversized
    /// inputs are rejected with [`FrameError::InvalidIdentifier`] instead of
    /// wrapping.
    pub fn new(spacecraft_id: i64, virtual_channel_id: i64) -> Result<Self> {
        let spacecraft_id = u16::try_from(spacecraft_id).map_err(|_| {
            FrameError::InvalidIdentifier {
                field: IdentifierField::SpacecraftId,
                value: spacecraft_id,
                max: u32::from(MAX_SPACECRAFT_ID),
            }
        })?;
        let virtual_channel_id = u8::try_from(virtual_channel_id).map_err(|_| {
            FrameError::InvalidIdentifier {
                field: IdentifierField::VirtualChannelId,
                value: virtual_channel_id,
                max: u32::from(MAX_VIRTUAL_CHANNEL_ID),
            }
        })?;
        Ok(Self::from_parts(spacecraft_id, virtual_channel_id))
    }

    /// Build from values already narrowed to the header field widths.
    pub const fn from_parts(spacecraft_id: u16, virtual_channel_id: u8) -> Self {
        Self {
            spacecraft_id,
            virtual_channel_id,
        }
    }

    pub fn spacecraft_id(&self) -> u16 {
        self.spacecraft_id
    }

    pub fn virtual_channel_id(&self) -> u8 {
        self.virtual_channel_id
    }
}

impl fmt::Display for LinkIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SC{}/VC{}", self.spacecraft_id, self.virtual_channel_id)
    }
}
