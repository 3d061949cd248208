use std::fmt;

/// Which half of a link identifier failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierField {
    SpacecraftId,
    VirtualChannelId,
}

impl fmt::Display for IdentifierField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierField::SpacecraftId => f.write_str("spacecraft ID"),
            IdentifierField::VirtualChannelId => f.write_str("virtual channel ID"),
        }
    }
}

/// Errors that can occur while building or emitting frames.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// An identifier is outside its inclusive range.
    #[error("{field} must be between 0 and {max} (got {value})")]
    InvalidIdentifier {
        field: IdentifierField,
        value: i64,
        max: u32,
    },

    /// An I/O error occurred while writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The sink accepted zero bytes before the frame was fully written.
    #[error("output closed (incomplete frame)")]
    ConnectionClosed,
}

impl FrameError {
    /// True for identifier range failures.
    pub fn is_invalid_identifier(&self) -> bool {
        matches!(self, FrameError::InvalidIdentifier { .. })
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;
