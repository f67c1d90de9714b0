use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    BufferTooSmall,
    /// A versioned get request needed a target event type and none was given.
    MissingEventType,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferTooSmall => f.write_str("buffer too small"),
            Self::MissingEventType => f.write_str("target event type required"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload shorter than the minimum for its command.
    TooShort,
    /// Reader ran out of bytes mid-field.
    UnexpectedEof,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooShort => f.write_str("payload too short"),
            Self::UnexpectedEof => f.write_str("unexpected end of input"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}
