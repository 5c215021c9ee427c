use thiserror::Error;

/// Error parsing DNS packet
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("buffer too small for the next field")]
    Truncated,
    #[error("read position out of bounds")]
    OutOfBounds,
    #[error("invalid compression offset {0}")]
    InvalidOffset(usize),
    #[error("invalid label len {0}")]
    InvalidLabel(u8),
    #[error("invalid rdata length {0}")]
    InvalidLength(u16),
    #[error("name longer than 255 bytes")]
    NameTooLong,
    #[error("too many compression pointers in name")]
    CompressionLoop,
}
