//! Error types for atecc-core.

use thiserror::Error;

use crate::protocol::Status;
use crate::transport::TransportError;

/// Result type alias for driver operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Bus read/write failure, passed through unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("invalid response, got {actual} bytes, expected at least {minimum}")]
    MalformedFrame { actual: usize, minimum: usize },

    #[error("checksum verification failure: calculated {expected:02X?}, received {received:02X?}")]
    ChecksumMismatch { expected: [u8; 2], received: [u8; 2] },

    #[error("invalid status/error code: {0:02x}")]
    UnknownStatus(u8),

    /// The device reported a failed command.
    #[error("{0}")]
    DeviceError(Status),

    #[error("wake-up failed: {0}")]
    WakeFailed(#[source] Box<Error>),

    #[error("invalid hex message: {0}")]
    Decode(#[from] hex::FromHexError),

    #[error("command data too large: {size} bytes (max: {max} bytes)")]
    FrameTooLarge { size: usize, max: usize },

    #[error("unexpected {command} payload: expected {expected} bytes, got {actual}")]
    UnexpectedPayload {
        command: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Status carried by a device-reported failure.
    pub fn status(&self) -> Option<Status> {
        match self {
            Self::DeviceError(status) => Some(*status),
            Self::UnknownStatus(code) => Some(Status::Unknown(*code)),
            Self::WakeFailed(inner) => inner.status(),
            _ => None,
        }
    }

    /// Whether the error came from the bus rather than the frame contents.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
