//! Bus transport abstraction.
//!
//! Defines the `BusTransport` trait for register-addressed bus access,
//! allowing different implementations (embedded-hal, mock, etc.).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to open bus {bus}: {message}")]
    OpenFailed { bus: u8, message: String },

    #[error("No acknowledge from device 0x{address:02X}")]
    Nak { address: u8 },

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("Timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Bus disconnected")]
    Disconnected,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Abstract bus interface.
///
/// One call is one addressed transfer: the register byte goes out first,
/// followed by `data` on writes or by a read of `len` bytes.
pub trait BusTransport {
    /// Write `data` to `register` of the device at `address`.
    fn write(&mut self, address: u8, register: u8, data: &[u8]) -> Result<(), TransportError>;

    /// Read `len` bytes from `register` of the device at `address`.
    fn read(&mut self, address: u8, register: u8, len: usize) -> Result<Vec<u8>, TransportError>;
}

impl<T: BusTransport + ?Sized> BusTransport for &mut T {
    fn write(&mut self, address: u8, register: u8, data: &[u8]) -> Result<(), TransportError> {
        (**self).write(address, register, data)
    }

    fn read(&mut self, address: u8, register: u8, len: usize) -> Result<Vec<u8>, TransportError> {
        (**self).read(address, register, len)
    }
}

impl<T: BusTransport + ?Sized> BusTransport for Box<T> {
    fn write(&mut self, address: u8, register: u8, data: &[u8]) -> Result<(), TransportError> {
        (**self).write(address, register, data)
    }

    fn read(&mut self, address: u8, register: u8, len: usize) -> Result<Vec<u8>, TransportError> {
        (**self).read(address, register, len)
    }
}
