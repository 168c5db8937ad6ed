//! embedded-hal I2C transport.
//!
//! Wraps any `embedded_hal::i2c::I2c` bus. A register write is sent as
//! `[register, data..]` in one transfer; a register read writes the register
//! byte and reads back with a repeated start.

use embedded_hal::i2c::{Error as _, ErrorKind, I2c, NoAcknowledgeSource};
use tracing::{debug, instrument};

use super::traits::{BusTransport, TransportError};

pub struct HalTransport<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> HalTransport<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Give the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

fn map_error(address: u8, kind: ErrorKind, write: bool) -> TransportError {
    match kind {
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
        | ErrorKind::NoAcknowledge(NoAcknowledgeSource::Unknown) => {
            TransportError::Nak { address }
        }
        other if write => TransportError::WriteFailed(format!("{:?}", other)),
        other => TransportError::ReadFailed(format!("{:?}", other)),
    }
}

impl<I2C: I2c> BusTransport for HalTransport<I2C> {
    #[instrument(skip(self, data), fields(address = %format!("0x{:02X}", address), len = data.len()))]
    fn write(&mut self, address: u8, register: u8, data: &[u8]) -> Result<(), TransportError> {
        let mut buf = Vec::with_capacity(1 + data.len());
        buf.push(register);
        buf.extend_from_slice(data);

        self.i2c
            .write(address, &buf)
            .map_err(|e| map_error(address, e.kind(), true))?;

        debug!(bytes_written = buf.len(), "Write complete");
        Ok(())
    }

    #[instrument(skip(self), fields(address = %format!("0x{:02X}", address)))]
    fn read(&mut self, address: u8, register: u8, len: usize) -> Result<Vec<u8>, TransportError> {
        let mut buf = vec![0u8; len];

        self.i2c
            .write_read(address, &[register], &mut buf)
            .map_err(|e| map_error(address, e.kind(), false))?;

        debug!(bytes_read = len, "Read complete");
        Ok(buf)
    }
}
