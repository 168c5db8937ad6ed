//! Device serial number and revision.

use std::fmt;

use tracing::{info, instrument};

use crate::device::AteccDevice;
use crate::error::{Error, Result};
use crate::events::AteccObserver;
use crate::protocol::constants::{READ_ZONE_CONFIG_32, REVISION_SIZE, SERIAL_NUMBER_SIZE};
use crate::protocol::{Command, Opcode};
use crate::transport::BusTransport;

/// Bytes of config block 0 that must be present to extract the identity.
const IDENTITY_MIN_LEN: usize = 13;

/// Identity read from the first 32 bytes of the configuration zone.
///
/// The block holds the 72-bit serial number at bytes <0:3> and <8:12> and the
/// device revision at bytes <4:7>.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub serial: [u8; SERIAL_NUMBER_SIZE],
    pub revision: [u8; REVISION_SIZE],
}

impl DeviceIdentity {
    pub fn from_config_block(block: &[u8]) -> Result<Self> {
        if block.len() < IDENTITY_MIN_LEN {
            return Err(Error::UnexpectedPayload {
                command: "Read",
                expected: IDENTITY_MIN_LEN,
                actual: block.len(),
            });
        }

        let mut serial = [0u8; SERIAL_NUMBER_SIZE];
        serial[..4].copy_from_slice(&block[0..4]);
        serial[4..].copy_from_slice(&block[8..13]);

        let mut revision = [0u8; REVISION_SIZE];
        revision.copy_from_slice(&block[4..8]);

        Ok(Self { serial, revision })
    }

    pub fn serial_hex(&self) -> String {
        hex::encode(self.serial)
    }

    pub fn revision_hex(&self) -> String {
        hex::encode(self.revision)
    }
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "serial:0x{} revision:0x{}",
            self.serial_hex(),
            self.revision_hex()
        )
    }
}

impl<T: BusTransport, O: AteccObserver> AteccDevice<T, O> {
    /// Read the device serial number and revision.
    #[instrument(skip(self))]
    pub fn info(&mut self) -> Result<DeviceIdentity> {
        let read = Command::new(Opcode::Read, READ_ZONE_CONFIG_32, 0x0000);
        let res = self.execute(&read, true)?;
        let identity = DeviceIdentity::from_config_block(res.payload())?;

        info!(serial = %identity.serial_hex(), revision = %identity.revision_hex(), "Device identity");

        let _ = self.sleep();
        Ok(identity)
    }
}
