//! Command and response framing.
//!
//! ```text
//! command:  count [1] | opcode [1] | param1 [1] | param2 [2] | data [N] | crc16 [2]
//! response: count [1] | status/error/response data [N]            | crc16 [2]
//! ```
//!
//! `count` covers the whole frame including itself and the checksum
//! (p63, Table 10-1).

use byteorder::{LittleEndian, WriteBytesExt};
use tracing::trace;

use super::constants::{CMD_MAX_DATA_LEN, CMD_MIN_LEN, RESPONSE_MIN_LEN, SHA_BLOCK_SIZE};
use super::opcode::{Opcode, ShaMode};
use super::status::Status;
use crate::checksum::checksum;
use crate::error::{Error, Result};

/// An outbound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub opcode: Opcode,
    pub param1: u8,
    /// Sent little-endian.
    pub param2: u16,
    pub data: Vec<u8>,
}

impl Command {
    pub fn new(opcode: Opcode, param1: u8, param2: u16) -> Self {
        Self {
            opcode,
            param1,
            param2,
            data: Vec::new(),
        }
    }

    pub fn with_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = data.into();
        self
    }

    /// SHA-256 sub-command. For update and end, param2 is the number of
    /// message bytes carried in `data`.
    pub fn sha(mode: ShaMode, data: &[u8]) -> Self {
        let param2 = match mode {
            ShaMode::Sha256Start => 0,
            _ => data.len() as u16,
        };
        Self::new(Opcode::Sha, mode.code(), param2).with_data(data)
    }

    /// Total frame length, i.e. the value of the count byte.
    pub fn frame_len(&self) -> usize {
        CMD_MIN_LEN + self.data.len()
    }

    /// Serialize to a checksummed frame.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        encode_command(self.opcode.code(), self.param1, self.param2, &self.data)
    }
}

/// Build a command frame from raw fields.
pub fn encode_command(opcode: u8, param1: u8, param2: u16, data: &[u8]) -> Result<Vec<u8>> {
    if data.len() > CMD_MAX_DATA_LEN {
        return Err(Error::FrameTooLarge {
            size: data.len(),
            max: CMD_MAX_DATA_LEN,
        });
    }

    let count = CMD_MIN_LEN + data.len();
    let mut frame = Vec::with_capacity(count);
    frame.write_u8(count as u8)?;
    frame.write_u8(opcode)?;
    frame.write_u8(param1)?;
    frame.write_u16::<LittleEndian>(param2)?;
    frame.extend_from_slice(data);

    let crc = checksum(&frame);
    frame.extend_from_slice(&crc);

    trace!(frame = %hex::encode_upper(&frame), "Encoded command");
    Ok(frame)
}

/// Build a response frame around `payload`. Used by simulated devices.
pub fn encode_response(payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(payload.len() + 3);
    frame.push((payload.len() + 3) as u8);
    frame.extend_from_slice(payload);
    let crc = checksum(&frame);
    frame.extend_from_slice(&crc);
    frame
}

/// A verified response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    count: u8,
    payload: Vec<u8>,
}

impl Response {
    /// Verify a raw response frame.
    ///
    /// A frame of exactly [`RESPONSE_MIN_LEN`] bytes carries a status code;
    /// failure codes are turned into errors. Longer frames carry command data
    /// and are returned as-is.
    pub fn from_bytes(frame: &[u8]) -> Result<Self> {
        if frame.len() < RESPONSE_MIN_LEN {
            return Err(Error::MalformedFrame {
                actual: frame.len(),
                minimum: RESPONSE_MIN_LEN,
            });
        }

        let (body, crc) = frame.split_at(frame.len() - 2);
        let received = [crc[0], crc[1]];
        let expected = checksum(body);
        if expected != received {
            return Err(Error::ChecksumMismatch { expected, received });
        }

        let response = Self {
            count: body[0],
            payload: body[1..].to_vec(),
        };

        if let Some(status) = response.status() {
            if !status.is_known() {
                return Err(Error::UnknownStatus(status.code()));
            }
            if status.is_error() {
                return Err(Error::DeviceError(status));
            }
        }

        Ok(response)
    }

    /// Status code, present only on 4-byte frames.
    pub fn status(&self) -> Option<Status> {
        match self.payload.as_slice() {
            [code] => Some(Status::from(*code)),
            _ => None,
        }
    }

    /// The count byte as sent by the device.
    pub fn count(&self) -> u8 {
        self.count
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// Total frame length.
    pub fn len(&self) -> usize {
        self.payload.len() + 3
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Number of full SHA blocks and the trailing byte count for a message.
pub fn sha_block_split(len: usize) -> (usize, usize) {
    (len / SHA_BLOCK_SIZE, len % SHA_BLOCK_SIZE)
}
