//! ATECC frame check value.
//!
//! CRC-16 with polynomial 0x8005, zero initial value, no final XOR. Input bits
//! are consumed least-significant first and the register is emitted low byte
//! first (ATECC608A Full Datasheet, 10.1.2 "CRC Checksum").

use tracing::trace;

use crate::protocol::constants::CRC16_POLY;

/// Run the bit-serial CRC register over `data`.
pub fn checksum_u16(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;

    for &byte in data {
        for bit in 0..8 {
            let data_bit = (byte >> bit) & 0x01;
            let carry_bit = (crc >> 15) as u8;
            crc <<= 1;
            if data_bit != carry_bit {
                crc ^= CRC16_POLY;
            }
        }
    }

    crc
}

/// Frame checksum as it appears on the wire (low byte first).
pub fn checksum(data: &[u8]) -> [u8; 2] {
    let crc = checksum_u16(data).to_le_bytes();

    trace!(
        len = data.len(),
        crc = %format!("{:02X}{:02X}", crc[0], crc[1]),
        "Calculated checksum"
    );

    crc
}

/// Check `data` against a received wire checksum.
pub fn verify(data: &[u8], expected: [u8; 2]) -> bool {
    checksum(data) == expected
}
