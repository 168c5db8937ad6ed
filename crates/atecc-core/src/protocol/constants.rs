//! ATECC608 protocol constants.
//!
//! Page references are to the ATECC608A Full Datasheet.

pub const DEFAULT_I2C_BUS: u8 = 0;
pub const DEFAULT_I2C_ADDRESS: u8 = 0x60;

// Word addresses (p48, Table 7-2)
pub const WORD_ADDR_RESET: u8 = 0x00;
pub const WORD_ADDR_SLEEP: u8 = 0x01;
pub const WORD_ADDR_IDLE: u8 = 0x02;
pub const WORD_ADDR_COMMAND: u8 = 0x03;

/// Bus address for the wake pulse. No device acknowledges it.
pub const WAKE_ADDRESS: u8 = 0x00;
/// Register written during the wake pulse.
pub const WAKE_REGISTER: u8 = 0x00;

/// Max command execution time in ms with the default Clock-Divider of 0x00
/// (p66, Table 10-5).
pub const CMD_MAX_EXECUTION_TIME_MS: u64 = 200 + 50;

/// count (1) + opcode (1) + param1 (1) + param2 (2) + crc16 (2)
pub const CMD_MIN_LEN: usize = 7;
/// count (1) + status/data (1) + crc16 (2)
pub const RESPONSE_MIN_LEN: usize = 4;
/// The count field is a single byte.
pub const CMD_MAX_LEN: usize = 0xFF;
pub const CMD_MAX_DATA_LEN: usize = CMD_MAX_LEN - CMD_MIN_LEN;

pub const CRC16_POLY: u16 = 0x8005;

// Opcodes (p72, 11. Detailed Command Descriptions)
pub const OP_READ: u8 = 0x02;
pub const OP_SHA: u8 = 0x47;
pub const OP_SELF_TEST: u8 = 0x77;

// Read: param1 0x80 selects a 32-byte read of the configuration zone
pub const READ_ZONE_CONFIG_32: u8 = 0x80;
pub const CONFIG_BLOCK_SIZE: usize = 32;

// SelfTest: param1 0x3B runs every available test (p100, Table 11-43)
pub const SELF_TEST_MODE_ALL: u8 = 0x3B;

pub const SHA_BLOCK_SIZE: usize = 64;
pub const SHA256_DIGEST_SIZE: usize = 32;

// Serial number is bytes <0:3> and <8:12> of config block 0,
// revision is bytes <4:7>.
pub const SERIAL_NUMBER_SIZE: usize = 9;
pub const REVISION_SIZE: usize = 4;
