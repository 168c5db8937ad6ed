//! Command opcodes and mode bytes.

use std::fmt;

use super::constants::{OP_READ, OP_SELF_TEST, OP_SHA};

/// Supported commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Read,
    SelfTest,
    Sha,
}

impl Opcode {
    pub const fn code(&self) -> u8 {
        match self {
            Opcode::Read => OP_READ,
            Opcode::SelfTest => OP_SELF_TEST,
            Opcode::Sha => OP_SHA,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            OP_READ => Some(Opcode::Read),
            OP_SELF_TEST => Some(Opcode::SelfTest),
            OP_SHA => Some(Opcode::Sha),
            _ => None,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opcode::Read => write!(f, "Read"),
            Opcode::SelfTest => write!(f, "SelfTest"),
            Opcode::Sha => write!(f, "SHA"),
        }
    }
}

/// SHA command mode, carried in param1 (p96, Table 11-37).
///
/// HMAC update shares its encoding with [`ShaMode::Sha256Update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaMode {
    Sha256Start,
    Sha256Update,
    Sha256End,
    Sha256Public,
    HmacStart,
    HmacEnd,
    ReadContext,
    WriteContext,
}

impl ShaMode {
    pub const fn code(&self) -> u8 {
        match self {
            ShaMode::Sha256Start => 0x00,
            ShaMode::Sha256Update => 0x01,
            ShaMode::Sha256End => 0x02,
            ShaMode::Sha256Public => 0x03,
            ShaMode::HmacStart => 0x04,
            ShaMode::HmacEnd => 0x05,
            ShaMode::ReadContext => 0x06,
            ShaMode::WriteContext => 0x07,
        }
    }
}

impl From<ShaMode> for u8 {
    fn from(mode: ShaMode) -> Self {
        mode.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_lookup() {
        for op in [Opcode::Read, Opcode::SelfTest, Opcode::Sha] {
            assert_eq!(Opcode::from_code(op.code()), Some(op));
        }
        assert_eq!(Opcode::from_code(0x00), None);
    }

    #[test]
    fn test_sha256_modes() {
        assert_eq!(u8::from(ShaMode::Sha256Start), 0);
        assert_eq!(u8::from(ShaMode::Sha256Update), 1);
        assert_eq!(u8::from(ShaMode::Sha256End), 2);
    }
}
