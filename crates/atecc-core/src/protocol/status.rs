//! Device status/error codes.
//!
//! A 4-byte response carries one of these in place of command data
//! (p64-65, Table 10-3).

use std::fmt;

/// Status byte returned by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    ChecksumOrVerifyMiscompare,
    ParseError,
    EccFault,
    SelfTestError,
    HealthTestError,
    ExecutionError,
    AfterWakeBeforeFirstCommand,
    WatchdogExpiringSoon,
    CommunicationError,
    /// Byte outside the documented table.
    Unknown(u8),
}

/// Known codes and their meaning.
const STATUS_TABLE: [(u8, Status, &str); 10] = [
    (0x00, Status::Success, "successful command execution"),
    (0x01, Status::ChecksumOrVerifyMiscompare, "checkmac or verify miscompare"),
    (0x03, Status::ParseError, "parse error"),
    (0x05, Status::EccFault, "ECC fault"),
    (0x07, Status::SelfTestError, "self test error"),
    (0x08, Status::HealthTestError, "health test error"),
    (0x0F, Status::ExecutionError, "execution error"),
    (0x11, Status::AfterWakeBeforeFirstCommand, "after wake, prior to first command"),
    (0xEE, Status::WatchdogExpiringSoon, "watchdog about to expire"),
    (0xFF, Status::CommunicationError, "CRC or other communications error"),
];

impl Status {
    /// Raw status byte.
    pub fn code(&self) -> u8 {
        match self {
            Status::Unknown(code) => *code,
            known => STATUS_TABLE
                .iter()
                .find(|(_, status, _)| status == known)
                .map(|(code, _, _)| *code)
                .unwrap_or_default(),
        }
    }

    /// Human-readable reason.
    pub fn description(&self) -> &'static str {
        STATUS_TABLE
            .iter()
            .find(|(_, status, _)| status == self)
            .map(|(_, _, text)| *text)
            .unwrap_or("unknown status code")
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Status::Unknown(_))
    }

    /// Whether the code reports a failed command.
    ///
    /// Failures occupy 0x01..=0x0F plus 0xFF. The remaining known codes
    /// (after-wake, watchdog) are informational.
    pub fn is_error(&self) -> bool {
        if !self.is_known() || *self == Status::Success {
            return false;
        }
        let code = self.code();
        code <= 0x0F || code == 0xFF
    }
}

impl From<u8> for Status {
    fn from(code: u8) -> Self {
        STATUS_TABLE
            .iter()
            .find(|(c, _, _)| *c == code)
            .map(|(_, status, _)| *status)
            .unwrap_or(Status::Unknown(code))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Unknown(code) => write!(f, "invalid status/error code: {:02x}", code),
            known => f.write_str(known.description()),
        }
    }
}
