//! Power-state control: wake, sleep and idle.
//!
//! (p47-49, 7.1 I/O Conditions and 7.2-7.3 Sleep/Idle sequences)

use std::fmt;

use tracing::{info, instrument, warn};

use crate::device::AteccDevice;
use crate::error::{Error, Result};
use crate::events::{AteccEvent, AteccObserver};
use crate::protocol::constants::{
    RESPONSE_MIN_LEN, WAKE_ADDRESS, WAKE_REGISTER, WORD_ADDR_IDLE, WORD_ADDR_RESET,
    WORD_ADDR_SLEEP,
};
use crate::protocol::packet::Response;
use crate::transport::{BusTransport, TransportError};

/// Driver-tracked power state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerState {
    /// Asleep; volatile state (including any SHA context) is lost.
    #[default]
    Dormant,
    /// Awake and accepting commands.
    Awake,
    /// Idle; volatile state is retained until the next wake.
    Idle,
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PowerState::Dormant => write!(f, "DORMANT"),
            PowerState::Awake => write!(f, "AWAKE"),
            PowerState::Idle => write!(f, "IDLE"),
        }
    }
}

impl<T: BusTransport, O: AteccObserver> AteccDevice<T, O> {
    /// Wake the device. Needed before every new command session.
    #[instrument(skip(self))]
    pub fn wake(&mut self) -> Result<()> {
        // Writing 0x00 to address 0 holds SDA low for the wake pulse.
        // Nothing acknowledges it, so the real device always reports an
        // error here; it carries no information.
        if let Err(e) = self.bus_write(WAKE_ADDRESS, WAKE_REGISTER, &[0x00]) {
            self.emit(AteccEvent::Discarded {
                operation: "wake pulse",
                error: e.to_string(),
            });
        }

        self.settle();

        // A successful wake leaves the 0x11 status in the output buffer.
        let address = self.config().address;
        let res = self.bus_read(address, WORD_ADDR_RESET, RESPONSE_MIN_LEN)?;

        match Response::from_bytes(&res) {
            Ok(response) => {
                info!(status = ?response.status(), "Device awake");
                self.set_power(PowerState::Awake);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Wake-up verification failed");
                Err(Error::WakeFailed(Box::new(e)))
            }
        }
    }

    /// Put the device to sleep. Required at the end of each command sequence.
    ///
    /// Best-effort: the result is returned for auditing, callers usually
    /// discard it.
    #[instrument(skip(self))]
    pub fn sleep(&mut self) -> std::result::Result<(), TransportError> {
        self.power_write(WORD_ADDR_SLEEP, PowerState::Dormant, "sleep")
    }

    /// Put the device in idle mode, keeping its volatile state.
    ///
    /// Best-effort, like [`AteccDevice::sleep`].
    #[instrument(skip(self))]
    pub fn idle(&mut self) -> std::result::Result<(), TransportError> {
        self.power_write(WORD_ADDR_IDLE, PowerState::Idle, "idle")
    }

    fn power_write(
        &mut self,
        word_address: u8,
        to: PowerState,
        operation: &'static str,
    ) -> std::result::Result<(), TransportError> {
        let address = self.config().address;
        let result = self.bus_write(address, word_address, &[]);
        match &result {
            Ok(()) => self.set_power(to),
            Err(e) => {
                warn!(operation, error = %e, "Power-state write failed");
                self.emit(AteccEvent::Discarded {
                    operation,
                    error: e.to_string(),
                });
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeviceConfig;
    use crate::protocol::Status;
    use crate::protocol::packet::encode_response;
    use crate::transport::MockTransport;

    fn device(mock: &MockTransport) -> AteccDevice<MockTransport> {
        let config = DeviceConfig {
            exec_time_ms: 0,
            ..Default::default()
        };
        AteccDevice::new(mock.clone(), config)
    }

    #[test]
    fn test_wake_sequence() {
        let mock = MockTransport::new();
        mock.queue_wake();
        let mut dev = device(&mock);

        dev.wake().unwrap();
        assert_eq!(dev.power_state(), PowerState::Awake);

        let writes = mock.get_writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].address, WAKE_ADDRESS);
        assert_eq!(writes[0].register, 0x00);
        assert_eq!(writes[0].data, vec![0x00]);

        let reads = mock.get_reads();
        assert_eq!(reads.len(), 1);
        assert_eq!(reads[0].address, 0x60);
        assert_eq!(reads[0].register, 0x00);
        assert_eq!(reads[0].len, 4);
    }

    #[test]
    fn test_wake_accepts_success_status() {
        let mock = MockTransport::new();
        mock.queue_status(Status::Success);
        assert!(device(&mock).wake().is_ok());
    }

    #[test]
    fn test_wake_pulse_ack_is_fine() {
        let mock = MockTransport::new();
        mock.ack_address(WAKE_ADDRESS);
        mock.queue_wake();
        assert!(device(&mock).wake().is_ok());
    }

    #[test]
    fn test_wake_bad_checksum_fails() {
        let mock = MockTransport::new();
        mock.queue_read(&[0x04, 0x11, 0x00, 0x00]);
        let mut dev = device(&mock);

        let err = dev.wake().unwrap_err();
        assert!(matches!(err, Error::WakeFailed(ref inner) if matches!(**inner, Error::ChecksumMismatch { .. })));
        assert_eq!(dev.power_state(), PowerState::Dormant);
    }

    #[test]
    fn test_wake_error_status_fails() {
        let mock = MockTransport::new();
        mock.queue_read(&encode_response(&[0xFF]));
        let err = device(&mock).wake().unwrap_err();
        assert!(matches!(err, Error::WakeFailed(_)));
        assert_eq!(err.status(), Some(Status::CommunicationError));
    }

    #[test]
    fn test_wake_short_read_fails() {
        let mock = MockTransport::new();
        mock.queue_read(&[0x04, 0x11]);
        let err = device(&mock).wake().unwrap_err();
        assert!(matches!(err, Error::WakeFailed(ref inner) if matches!(**inner, Error::MalformedFrame { .. })));
    }

    #[test]
    fn test_wake_transport_error_propagates() {
        let mock = MockTransport::new();
        mock.queue_read_error("arbitration lost");
        let err = device(&mock).wake().unwrap_err();
        assert!(err.is_transport());
    }

    #[test]
    fn test_sleep_and_idle_writes() {
        let mock = MockTransport::new();
        let mut dev = device(&mock);

        dev.idle().unwrap();
        assert_eq!(dev.power_state(), PowerState::Idle);
        dev.sleep().unwrap();
        assert_eq!(dev.power_state(), PowerState::Dormant);

        let writes = mock.get_writes();
        assert_eq!(writes[0].register, WORD_ADDR_IDLE);
        assert!(writes[0].data.is_empty());
        assert_eq!(writes[1].register, WORD_ADDR_SLEEP);
        assert_eq!(writes[1].address, 0x60);
    }

    #[test]
    fn test_sleep_failure_is_reported_not_raised() {
        let mock = MockTransport::new();
        mock.nak_address(0x60);
        let mut dev = device(&mock);

        let result = dev.sleep();
        assert!(matches!(result, Err(TransportError::Nak { address: 0x60 })));
    }
}
