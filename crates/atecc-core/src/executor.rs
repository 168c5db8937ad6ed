//! Command execution.
//!
//! One exchange is: write the command frame, wait for execution, reset the
//! address counter, read the response length, read the response, verify it
//! (p55, Table 9-1, ATECC508A; p63, Table 10-1, ATECC608A).

use std::ops::{Deref, DerefMut};

use tracing::{debug, instrument};

use crate::device::AteccDevice;
use crate::error::Result;
use crate::events::{AteccEvent, AteccObserver};
use crate::protocol::constants::{WORD_ADDR_COMMAND, WORD_ADDR_RESET};
use crate::protocol::packet::{Command, Response};
use crate::transport::BusTransport;

/// An awake device. Dropping the guard puts the device in idle mode, on
/// every exit path.
pub struct SessionGuard<'a, T: BusTransport, O: AteccObserver> {
    device: &'a mut AteccDevice<T, O>,
}

impl<T: BusTransport, O: AteccObserver> Deref for SessionGuard<'_, T, O> {
    type Target = AteccDevice<T, O>;

    fn deref(&self) -> &Self::Target {
        self.device
    }
}

impl<T: BusTransport, O: AteccObserver> DerefMut for SessionGuard<'_, T, O> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.device
    }
}

impl<T: BusTransport, O: AteccObserver> Drop for SessionGuard<'_, T, O> {
    fn drop(&mut self) {
        // Failure is already logged and emitted by idle().
        let _ = self.device.idle();
    }
}

impl<T: BusTransport, O: AteccObserver> AteccDevice<T, O> {
    /// Wake the device and hold it awake until the guard is dropped.
    pub fn session(&mut self) -> Result<SessionGuard<'_, T, O>> {
        self.wake()?;
        Ok(SessionGuard { device: self })
    }

    /// Execute one command.
    ///
    /// With `wake` set the command runs in its own wake/idle session;
    /// otherwise the caller is responsible for the power sequence.
    #[instrument(skip(self, command), fields(opcode = %command.opcode, param1 = command.param1, param2 = command.param2, len = command.data.len()))]
    pub fn execute(&mut self, command: &Command, wake: bool) -> Result<Response> {
        if wake {
            let mut session = self.session()?;
            return session.exchange(command);
        }
        self.exchange(command)
    }

    fn exchange(&mut self, command: &Command) -> Result<Response> {
        let address = self.config().address;
        let frame = command.to_bytes()?;

        self.bus_write(address, WORD_ADDR_COMMAND, &frame)?;

        self.settle();

        self.bus_write(address, WORD_ADDR_RESET, &[0x00])?;

        // The output FIFO is shared among status, error and command results.
        // The first read tells how many bytes it holds (p64, 10.3).
        let count = self.bus_read(address, WORD_ADDR_COMMAND, 1)?;
        let len = count.first().copied().unwrap_or_default() as usize;

        let res = self.bus_read(address, WORD_ADDR_COMMAND, len)?;
        let response = Response::from_bytes(&res)?;

        debug!(len = response.len(), status = ?response.status(), "Response verified");
        self.emit(AteccEvent::CommandComplete {
            opcode: command.opcode,
            response_len: response.len(),
        });
        Ok(response)
    }
}
