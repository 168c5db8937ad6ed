//! Mock bus transport for testing.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::traits::{BusTransport, TransportError};
use crate::protocol::constants::{WAKE_ADDRESS, WORD_ADDR_COMMAND};
use crate::protocol::packet::encode_response;
use crate::protocol::status::Status;

/// A captured write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusWrite {
    pub address: u8,
    pub register: u8,
    pub data: Vec<u8>,
}

/// A captured read request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusRead {
    pub address: u8,
    pub register: u8,
    pub len: usize,
}

/// Mock transport for unit testing driver logic.
///
/// Clones share state, so a test can keep one handle while the driver owns
/// another.
#[derive(Clone)]
pub struct MockTransport {
    /// Queued read results, returned in order regardless of register.
    read_queue: Arc<Mutex<VecDeque<Result<Vec<u8>, String>>>>,
    /// Captured writes.
    write_log: Arc<Mutex<Vec<BusWrite>>>,
    /// Captured reads.
    read_log: Arc<Mutex<Vec<BusRead>>>,
    /// Addresses that NAK every write.
    nak_addresses: Arc<Mutex<Vec<u8>>>,
    /// Whether the bus is "connected".
    connected: Arc<Mutex<bool>>,
}

impl MockTransport {
    /// New mock where, like real hardware, nothing answers the wake address.
    pub fn new() -> Self {
        Self {
            read_queue: Arc::new(Mutex::new(VecDeque::new())),
            write_log: Arc::new(Mutex::new(Vec::new())),
            read_log: Arc::new(Mutex::new(Vec::new())),
            nak_addresses: Arc::new(Mutex::new(vec![WAKE_ADDRESS])),
            connected: Arc::new(Mutex::new(true)),
        }
    }

    /// Queue raw bytes to be returned on the next read.
    pub fn queue_read(&self, bytes: &[u8]) {
        self.read_queue.lock().unwrap().push_back(Ok(bytes.to_vec()));
    }

    /// Queue a failing read.
    pub fn queue_read_error(&self, message: &str) {
        self.read_queue
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    /// Queue the 4-byte status frame the device returns after wake-up.
    pub fn queue_wake(&self) {
        self.queue_status(Status::AfterWakeBeforeFirstCommand);
    }

    /// Queue a bare status frame, as read during wake-up.
    pub fn queue_status(&self, status: Status) {
        self.queue_read(&encode_response(&[status.code()]));
    }

    /// Queue a command response: the length byte read followed by the frame.
    pub fn queue_response(&self, payload: &[u8]) {
        let frame = encode_response(payload);
        self.queue_read(&frame[..1]);
        self.queue_read(&frame);
    }

    /// Make every write to `address` fail with a NAK.
    pub fn nak_address(&self, address: u8) {
        self.nak_addresses.lock().unwrap().push(address);
    }

    /// Let writes to `address` succeed again.
    pub fn ack_address(&self, address: u8) {
        self.nak_addresses.lock().unwrap().retain(|&a| a != address);
    }

    /// Get all captured writes.
    pub fn get_writes(&self) -> Vec<BusWrite> {
        self.write_log.lock().unwrap().clone()
    }

    /// Get all captured reads.
    pub fn get_reads(&self) -> Vec<BusRead> {
        self.read_log.lock().unwrap().clone()
    }

    /// Captured command frames, in order.
    pub fn command_frames(&self) -> Vec<Vec<u8>> {
        self.get_writes()
            .into_iter()
            .filter(|w| w.register == WORD_ADDR_COMMAND)
            .map(|w| w.data)
            .collect()
    }

    /// Number of queued reads not yet consumed.
    pub fn pending_reads(&self) -> usize {
        self.read_queue.lock().unwrap().len()
    }

    /// Clear captured writes and reads.
    pub fn clear_log(&self) {
        self.write_log.lock().unwrap().clear();
        self.read_log.lock().unwrap().clear();
    }

    /// Simulate the bus going away.
    pub fn disconnect(&self) {
        *self.connected.lock().unwrap() = false;
    }

    pub fn reconnect(&self) {
        *self.connected.lock().unwrap() = true;
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl BusTransport for MockTransport {
    fn write(&mut self, address: u8, register: u8, data: &[u8]) -> Result<(), TransportError> {
        if !*self.connected.lock().unwrap() {
            return Err(TransportError::Disconnected);
        }
        self.write_log.lock().unwrap().push(BusWrite {
            address,
            register,
            data: data.to_vec(),
        });
        if self.nak_addresses.lock().unwrap().contains(&address) {
            return Err(TransportError::Nak { address });
        }
        Ok(())
    }

    fn read(&mut self, address: u8, register: u8, len: usize) -> Result<Vec<u8>, TransportError> {
        if !*self.connected.lock().unwrap() {
            return Err(TransportError::Disconnected);
        }
        self.read_log.lock().unwrap().push(BusRead {
            address,
            register,
            len,
        });
        match self.read_queue.lock().unwrap().pop_front() {
            Some(Ok(bytes)) => Ok(bytes),
            Some(Err(message)) => Err(TransportError::ReadFailed(message)),
            None => Err(TransportError::Timeout { timeout_ms: 0 }),
        }
    }
}
