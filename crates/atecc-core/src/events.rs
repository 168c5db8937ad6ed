//! Event system for diagnostic trace decoupling.
//!
//! Lets a CLI or test harness observe bus traffic and power transitions
//! without the driver knowing how they are presented.

use std::fmt;
use std::sync::Mutex;

use crate::power::PowerState;
use crate::protocol::Opcode;

/// Bus transfer direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketDirection {
    Tx, // Host -> Device
    Rx, // Device -> Host
}

impl fmt::Display for PacketDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacketDirection::Tx => write!(f, "TX"),
            PacketDirection::Rx => write!(f, "RX"),
        }
    }
}

/// Events emitted by the driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AteccEvent {
    /// Driver-tracked power state changed.
    PowerChanged { from: PowerState, to: PowerState },
    /// A bus transfer completed.
    Packet {
        direction: PacketDirection,
        address: u8,
        register: u8,
        data: Vec<u8>,
    },
    /// A best-effort write failed and was discarded.
    Discarded { operation: &'static str, error: String },
    /// A command exchange finished with a verified response.
    CommandComplete { opcode: Opcode, response_len: usize },
}

/// Observer trait for receiving driver events.
pub trait AteccObserver: Send + Sync {
    fn on_event(&self, event: &AteccEvent);
}

/// No-op observer that discards all events.
pub struct NullObserver;

impl AteccObserver for NullObserver {
    fn on_event(&self, _event: &AteccEvent) {}
}

/// Observer that logs events using tracing.
pub struct TracingObserver;

impl AteccObserver for TracingObserver {
    fn on_event(&self, event: &AteccEvent) {
        match event {
            AteccEvent::PowerChanged { from, to } => {
                tracing::debug!(from = %from, to = %to, "Power state changed");
            }
            AteccEvent::Packet {
                direction,
                address,
                register,
                data,
            } => {
                tracing::debug!(
                    dir = %direction,
                    addr = %format!("0x{:02X}", address),
                    reg = %format!("0x{:02X}", register),
                    bytes = %hex::encode_upper(data),
                    "Bus transfer"
                );
            }
            AteccEvent::Discarded { operation, error } => {
                tracing::debug!(operation, error = %error, "Ignoring best-effort failure");
            }
            AteccEvent::CommandComplete {
                opcode,
                response_len,
            } => {
                tracing::debug!(opcode = %opcode, response_len, "Command complete");
            }
        }
    }
}

/// Observer that keeps every event, for tests and post-mortem dumps.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<AteccEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AteccEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Power transitions seen so far, in order.
    pub fn power_transitions(&self) -> Vec<PowerState> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                AteccEvent::PowerChanged { to, .. } => Some(to),
                _ => None,
            })
            .collect()
    }
}

impl AteccObserver for RecordingObserver {
    fn on_event(&self, event: &AteccEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
