//! ATECC608 driver handle.
//!
//! Owns the bus transport, the device configuration and an event observer.
//! Power control lives in [`crate::power`], command exchange in
//! [`crate::executor`] and the composed operations in [`crate::commands`].

use std::sync::Arc;
use std::thread;

use crate::config::DeviceConfig;
use crate::events::{AteccEvent, AteccObserver, PacketDirection, TracingObserver};
use crate::power::PowerState;
use crate::transport::{BusTransport, TransportError};

/// One secure element on one bus.
///
/// Every bus operation takes `&mut self`; share a device between threads by
/// wrapping it in a `Mutex` held for the whole operation.
pub struct AteccDevice<T: BusTransport, O: AteccObserver = TracingObserver> {
    transport: T,
    config: DeviceConfig,
    observer: Arc<O>,
    power: PowerState,
}

impl<T: BusTransport> AteccDevice<T, TracingObserver> {
    /// Create a driver with the default tracing observer.
    pub fn new(transport: T, config: DeviceConfig) -> Self {
        Self::with_observer(transport, config, Arc::new(TracingObserver))
    }
}

impl<T: BusTransport, O: AteccObserver> AteccDevice<T, O> {
    /// Create a driver with a custom observer.
    pub fn with_observer(transport: T, config: DeviceConfig, observer: Arc<O>) -> Self {
        Self {
            transport,
            config,
            observer,
            power: PowerState::Dormant,
        }
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Power state as last driven by this handle. The chip does not report it.
    pub fn power_state(&self) -> PowerState {
        self.power
    }

    pub fn observer(&self) -> &Arc<O> {
        &self.observer
    }

    /// Give the transport back.
    pub fn into_transport(self) -> T {
        self.transport
    }

    pub(crate) fn emit(&self, event: AteccEvent) {
        self.observer.on_event(&event);
    }

    pub(crate) fn set_power(&mut self, to: PowerState) {
        if self.power != to {
            let from = self.power;
            self.power = to;
            self.emit(AteccEvent::PowerChanged { from, to });
        }
    }

    /// Block for the configured command execution time.
    pub(crate) fn settle(&self) {
        let delay = self.config.exec_time();
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    pub(crate) fn bus_write(
        &mut self,
        address: u8,
        register: u8,
        data: &[u8],
    ) -> Result<(), TransportError> {
        self.transport.write(address, register, data)?;
        self.emit(AteccEvent::Packet {
            direction: PacketDirection::Tx,
            address,
            register,
            data: data.to_vec(),
        });
        Ok(())
    }

    pub(crate) fn bus_read(
        &mut self,
        address: u8,
        register: u8,
        len: usize,
    ) -> Result<Vec<u8>, TransportError> {
        let data = self.transport.read(address, register, len)?;
        self.emit(AteccEvent::Packet {
            direction: PacketDirection::Rx,
            address,
            register,
            data: data.clone(),
        });
        Ok(data)
    }
}
