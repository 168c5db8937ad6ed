//! atecc-core: Microchip ATECC608 secure element driver.
//!
//! Implements the ATECC608A/B I2C command/response protocol: command framing,
//! CRC-16 checksums, wake/idle/sleep power control and response validation,
//! plus a few composed operations on top.
//!
//! # Architecture
//!
//! The crate is organized into layers:
//!
//! - **Checksum**: CRC-16 (polynomial 0x8005) frame check
//! - **Protocol**: Constants, opcodes, status codes, frame codec
//! - **Transport**: Bus abstraction (embedded-hal, mock)
//! - **Power**: Wake, sleep and idle sequences
//! - **Executor**: One command exchange, optionally inside a wake/idle session
//! - **Commands**: Identity read, self test, streaming SHA-256
//! - **Events**: Observer pattern for diagnostic traces
//!
//! All cryptography runs inside the chip; this crate only moves bytes.
//!
//! # Example
//!
//! ```no_run
//! use atecc_core::{AteccDevice, DeviceConfig, MockTransport};
//!
//! let mut device = AteccDevice::new(MockTransport::new(), DeviceConfig::default());
//! let identity = device.info().expect("identity read failed");
//! println!("{}", identity);
//! ```

pub mod checksum;
pub mod commands;
pub mod config;
pub mod device;
pub mod error;
pub mod events;
pub mod executor;
pub mod power;
pub mod protocol;
pub mod transport;

// Re-exports for convenience
pub use commands::{DeviceIdentity, Message, SelfTestBit, SelfTestReport, Sha256Digest};
pub use config::DeviceConfig;
pub use device::AteccDevice;
pub use error::{Error, Result};
pub use events::{AteccEvent, AteccObserver, NullObserver, RecordingObserver, TracingObserver};
pub use executor::SessionGuard;
pub use power::PowerState;
pub use protocol::{Command, Opcode, Response, ShaMode, Status};
pub use transport::{BusTransport, HalTransport, MockTransport, TransportError};
