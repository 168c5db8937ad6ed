//! Command library - operations composed from single command exchanges.
//!
//! - `info`: serial number and revision from the configuration zone
//! - `self_test`: run every built-in self test
//! - `sha`: SHA-256 over an arbitrary message, streamed in 64-byte blocks

pub mod info;
pub mod sha;

pub use info::DeviceIdentity;
pub use self_test::{SelfTestBit, SelfTestReport};
pub use sha::{Message, Sha256Digest};
