//! Protocol module - ATECC wire definitions.

pub mod constants;
pub mod opcode;
pub mod packet;
pub mod status;

pub use constants::*;
pub use opcode::{Opcode, ShaMode};
pub use packet::{Command, Response};
pub use status::Status;
