//! Transport layer module.

pub mod hal;
pub mod mock;
pub mod traits;

pub use hal::HalTransport;
pub use mock::{BusRead, BusWrite, MockTransport};
pub use traits::{BusTransport, TransportError};
