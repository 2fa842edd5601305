//! Register/strobe transport abstraction
//!
//! The driver talks to the chip exclusively through the [`Transport`]
//! trait: single strobes, single and burst register access, and masking of
//! the completion interrupt line. A SPI/GPIO implementation is provided in
//! [`spi`]; a register-mapped radio core can implement the same trait.

/// Transport trait definitions
pub mod traits;

/// SPI/GPIO transport implementation
pub mod spi;

pub use spi::SpiTransport;
pub use traits::{InterruptControl, Transport};
