//! Channel and modulation configuration
//!
//! This module contains the abstract descriptor types the caller uses to
//! say *what* to transmit or listen on. It includes:
//! - Channel descriptors (band, rate class, coding, center frequency)
//! - Per-operation transmit and receive parameter records
//! - Validation of the combinations this driver revision supports

/// Channel descriptor types and validation
pub mod channel;

pub use channel::{ChannelId, RxConfig, TxConfig};
