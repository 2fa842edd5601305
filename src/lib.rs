//! CC1101 packet-radio PHY driver in Rust
//!
//! This crate drives a TI CC1101 sub-GHz transceiver through its Idle/Rx/Tx
//! operating states and bridges the chip's end-of-packet interrupt to a
//! packet-oriented handler interface used by an upper protocol stack.
//! Register access goes through a pluggable transport so the same driver
//! runs over SPI/GPIO or a memory-mapped radio core.
//!
//! # Features
//! - Explicit Idle/Rx/Tx state machine with interrupt-masked transitions
//! - Channel descriptor to register-value translation with typed validation
//! - Packet ownership handed back to the caller through completion callbacks
//! - Hardware abstraction layer for the register/strobe transport
//! - No unsafe code
//!
//! # Example
//! ```no_run
//! use cc1101_phy::{
//!     config::channel::{Band, ChannelId, Coding, RateClass, TxConfig},
//!     packet::RadioPacket,
//!     phy::Cc1101,
//! };
//! # use cc1101_phy::packet::PacketHandler;
//! # use cc1101_phy::transport::Transport;
//! # struct NoopTransport;
//! # impl Transport for NoopTransport {
//! #     type Error = ();
//! #     fn reset(&mut self) -> Result<(), ()> { Ok(()) }
//! #     fn strobe(&mut self, _: u8) -> Result<(), ()> { Ok(()) }
//! #     fn write_register(&mut self, _: u8, _: u8) -> Result<(), ()> { Ok(()) }
//! #     fn read_register(&mut self, _: u8) -> Result<u8, ()> { Ok(0) }
//! #     fn write_burst(&mut self, _: u8, _: &[u8]) -> Result<(), ()> { Ok(()) }
//! #     fn read_burst(&mut self, _: u8, _: &mut [u8]) -> Result<(), ()> { Ok(()) }
//! #     fn set_interrupt_enabled(&mut self, _: bool) -> Result<(), ()> { Ok(()) }
//! # }
//! # struct NoopHandler;
//! # impl PacketHandler for NoopHandler {
//! #     fn alloc_packet(&mut self, _: usize) -> Option<RadioPacket> { Some(RadioPacket::new()) }
//! #     fn release_packet(&mut self, _: RadioPacket) {}
//! #     fn rx_complete(&mut self, _: RadioPacket) {}
//! #     fn tx_complete(&mut self, _: RadioPacket) {}
//! #     fn rssi_valid(&mut self, _: i16) {}
//! # }
//!
//! // Channel 0 in the 433 MHz band, normal rate, PN9 whitening
//! let channel = ChannelId::new(Band::Band433, RateClass::NormalRate, Coding::Pn9, 0);
//!
//! // Driver construction resets the chip and applies the default settings
//! let mut radio = Cc1101::new(NoopTransport, NoopHandler).unwrap();
//!
//! // Queue a payload for transmission; completion arrives via the handler
//! let packet = RadioPacket::for_tx(b"Hello", TxConfig { channel, eirp_dbm: 0 }).unwrap();
//! radio.send_packet(packet).unwrap();
//! ```

#![warn(missing_docs)]
#![no_std]

/// Channel and modulation configuration
pub mod config;

/// Packet types and the caller-facing handler interface
pub mod packet;

/// Radio state machine and public driver API
pub mod phy;

/// Register map, strobe commands and settings translation
pub mod registers;

/// Register/strobe transport abstraction
pub mod transport;
