//! Packet types and the caller-facing handler interface
//!
//! A [`RadioPacket`] carries the on-air bytes plus per-direction metadata.
//! The first data byte is always the payload length, matching the chip's
//! variable-length packet convention, so the buffer can be streamed into
//! the FIFO unchanged. Buffer ownership moves with the packet value: the
//! caller hands a packet to the driver for the duration of a transfer and
//! gets it back through exactly one [`PacketHandler`] call.

use heapless::Vec;

use crate::config::channel::TxConfig;

/// Chip FIFO size, and so the largest frame the driver handles
pub const MAX_PACKET_SIZE: usize = 64;

/// Largest payload that fits a frame alongside the length byte
pub const MAX_PAYLOAD_SIZE: usize = MAX_PACKET_SIZE - 1;

/// Reception metadata appended by the chip to each received frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxMeta {
    /// Signal strength of the received frame in dBm
    pub rssi_dbm: i16,
    /// Demodulator link quality estimate
    pub link_quality: u8,
    /// Whether the frame's CRC checked out
    pub crc_ok: bool,
}

/// A packet moving through the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadioPacket {
    /// Frame bytes; `data[0]` is the payload length
    pub data: Vec<u8, MAX_PACKET_SIZE>,
    /// Transmit parameters, present on packets built for sending
    pub tx_meta: Option<TxConfig>,
    /// Reception metadata, filled in by the driver on completed receives
    pub rx_meta: Option<RxMeta>,
}

impl RadioPacket {
    /// Create an empty packet with no metadata
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            tx_meta: None,
            rx_meta: None,
        }
    }

    /// Build a packet ready for [`send_packet`](crate::phy::Cc1101::send_packet)
    ///
    /// Prepends the length byte. Returns `None` when the payload exceeds
    /// [`MAX_PAYLOAD_SIZE`].
    pub fn for_tx(payload: &[u8], tx_meta: TxConfig) -> Option<Self> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return None;
        }
        let mut data = Vec::new();
        data.push(payload.len() as u8).ok()?;
        data.extend_from_slice(payload).ok()?;
        Some(Self {
            data,
            tx_meta: Some(tx_meta),
            rx_meta: None,
        })
    }

    /// The payload bytes, without the leading length byte
    pub fn payload(&self) -> &[u8] {
        if self.data.is_empty() {
            &[]
        } else {
            &self.data[1..]
        }
    }
}

impl Default for RadioPacket {
    fn default() -> Self {
        Self::new()
    }
}

/// Caller-side packet lifecycle and completion interface
///
/// The Rust rendition of the five callbacks an upper stack registers with
/// the driver. A handler value is bound once at construction, so every
/// operation is guaranteed present before the driver can invoke any of
/// them. Each method is called at most once per logical event, from the
/// same context that invoked the driver entry point (the completion
/// methods run in the interrupt bridge's context).
pub trait PacketHandler {
    /// Provide a buffer for an incoming frame of `length` bytes
    ///
    /// Returning `None` drops the frame; the driver drains it from the
    /// chip and reports the failure to the interrupt shim.
    fn alloc_packet(&mut self, length: usize) -> Option<RadioPacket>;

    /// Take back a packet the driver will not deliver through a
    /// completion call (currently: sends rejected while busy)
    fn release_packet(&mut self, packet: RadioPacket);

    /// A frame was received; `rx_meta` is filled in
    fn rx_complete(&mut self, packet: RadioPacket);

    /// The given packet finished transmitting
    fn tx_complete(&mut self, packet: RadioPacket);

    /// Signal strength measured for the frame being delivered next
    fn rssi_valid(&mut self, rssi_dbm: i16);
}
