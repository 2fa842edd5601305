//! Radio state machine, event bridge and public driver API
//!
//! [`Cc1101`] owns the chip's operating state and the packet in flight.
//! The caller-context entry points ([`send_packet`](Cc1101::send_packet),
//! [`set_rx`](Cc1101::set_rx)) and the interrupt bridge
//! ([`handle_interrupt`](Cc1101::handle_interrupt)) are the only places
//! that state is mutated, and every mutation happens with the completion
//! interrupt masked, so the bridge can never observe a half-built
//! operation.

use crate::config::channel::{ConfigError, RxConfig};
use crate::packet::{PacketHandler, RadioPacket, RxMeta, MAX_PAYLOAD_SIZE};
use crate::registers::{
    self, channel_settings, pa_table_value, reg, status, strobe, ChannelSettings, RfSettings,
};
use crate::transport::Transport;

/// Radio operating state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RadioState {
    /// Chip flushed and powered down between operations
    Idle,
    /// Listening for a frame
    Rx,
    /// Clocking a frame out of the transmit FIFO
    Tx,
}

/// Driver error type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhyError<E> {
    /// Unsupported or malformed channel descriptor
    Config(ConfigError),
    /// An operation is already in flight
    Busy,
    /// Packet handed to send without transmit parameters
    MissingTxMeta,
    /// Completion interrupt fired in a state that cannot complete
    UnexpectedInterrupt,
    /// The handler declined to allocate a buffer for a received frame
    AllocFailed,
    /// Received frame does not fit the FIFO-sized packet buffer
    RxOverflow,
    /// Transport-level failure
    Transport(E),
}

impl<E> From<ConfigError> for PhyError<E> {
    fn from(error: ConfigError) -> Self {
        PhyError::Config(error)
    }
}

/// CC1101 packet-radio driver
///
/// Construction resets the chip and applies the default register table;
/// from then on the value is the single owner of `current_state` and the
/// in-flight packet. `&mut self` on every entry point makes concurrent
/// caller-context invocation unrepresentable; the interrupt race against
/// the hardware is closed by the masked sections described on each method.
pub struct Cc1101<T: Transport, H: PacketHandler> {
    transport: T,
    handler: H,
    settings: RfSettings,
    state: RadioState,
    current_packet: Option<RadioPacket>,
    rx_config: Option<RxConfig>,
}

impl<T: Transport, H: PacketHandler> Cc1101<T, H> {
    /// Initialize the driver: bind the handler, reset the chip and apply
    /// the full default register configuration
    ///
    /// The chip comes up masked and idle; nothing fires into the handler
    /// until an operation is started.
    pub fn new(mut transport: T, handler: H) -> Result<Self, PhyError<T::Error>> {
        let settings = RfSettings::default();

        transport
            .set_interrupt_enabled(false)
            .map_err(PhyError::Transport)?;
        transport.reset().map_err(PhyError::Transport)?;
        transport
            .write_burst(reg::IOCFG2, &settings.as_bytes())
            .map_err(PhyError::Transport)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("default rf settings applied");

        Ok(Self {
            transport,
            handler,
            settings,
            state: RadioState::Idle,
            current_packet: None,
            rx_config: None,
        })
    }

    /// Current operating state
    pub fn state(&self) -> RadioState {
        self.state
    }

    /// The register table applied at init
    pub fn rf_settings(&self) -> &RfSettings {
        &self.settings
    }

    /// The receive configuration currently armed, if any
    pub fn rx_config(&self) -> Option<&RxConfig> {
        self.rx_config.as_ref()
    }

    /// Borrow the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Borrow the bound packet handler
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Release the transport and handler
    pub fn free(self) -> (T, H) {
        (self.transport, self.handler)
    }

    /// Queue a packet for transmission
    ///
    /// Opens a masked section, rejects the call with [`PhyError::Busy`]
    /// while an operation is in flight (the packet goes back through
    /// `release_packet`), supersedes a pending receive, then drives the
    /// chip: force idle, flush the TX FIFO, retarget the channel and
    /// output power, calibrate, stream the frame into the FIFO, unmask the
    /// completion interrupt and strobe TX. Returns immediately; completion
    /// arrives through `tx_complete`.
    pub fn send_packet(&mut self, packet: RadioPacket) -> Result<(), PhyError<T::Error>> {
        if let Err(error) = self.mask_completion_interrupt() {
            self.handler.release_packet(packet);
            return Err(error);
        }

        if self.state == RadioState::Tx || self.current_packet.is_some() {
            self.handler.release_packet(packet);
            return Err(PhyError::Busy);
        }

        let tx_meta = match packet.tx_meta {
            Some(meta) => meta,
            None => {
                self.handler.release_packet(packet);
                return Err(PhyError::MissingTxMeta);
            }
        };

        // Translate before touching the chip so an unsupported descriptor
        // fails with no register write issued.
        let writes = match channel_settings(&tx_meta.channel) {
            Ok(writes) => writes,
            Err(error) => {
                self.handler.release_packet(packet);
                return Err(PhyError::Config(error));
            }
        };

        // A receive armed earlier is superseded along with its config.
        self.rx_config = None;
        self.state = RadioState::Tx;

        #[cfg(feature = "defmt")]
        defmt::trace!("tx {} bytes", packet.data.len());

        match self.start_tx(&packet, &writes, tx_meta.eirp_dbm) {
            Ok(()) => {
                self.current_packet = Some(packet);
                Ok(())
            }
            Err(error) => {
                self.state = RadioState::Idle;
                self.handler.release_packet(packet);
                Err(error)
            }
        }
    }

    /// Arm the receiver on the given channel
    ///
    /// Symmetric to [`send_packet`](Cc1101::send_packet): masked section,
    /// rejected while a transmit is in flight, otherwise force idle, flush
    /// the RX FIFO, retarget and calibrate, record the armed config,
    /// unmask the completion interrupt and strobe RX. A later
    /// `send_packet` may supersede the armed receive.
    pub fn set_rx(&mut self, config: RxConfig) -> Result<(), PhyError<T::Error>> {
        self.mask_completion_interrupt()?;

        if self.state == RadioState::Tx || self.current_packet.is_some() {
            return Err(PhyError::Busy);
        }

        let writes = channel_settings(&config.channel)?;

        self.transport
            .strobe(strobe::SIDLE)
            .map_err(PhyError::Transport)?;
        self.transport
            .strobe(strobe::SFRX)
            .map_err(PhyError::Transport)?;
        self.apply_channel_settings(&writes)?;
        self.transport
            .strobe(strobe::SCAL)
            .map_err(PhyError::Transport)?;

        self.state = RadioState::Rx;
        self.rx_config = Some(config);

        self.transport
            .set_interrupt_enabled(true)
            .map_err(PhyError::Transport)?;
        self.transport
            .strobe(strobe::SRX)
            .map_err(PhyError::Transport)
    }

    /// Event bridge: process one end-of-packet completion event
    ///
    /// Invoked by the platform's interrupt shim, exactly once per
    /// completion. The first action masks further completion interrupts,
    /// so the bridge cannot re-enter before the chip is idle again. A
    /// completion observed in `Idle` is a spurious event: no callback
    /// runs, the interrupt stays masked and the violation is reported to
    /// the shim, which owns the fault policy.
    pub fn handle_interrupt(&mut self) -> Result<(), PhyError<T::Error>> {
        self.mask_completion_interrupt()?;

        #[cfg(feature = "defmt")]
        defmt::trace!("end of packet interrupt");

        match self.state {
            RadioState::Tx => {
                let packet = self
                    .current_packet
                    .take()
                    .ok_or(PhyError::UnexpectedInterrupt)?;
                self.handler.tx_complete(packet);
                self.switch_to_idle()
            }
            RadioState::Rx => self.finish_rx(),
            RadioState::Idle => Err(PhyError::UnexpectedInterrupt),
        }
    }

    /// Open an interrupt-masked section
    ///
    /// Interrupts stay masked past the section unless the operation arms a
    /// new transfer as its final act.
    fn mask_completion_interrupt(&mut self) -> Result<(), PhyError<T::Error>> {
        self.transport
            .set_interrupt_enabled(false)
            .map_err(PhyError::Transport)
    }

    fn apply_channel_settings(&mut self, writes: &ChannelSettings) -> Result<(), PhyError<T::Error>> {
        for &(addr, value) in writes {
            self.transport
                .write_register(addr, value)
                .map_err(PhyError::Transport)?;
        }
        Ok(())
    }

    fn start_tx(
        &mut self,
        packet: &RadioPacket,
        writes: &ChannelSettings,
        eirp_dbm: i8,
    ) -> Result<(), PhyError<T::Error>> {
        self.transport
            .strobe(strobe::SIDLE)
            .map_err(PhyError::Transport)?;
        self.transport
            .strobe(strobe::SFTX)
            .map_err(PhyError::Transport)?;

        self.apply_channel_settings(writes)?;
        self.transport
            .write_register(registers::PATABLE, pa_table_value(eirp_dbm))
            .map_err(PhyError::Transport)?;
        // Retargeting moved the synthesizer; recalibrate before use.
        self.transport
            .strobe(strobe::SCAL)
            .map_err(PhyError::Transport)?;

        // data[0] is the length byte, so the buffer streams in unchanged.
        self.transport
            .write_burst(registers::FIFO, &packet.data)
            .map_err(PhyError::Transport)?;

        self.transport
            .set_interrupt_enabled(true)
            .map_err(PhyError::Transport)?;
        self.transport
            .strobe(strobe::STX)
            .map_err(PhyError::Transport)
    }

    fn finish_rx(&mut self) -> Result<(), PhyError<T::Error>> {
        self.rx_config = None;

        let available = self
            .transport
            .read_register(status::RXBYTES)
            .map_err(PhyError::Transport)?
            & registers::RXBYTES_MASK;
        if available == 0 {
            // Spurious completion with nothing in the FIFO.
            self.switch_to_idle()?;
            return Err(PhyError::UnexpectedInterrupt);
        }

        let length = self
            .transport
            .read_register(registers::FIFO)
            .map_err(PhyError::Transport)?;
        if length as usize > MAX_PAYLOAD_SIZE {
            self.switch_to_idle()?;
            return Err(PhyError::RxOverflow);
        }

        let mut packet = match self.handler.alloc_packet(length as usize) {
            Some(packet) => packet,
            None => {
                // Frame dropped; drain the chip so it still ends idle.
                self.switch_to_idle()?;
                return Err(PhyError::AllocFailed);
            }
        };

        let mut payload = [0u8; MAX_PAYLOAD_SIZE];
        let payload = &mut payload[..length as usize];
        self.transport
            .read_burst(registers::FIFO, payload)
            .map_err(PhyError::Transport)?;

        packet.data.clear();
        packet.data.push(length).map_err(|_| PhyError::RxOverflow)?;
        packet
            .data
            .extend_from_slice(payload)
            .map_err(|_| PhyError::RxOverflow)?;

        // Two status bytes appended by the chip: RSSI, then LQI with the
        // CRC flag in the top bit.
        let mut appended = [0u8; 2];
        self.transport
            .read_burst(registers::FIFO, &mut appended)
            .map_err(PhyError::Transport)?;

        let rssi_dbm = registers::rssi_to_dbm(appended[0]);
        packet.rx_meta = Some(RxMeta {
            rssi_dbm,
            link_quality: appended[1] & !registers::LQI_CRC_OK,
            crc_ok: appended[1] & registers::LQI_CRC_OK != 0,
        });

        self.handler.rssi_valid(rssi_dbm);
        self.handler.rx_complete(packet);
        self.switch_to_idle()
    }

    /// Common completion path: flush both FIFOs, force idle, power down
    ///
    /// Safe to run with the chip already idle.
    // TODO issue the flushes from idle only, per the chip state diagram
    fn switch_to_idle(&mut self) -> Result<(), PhyError<T::Error>> {
        self.transport
            .strobe(strobe::SFRX)
            .map_err(PhyError::Transport)?;
        self.transport
            .strobe(strobe::SFTX)
            .map_err(PhyError::Transport)?;
        self.transport
            .strobe(strobe::SIDLE)
            .map_err(PhyError::Transport)?;
        self.transport
            .strobe(strobe::SPWD)
            .map_err(PhyError::Transport)?;
        self.state = RadioState::Idle;
        Ok(())
    }
}
