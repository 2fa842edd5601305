//! Hardware seam between the driver and the chip's physical link

/// Low-level access to the chip's registers and command strobes
///
/// All operations are synchronous and complete before returning. The
/// driver issues them in precise order relative to one another; an
/// implementation must not reorder or buffer them.
pub trait Transport {
    /// Error type for transport operations
    type Error;

    /// Reset the chip to its hardware power-up state
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Issue a single command strobe
    fn strobe(&mut self, command: u8) -> Result<(), Self::Error>;

    /// Write one configuration register
    fn write_register(&mut self, addr: u8, value: u8) -> Result<(), Self::Error>;

    /// Read one configuration or status register
    fn read_register(&mut self, addr: u8) -> Result<u8, Self::Error>;

    /// Write consecutive bytes starting at `addr` (FIFO or config burst)
    fn write_burst(&mut self, addr: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read consecutive bytes starting at `addr` into `buffer`
    fn read_burst(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), Self::Error>;

    /// Mask or unmask the end-of-packet completion interrupt
    fn set_interrupt_enabled(&mut self, enabled: bool) -> Result<(), Self::Error>;
}

/// MCU-side mask for the completion interrupt line
///
/// Masking happens at the interrupt controller, not the chip, so it is
/// platform code; implementations wrap whatever the platform offers
/// (an EXTI mask bit, an NVIC enable, a GPIO interrupt gate).
pub trait InterruptControl {
    /// Enable or disable delivery of the completion interrupt
    fn set_enabled(&mut self, enabled: bool);
}
