//! SPI/GPIO implementation of the register/strobe transport

use embedded_hal::{
    blocking::spi::{Transfer, Write},
    digital::v2::OutputPin,
};

use crate::registers::strobe;
use crate::transport::traits::{InterruptControl, Transport};

// SPI header access-mode bits
const WRITE_BURST: u8 = 0x40;
const READ_SINGLE: u8 = 0x80;
const READ_BURST: u8 = 0xC0;

// Status registers share addresses with strobes; reads must set the burst
// bit to select the register.
const STATUS_REG_LOW: u8 = 0x30;
const STATUS_REG_HIGH: u8 = 0x3D;

/// Possible errors on the SPI transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiTransportError {
    /// SPI transfer error
    Spi,
    /// Chip-select GPIO error
    Gpio,
}

/// Transport over a blocking SPI bus with a chip-select pin
///
/// The completion interrupt arrives on a GDO pin routed to an external
/// interrupt line; masking that line is platform code, supplied through
/// the [`InterruptControl`] implementation.
pub struct SpiTransport<SPI, CS, IRQ>
where
    SPI: Transfer<u8> + Write<u8>,
    CS: OutputPin,
    IRQ: InterruptControl,
{
    spi: SPI,
    cs: CS,
    irq: IRQ,
}

impl<SPI, CS, IRQ> SpiTransport<SPI, CS, IRQ>
where
    SPI: Transfer<u8> + Write<u8>,
    CS: OutputPin,
    IRQ: InterruptControl,
{
    /// Create a new SPI transport
    pub fn new(spi: SPI, cs: CS, irq: IRQ) -> Self {
        Self { spi, cs, irq }
    }

    /// Release the underlying bus and pins
    pub fn free(self) -> (SPI, CS, IRQ) {
        (self.spi, self.cs, self.irq)
    }

    fn select(&mut self) -> Result<(), SpiTransportError> {
        self.cs.set_low().map_err(|_| SpiTransportError::Gpio)
    }

    fn deselect(&mut self) -> Result<(), SpiTransportError> {
        self.cs.set_high().map_err(|_| SpiTransportError::Gpio)
    }
}

impl<SPI, CS, IRQ> Transport for SpiTransport<SPI, CS, IRQ>
where
    SPI: Transfer<u8> + Write<u8>,
    CS: OutputPin,
    IRQ: InterruptControl,
{
    type Error = SpiTransportError;

    fn reset(&mut self) -> Result<(), Self::Error> {
        self.strobe(strobe::SRES)?;
        // The chip needs its crystal settled before the next header byte.
        // TODO: replace with a DelayUs once the settle time is profiled
        for _ in 0..1000 {
            core::hint::spin_loop();
        }
        Ok(())
    }

    fn strobe(&mut self, command: u8) -> Result<(), Self::Error> {
        self.select()?;
        let result = self.spi.write(&[command]).map_err(|_| SpiTransportError::Spi);
        self.deselect()?;
        result
    }

    fn write_register(&mut self, addr: u8, value: u8) -> Result<(), Self::Error> {
        self.select()?;
        let result = self
            .spi
            .write(&[addr, value])
            .map_err(|_| SpiTransportError::Spi);
        self.deselect()?;
        result
    }

    fn read_register(&mut self, addr: u8) -> Result<u8, Self::Error> {
        let mode = if (STATUS_REG_LOW..=STATUS_REG_HIGH).contains(&addr) {
            READ_BURST
        } else {
            READ_SINGLE
        };
        self.select()?;
        let mut buffer = [addr | mode, 0];
        let result = self
            .spi
            .transfer(&mut buffer)
            .map(|bytes| bytes[1])
            .map_err(|_| SpiTransportError::Spi);
        self.deselect()?;
        result
    }

    fn write_burst(&mut self, addr: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.select()?;
        let result = self
            .spi
            .write(&[addr | WRITE_BURST])
            .and_then(|_| self.spi.write(data))
            .map_err(|_| SpiTransportError::Spi);
        self.deselect()?;
        result
    }

    fn read_burst(&mut self, addr: u8, buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.select()?;
        let result = self
            .spi
            .write(&[addr | READ_BURST])
            .map_err(|_| SpiTransportError::Spi)
            .and_then(|_| {
                buffer.fill(0);
                self.spi
                    .transfer(buffer)
                    .map(|_| ())
                    .map_err(|_| SpiTransportError::Spi)
            });
        self.deselect()?;
        result
    }

    fn set_interrupt_enabled(&mut self, enabled: bool) -> Result<(), Self::Error> {
        self.irq.set_enabled(enabled);
        Ok(())
    }
}
