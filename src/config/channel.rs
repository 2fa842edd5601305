//! Abstract channel descriptor and its supported-combination rules
//!
//! A [`ChannelId`] describes a channel independently of chip registers:
//! frequency band, rate class, coding scheme and center frequency index.
//! The translation into concrete register values lives in
//! [`crate::registers`]; this module owns the descriptor types and the
//! validation of which combinations the driver supports.

/// Highest valid center frequency index in the 433 MHz band plan
pub const MAX_CENTER_FREQ_INDEX: u8 = 68;

/// Sub-GHz frequency band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Band {
    /// 433 MHz ISM band
    Band433,
    /// 868 MHz ISM band
    Band868,
    /// 915 MHz ISM band
    Band915,
}

/// Symbol rate class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RateClass {
    /// Low rate
    LowRate,
    /// Normal rate
    NormalRate,
    /// High rate
    HiRate,
}

/// Payload coding scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Coding {
    /// PN9 whitening, no forward error correction
    Pn9,
    /// PN9 whitening with forward error correction
    Fec,
}

/// Unsupported or malformed channel descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Band other than 433 MHz
    UnsupportedBand,
    /// Rate class other than normal rate
    UnsupportedRate,
    /// Coding scheme other than PN9
    UnsupportedCoding,
    /// Center frequency index outside the band plan
    InvalidChannelIndex,
}

/// Abstract channel descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelId {
    /// Frequency band
    pub band: Band,
    /// Rate class
    pub rate: RateClass,
    /// Coding scheme
    pub coding: Coding,
    /// Center frequency index within the band plan
    pub center_freq_index: u8,
}

impl ChannelId {
    /// Create a new channel descriptor
    pub fn new(band: Band, rate: RateClass, coding: Coding, center_freq_index: u8) -> Self {
        Self {
            band,
            rate,
            coding,
            center_freq_index,
        }
    }

    /// Check the descriptor against the combinations this driver supports
    ///
    /// Only the 433 MHz band at normal rate with PN9 coding is implemented
    /// in this revision; everything else is rejected here, before any
    /// register write is derived from the descriptor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.band != Band::Band433 {
            return Err(ConfigError::UnsupportedBand);
        }
        if self.rate != RateClass::NormalRate {
            return Err(ConfigError::UnsupportedRate);
        }
        if self.coding != Coding::Pn9 {
            return Err(ConfigError::UnsupportedCoding);
        }
        if self.center_freq_index > MAX_CENTER_FREQ_INDEX {
            return Err(ConfigError::InvalidChannelIndex);
        }
        Ok(())
    }
}

/// Transmission parameters for one packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxConfig {
    /// Target channel
    pub channel: ChannelId,
    /// Requested radiated power in dBm
    pub eirp_dbm: i8,
}

/// Reception parameters for an armed receive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RxConfig {
    /// Channel to listen on
    pub channel: ChannelId,
}
