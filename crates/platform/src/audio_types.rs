//! Audio domain newtypes for construction-time validation.
//!
//! - `SampleRateHz`: validates the 8 kHz – 1.536 MHz PCM range
//! - `I2cAddr`: rejects I²C-reserved 7-bit addresses

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("value {value} outside {min}..={max}")]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

// ── SampleRateHz ─────────────────────────────────────────────────────────────

/// Sample rate in Hz, validated to the range ESS Sabre DACs accept.
///
/// Valid range: 8000–1536000 Hz (8 kHz telephony up to 32 × 48 kHz).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct SampleRateHz(u32);

impl SampleRateHz {
    /// Minimum supported sample rate: 8000 Hz.
    pub const MIN_HZ: u32 = 8_000;

    /// Maximum supported sample rate: 1 536 000 Hz.
    pub const MAX_HZ: u32 = 1_536_000;

    /// Create a `SampleRateHz`, returning an error if out of range.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `hz < 8000` or `hz > 1536000`.
    pub fn new(hz: u32) -> Result<Self, OutOfRangeError> {
        if (Self::MIN_HZ..=Self::MAX_HZ).contains(&hz) {
            Ok(Self(hz))
        } else {
            Err(OutOfRangeError {
                value: hz,
                min: Self::MIN_HZ,
                max: Self::MAX_HZ,
            })
        }
    }

    /// Return the sample rate in Hz.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

// ── I2cAddr ──────────────────────────────────────────────────────────────────

/// I²C 7-bit address.
///
/// ## Reserved I²C addresses (I²C specification):
/// - 0x00–0x07: reserved (general call, CBUS, etc.)
/// - 0x78–0x7F: reserved (10-bit address prefix, device ID, etc.)
///
/// ```rust
/// use platform::audio_types::I2cAddr;
///
/// assert!(I2cAddr::try_new(0x48).is_ok());
/// assert!(I2cAddr::try_new(0x03).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct I2cAddr(u8);

impl I2cAddr {
    /// Create an I²C address without checking reserved ranges.
    ///
    /// Use only for hardware-fixed constants.
    #[must_use]
    pub const fn new(addr: u8) -> Self {
        Self(addr)
    }

    /// Create an I²C address, rejecting I²C-reserved ranges.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `addr <= 0x07` or `addr >= 0x78`.
    pub fn try_new(addr: u8) -> Result<Self, OutOfRangeError> {
        if (0x08..=0x77).contains(&addr) {
            Ok(Self(addr))
        } else {
            Err(OutOfRangeError {
                value: u32::from(addr),
                min: 0x08,
                max: 0x77,
            })
        }
    }

    /// Return the 7-bit I²C address.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}
