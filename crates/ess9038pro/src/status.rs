//! Read-only status registers
//!
//! CHIP_ID_STATUS (64) is cached: its ID bits are fixed and the lock bits
//! are only informative. The PLL status bytes (66–69) and INPUT_STATUS
//! (100) are volatile and always read from the bus.

use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use platform::regmap::RegmapError;

use crate::driver::Ess9038pro;
use crate::registers::{Register, STATUS_AUTOMUTE, STATUS_CHIP_ID_SHIFT, STATUS_DPLL_LOCK};

/// Decoded CHIP_ID_STATUS register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChipStatus {
    /// DPLL locked to the incoming stream.
    pub dpll_locked: bool,
    /// Automute engaged.
    pub automute_active: bool,
    /// Chip ID, bits \[7:2\].
    pub chip_id: u8,
}

impl ChipStatus {
    /// Decode a raw register value.
    pub const fn from_raw(raw: u8) -> Self {
        Self {
            dpll_locked: raw & STATUS_DPLL_LOCK != 0,
            automute_active: raw & STATUS_AUTOMUTE != 0,
            chip_id: raw.wrapping_shr(STATUS_CHIP_ID_SHIFT as u32),
        }
    }
}

/// DPLL number from the PLL status registers.
///
/// Proportional to the detected sample rate:
/// `fs = ratio · mclk / 2³²`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DpllRatio(pub u32);

impl DpllRatio {
    /// Detected sample rate in Hz for master clock `mclk_hz`.
    pub fn sample_rate_hz(self, mclk_hz: u32) -> u32 {
        // u32 · u32 always fits in u64
        let product = u64::from(self.0).saturating_mul(u64::from(mclk_hz));
        u32::try_from(product.wrapping_shr(32)).unwrap_or(u32::MAX)
    }
}

impl<I: I2c, P: OutputPin> Ess9038pro<I, P> {
    /// Chip ID and lock flags.
    pub fn chip_status(&mut self) -> Result<ChipStatus, RegmapError<I::Error>> {
        let raw = self.regmap.read(Register::ChipIdStatus.addr())?;
        Ok(ChipStatus::from_raw(raw))
    }

    /// Current DPLL number, least significant byte first on the bus.
    pub fn dpll_ratio(&mut self) -> Result<DpllRatio, RegmapError<I::Error>> {
        let mut bytes = [0u8; 4];
        let regs = [
            Register::PllStatus0,
            Register::PllStatus1,
            Register::PllStatus2,
            Register::PllStatus3,
        ];
        for (byte, reg) in bytes.iter_mut().zip(regs) {
            *byte = self.regmap.read(reg.addr())?;
        }
        Ok(DpllRatio(u32::from_le_bytes(bytes)))
    }

    /// Raw INPUT_STATUS register.
    pub fn input_status(&mut self) -> Result<u8, RegmapError<I::Error>> {
        self.regmap.read(Register::InputStatus.addr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chip_status_splits_bits() {
        let status = ChipStatus::from_raw(0b1010_1101);
        assert!(status.dpll_locked);
        assert!(!status.automute_active);
        assert_eq!(status.chip_id, 0b10_1011);
    }

    #[test]
    fn dpll_ratio_scales_by_mclk() {
        // 48 kHz on a 100 MHz master clock
        let ratio = DpllRatio(2_061_585);
        assert_eq!(ratio.sample_rate_hz(100_000_000), 48_000);
        assert_eq!(DpllRatio(0).sample_rate_hz(100_000_000), 0);
        assert_eq!(DpllRatio(u32::MAX).sample_rate_hz(u32::MAX), 4_294_967_294);
    }
}
