//! Digital audio interface: descriptor and stream hooks
//!
//! The ES9038PRO autodetects serial format and sample rate from the
//! incoming clocks, so `hw_params` and `set_fmt` program nothing. Only
//! startup (volume mode) and mute touch registers.

use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use platform::audio::{DaiDriver, DaiFormat, DaiOps, HwParams, PcmFormats, PcmStream, RateRange};
use platform::audio_types::SampleRateHz;
use platform::regmap::RegmapError;

use crate::driver::Ess9038pro;
use crate::registers::{Register, MUTE_BIT, VOLUME_CONF_MASK, VOLUME_CONF_STEREO_LATCHED};

/// Sample formats accepted on the serial input.
pub const FORMATS: PcmFormats = PcmFormats::S16_LE
    .union(PcmFormats::S32_LE)
    .union(PcmFormats::S32_BE);

/// DAI descriptor: stereo playback, 8 kHz to 1.536 MHz.
pub static DAI_DRIVER: DaiDriver = DaiDriver {
    name: "ess9038pro-dai",
    playback: PcmStream {
        stream_name: "Playback",
        channels_min: 2,
        channels_max: 2,
        rates: RateRange {
            min: SampleRateHz::MIN_HZ,
            max: SampleRateHz::MAX_HZ,
        },
        formats: FORMATS,
    },
};

impl<I: I2c, P: OutputPin> DaiOps for Ess9038pro<I, P> {
    type Error = RegmapError<I::Error>;

    /// Put the volume block in stereo mode with channel 1 volume applied to
    /// every channel. Upper bits of VOLUME_CONF are kept.
    fn startup(&mut self) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("ESS9038PRO: startup");

        self.regmap.update_bits(
            Register::VolumeConf.addr(),
            VOLUME_CONF_MASK,
            VOLUME_CONF_STEREO_LATCHED,
        )?;
        Ok(())
    }

    fn hw_params(&mut self, params: &HwParams) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "ESS9038PRO: hw_params {=u32} Hz, {=u8} ch, {} bit",
            params.rate.get(),
            params.channels,
            params.format.physical_width()
        );
        #[cfg(not(feature = "defmt"))]
        let _ = params;
        Ok(())
    }

    fn set_fmt(&mut self, fmt: DaiFormat) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("ESS9038PRO: set_fmt {}", fmt);

        self.format = Some(fmt);
        Ok(())
    }

    fn mute(&mut self, mute: bool) -> Result<(), Self::Error> {
        #[cfg(feature = "defmt")]
        defmt::debug!("ESS9038PRO: mute {=bool}", mute);

        let value = if mute { MUTE_BIT } else { 0x00 };
        self.regmap
            .update_bits(Register::FilterAndMute.addr(), MUTE_BIT, value)?;
        Ok(())
    }
}
